use actix_web::{get, http::StatusCode, HttpResponse};
use askama::Template;

use super::render;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub error: Option<String>,
}

#[get("/")]
pub async fn default() -> HttpResponse {
    render(StatusCode::OK, IndexTemplate { error: None })
}
