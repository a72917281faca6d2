pub mod default_route;
pub mod enrich_route;

use actix_web::{http::StatusCode, HttpResponse};
use askama::Template;

pub fn render<T: Template>(status: StatusCode, template: T) -> HttpResponse {
    match template.render() {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render template: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
