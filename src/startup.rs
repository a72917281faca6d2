use std::net::TcpListener;

use actix_files::Files;
use actix_multipart::form::MultipartFormConfig;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    routes::{default_route, enrich_route},
    services::EnrichmentPipeline,
};

const FORM_LIMIT: usize = 10 * 1024 * 1024;

/// Page routes plus the body limits that uploads and downloads need.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().limit(FORM_LIMIT))
        .app_data(
            MultipartFormConfig::default()
                .total_limit(FORM_LIMIT)
                .memory_limit(FORM_LIMIT),
        )
        .service(default_route::default)
        .service(enrich_route::enrich)
        .service(enrich_route::download);
}

pub fn run(listener: TcpListener, pipeline: EnrichmentPipeline) -> Result<Server, std::io::Error> {
    let pipeline = web::Data::new(pipeline);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(Files::new("/static", "./templates/static").prefer_utf8(true))
            .configure(configure_routes)
            .app_data(pipeline.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
