use actix_web::web;

use crate::web::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_check))
        .route("/generate", web::post().to(handlers::generate))
        .route("/file", web::post().to(handlers::file_operation))
        .route("/generate_website", web::post().to(handlers::generate_website))
        .route("/ws", web::get().to(handlers::ws));
}
