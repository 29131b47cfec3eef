// src/api/routes.rs
use actix_web::{error, web, HttpResponse};
use serde_json::json;
use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().content_type_required(false).error_handler(|err, _req| {
        let message = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({ "error": message })),
        )
        .into()
    }))
    .service(
        web::scope("/api")
            .route("/v1/health", web::get().to(handlers::health_check))
            .route("/run-{interpreter}", web::post().to(handlers::run_code))
            .service(
                web::scope("/puzzles")
                    .route("", web::get().to(handlers::list_levels))
                    .route("/{level}", web::get().to(handlers::get_puzzle))
            )
    );
}
