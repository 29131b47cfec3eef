// src/api/handlers/health.rs
use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use crate::api::AppState;

pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "fukuwarai",
        "version": env!("CARGO_PKG_VERSION"),
        "interpreter": state.config.interpreter.name,
        "available_slots": state.runner.available_slots()
    })))
}
