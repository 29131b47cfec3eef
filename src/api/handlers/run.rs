// src/api/handlers/run.rs
use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use crate::api::AppState;
use crate::errors::FukuwaraiError;
use crate::models::{ExecutionRequest, ExecutionResult};

/// POST /api/run-{interpreter} - Run submitted code and report its output
pub async fn run_code(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<ExecutionRequest>,
) -> Result<HttpResponse> {
    let interpreter = path.into_inner();
    if interpreter != state.config.interpreter.name {
        return Ok(HttpResponse::NotFound().json(json!({
            "error": format!("Unknown interpreter '{}'", interpreter)
        })));
    }

    let code = req.into_inner().code;
    match state.runner.execute(&code).await {
        Ok(output) => Ok(HttpResponse::Ok().json(ExecutionResult::Success { output })),
        Err(
            e @ (FukuwaraiError::EmptyInput
            | FukuwaraiError::Interpreter(_)
            | FukuwaraiError::Timeout { .. }),
        ) => Ok(HttpResponse::BadRequest().json(ExecutionResult::Failure {
            error: e.to_string(),
        })),
        Err(e) => {
            log::error!("Interpreter invocation failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(ExecutionResult::Failure {
                error: format!("{} 実行エラー", state.config.interpreter.program),
            }))
        }
    }
}
