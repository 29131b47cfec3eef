// src/api/handlers/puzzles.rs
use actix_web::{web, HttpResponse, Result};
use serde::Serialize;
use serde_json::json;
use crate::api::AppState;
use crate::catalog::Difficulty;
use crate::models::AnnotatedLine;
use crate::puzzle::PuzzleSession;

#[derive(Serialize)]
pub struct LevelsResponse {
    pub levels: Vec<Difficulty>,
}

#[derive(Serialize)]
pub struct PuzzleResponse {
    pub difficulty: Difficulty,
    pub lines: Vec<AnnotatedLine>,
}

/// GET /api/puzzles - List the difficulty levels
pub async fn list_levels() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(LevelsResponse {
        levels: Difficulty::ALL.to_vec(),
    }))
}

/// GET /api/puzzles/{level} - A freshly shuffled puzzle for one level
pub async fn get_puzzle(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let level = match path.into_inner().parse::<Difficulty>() {
        Ok(level) => level,
        Err(e) => {
            return Ok(HttpResponse::NotFound().json(json!({ "error": e.to_string() })));
        }
    };

    let session = PuzzleSession::with_difficulty(state.catalog.clone(), level);

    Ok(HttpResponse::Ok().json(PuzzleResponse {
        difficulty: session.difficulty(),
        lines: session.annotated_lines(),
    }))
}
