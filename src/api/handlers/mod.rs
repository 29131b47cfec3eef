// src/api/handlers/mod.rs
mod health;
mod puzzles;
mod run;

pub use health::health_check;
pub use puzzles::{get_puzzle, list_levels};
pub use run::run_code;
