// src/api/state.rs
use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::interpreter::Interpreter;
use crate::runner::Runner;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<Catalog>,
    pub runner: Runner,
}

impl AppState {
    pub fn new(config: AppConfig, catalog: Catalog) -> Self {
        let runner = Runner::from_config(&config.interpreter);
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            runner,
        }
    }

    /// Same as [`AppState::new`] but runs code through the given backend.
    pub fn with_interpreter(config: AppConfig, catalog: Catalog, interpreter: Arc<dyn Interpreter>) -> Self {
        let runner = Runner::new(
            interpreter,
            config.interpreter.max_concurrent,
            config.interpreter.stdout_error_marker,
        );
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            runner,
        }
    }
}
