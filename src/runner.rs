// src/runner.rs
use crate::config::InterpreterConfig;
use crate::errors::{FukuwaraiError, Result};
use crate::interpreter::{Interpreter, ProcessInterpreter, ProcessOutput};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use uuid::Uuid;

/// Executes submitted code with bounded concurrency and classifies the outcome.
#[derive(Clone)]
pub struct Runner {
    interpreter: Arc<dyn Interpreter>,
    permits: Arc<Semaphore>,
    stdout_error_marker: bool,
}

impl Runner {
    pub fn new(interpreter: Arc<dyn Interpreter>, max_concurrent: usize, stdout_error_marker: bool) -> Self {
        Self {
            interpreter,
            permits: Arc::new(Semaphore::new(max_concurrent)),
            stdout_error_marker,
        }
    }

    pub fn from_config(config: &InterpreterConfig) -> Self {
        Self::new(
            Arc::new(ProcessInterpreter::from_config(config)),
            config.max_concurrent,
            config.stdout_error_marker,
        )
    }

    /// Run `code` and return its stdout on success.
    ///
    /// Empty input is rejected before any process is spawned. Callers beyond
    /// the configured concurrency wait for a free slot.
    pub async fn execute(&self, code: &str) -> Result<String> {
        if code.is_empty() {
            return Err(FukuwaraiError::EmptyInput);
        }

        let run_id = Uuid::new_v4();
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| FukuwaraiError::Invocation("runner is shutting down".to_string()))?;

        log::info!("[{}] running {} bytes of code", run_id, code.len());
        let start = Instant::now();
        let output = self.interpreter.run(code).await.inspect_err(|e| {
            log::warn!("[{}] interpreter did not run: {}", run_id, e);
        })?;

        let result = classify(output, self.stdout_error_marker);
        match &result {
            Ok(_) => log::info!("[{}] succeeded in {}ms", run_id, start.elapsed().as_millis()),
            Err(_) => log::info!("[{}] reported an error in {}ms", run_id, start.elapsed().as_millis()),
        }
        result
    }

    pub fn available_slots(&self) -> usize {
        self.permits.available_permits()
    }
}

/// Decide whether a finished run succeeded.
///
/// Any stderr output or a non-success exit status is a failure. With
/// `stdout_error_marker`, stdout containing "Error" is a failure as well.
pub fn classify(output: ProcessOutput, stdout_error_marker: bool) -> Result<String> {
    if !output.stderr.is_empty() {
        return Err(FukuwaraiError::Interpreter(output.stderr));
    }
    if stdout_error_marker && output.stdout.contains("Error") {
        return Err(FukuwaraiError::Interpreter(output.stdout));
    }
    if !output.success() {
        if !output.stdout.is_empty() {
            return Err(FukuwaraiError::Interpreter(output.stdout));
        }
        let message = match output.exit_code {
            Some(code) => format!("プロセスが終了コード {} で終了しました", code),
            None => "プロセスがシグナルで終了しました".to_string(),
        };
        return Err(FukuwaraiError::Interpreter(message));
    }
    Ok(output.stdout)
}
