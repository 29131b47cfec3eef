// src/interpreter/mod.rs

use crate::errors::Result;
use async_trait::async_trait;

pub mod process;

pub use process::ProcessInterpreter;

/// What an interpreter run left behind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessOutput {
    /// Exit code, `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// A backend that can run a complete program given as text.
///
/// The production implementation spawns a local process; tests substitute
/// in-memory fakes so the HTTP layer can be exercised without an interpreter.
#[async_trait]
pub trait Interpreter: Send + Sync {
    /// Runs `code` to completion and captures its output.
    ///
    /// Returns `Err` only when the program could not be run at all
    /// (spawn failure, wait failure, timeout). A program that ran and
    /// failed is still `Ok` with its diagnostics in `stderr`.
    async fn run(&self, code: &str) -> Result<ProcessOutput>;
}
