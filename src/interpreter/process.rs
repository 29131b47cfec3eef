// src/interpreter/process.rs

use async_trait::async_trait;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;

use crate::config::InterpreterConfig;
use crate::errors::{FukuwaraiError, Result};
use crate::interpreter::{Interpreter, ProcessOutput};

/// Runs code through a local interpreter executable.
///
/// The code travels as a single argv entry, so no shell ever sees it.
pub struct ProcessInterpreter {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessInterpreter {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &InterpreterConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone(), config.timeout)
    }
}

#[async_trait]
impl Interpreter for ProcessInterpreter {
    async fn run(&self, code: &str) -> Result<ProcessOutput> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(code)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        log::debug!("Spawning {} with {} bytes of code", self.program, code.len());
        let start = Instant::now();

        let child = cmd.spawn().map_err(|e| {
            FukuwaraiError::Invocation(format!("failed to spawn '{}': {}", self.program, e))
        })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(FukuwaraiError::Invocation(format!(
                    "failed to wait for '{}': {}",
                    self.program, e
                )));
            }
            Err(_) => {
                log::warn!(
                    "{} exceeded {}s, killed",
                    self.program,
                    self.timeout.as_secs()
                );
                return Err(FukuwaraiError::Timeout {
                    secs: self.timeout.as_secs(),
                });
            }
        };

        log::debug!(
            "{} finished with {:?} in {}ms",
            self.program,
            output.status.code(),
            start.elapsed().as_millis()
        );

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
