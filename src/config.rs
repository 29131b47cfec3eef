// src/config.rs
use crate::errors::{FukuwaraiError, Result};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// How submitted code is handed to the external interpreter.
#[derive(Debug, Clone)]
pub struct InterpreterConfig {
    /// Name used in the route, e.g. `python` for `/api/run-python`.
    pub name: String,
    /// Executable to spawn.
    pub program: String,
    /// Arguments placed before the code, which is always passed as the final argument.
    pub args: Vec<String>,
    pub timeout: Duration,
    pub max_concurrent: usize,
    /// Also treat stdout containing "Error" as a failure.
    pub stdout_error_marker: bool,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            name: "python".to_string(),
            program: "python3".to_string(),
            args: vec!["-c".to_string()],
            timeout: Duration::from_secs(10),
            max_concurrent: 4,
            stdout_error_marker: false,
        }
    }
}

/// High-level application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub interpreter: InterpreterConfig,
    /// Optional TOML file replacing the built-in puzzle catalog.
    pub puzzles_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            interpreter: InterpreterConfig::default(),
            puzzles_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();
        let mut interpreter = InterpreterConfig::default();

        if let Some(name) = lookup("FUKUWARAI_INTERPRETER") {
            interpreter.name = name.trim().to_string();
        }
        if let Some(program) = lookup("FUKUWARAI_INTERPRETER_PROGRAM") {
            interpreter.program = program.trim().to_string();
        }
        if let Some(args) = lookup("FUKUWARAI_INTERPRETER_ARGS") {
            interpreter.args = args
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "FUKUWARAI_TIMEOUT_SECS")? {
            interpreter.timeout = Duration::from_secs(secs);
        }
        if let Some(max) = parse_var(&lookup, "FUKUWARAI_MAX_CONCURRENT_RUNS")? {
            interpreter.max_concurrent = max;
        }
        if let Some(flag) = parse_var(&lookup, "FUKUWARAI_STDOUT_ERROR_MARKER")? {
            interpreter.stdout_error_marker = flag;
        }

        let config = AppConfig {
            host: lookup("FUKUWARAI_HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "FUKUWARAI_PORT")?.unwrap_or(defaults.port),
            interpreter,
            puzzles_path: lookup("FUKUWARAI_PUZZLES")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let name = &self.interpreter.name;
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(FukuwaraiError::Config(format!(
                "Interpreter name '{}' must be non-empty and contain only [A-Za-z0-9_]",
                name
            )));
        }
        if self.interpreter.program.is_empty() {
            return Err(FukuwaraiError::Config("Interpreter program must not be empty".to_string()));
        }
        if self.interpreter.timeout.is_zero() {
            return Err(FukuwaraiError::Config("FUKUWARAI_TIMEOUT_SECS must be at least 1".to_string()));
        }
        if self.interpreter.max_concurrent == 0 {
            return Err(FukuwaraiError::Config(
                "FUKUWARAI_MAX_CONCURRENT_RUNS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Path of the execution endpoint, e.g. `/api/run-python`.
    pub fn run_path(&self) -> String {
        format!("/api/run-{}", self.interpreter.name)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| FukuwaraiError::Config(format!("Invalid value '{}' for {}: {}", raw, key, e))),
    }
}
