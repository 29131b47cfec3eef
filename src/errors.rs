// src/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FukuwaraiError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The client submitted no code.
    #[error("コードが空です")]
    EmptyInput,

    /// The interpreter ran and reported a diagnostic.
    #[error("{0}")]
    Interpreter(String),

    /// The interpreter process could not be spawned or awaited.
    #[error("Failed to invoke interpreter: {0}")]
    Invocation(String),

    #[error("実行がタイムアウトしました ({secs}秒)")]
    Timeout { secs: u64 },

    #[error("Unknown difficulty level '{0}'")]
    UnknownDifficulty(String),

    #[error("Unexpected response structure: {0}")]
    UnexpectedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FukuwaraiError>;
