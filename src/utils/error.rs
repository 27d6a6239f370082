//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading a trace file
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to read trace: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid trace format: {0}")]
    InvalidFormat(String),
}

/// Errors raised while assembling or restoring a call graph
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Invalid {metric} for `{key}`: {value} (must be finite and non-negative)")]
    InvalidMetric {
        key: String,
        metric: &'static str,
        value: f64,
    },

    #[error("Conflicting stat records for `{0}`")]
    KeyCollision(String),

    #[error("Duplicate node `{0}` in serialized graph")]
    DuplicateNode(String),

    #[error("Edge {caller} -> {callee} references an unknown node")]
    DanglingEdge { caller: String, callee: String },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading analysis settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}
