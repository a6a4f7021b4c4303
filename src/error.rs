//! Error types for the practice engine.
//!
//! The session engine itself never fails; these cover the outer surfaces
//! (configuration, CLI parsing, API lookups).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown practice type: {0} (expected breathing, meditation, muscle-relaxation or grounding)")]
    UnknownPractice(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
