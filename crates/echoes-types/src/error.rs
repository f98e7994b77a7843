//! Error types for the Echoes host.

use std::io;

/// Errors produced by the Echoes host.
#[derive(Debug, thiserror::Error)]
pub enum EchoesError {
    #[error("surface error: {0}")]
    Surface(String),

    #[error("dispatch error: {0}")]
    Dispatch(String),

    #[error("picker error: {0}")]
    Picker(String),

    #[error("bridge error: {0}")]
    Bridge(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, EchoesError>;
