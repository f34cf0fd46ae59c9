//! Error types for the Tempo runtime

use tempo_core::TempoError;
use thiserror::Error;

use crate::ConfigError;

/// Errors raised while hosting the timer core
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Timer(#[from] TempoError),

    #[error("Malformed command: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;
