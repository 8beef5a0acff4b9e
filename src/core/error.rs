//! Error types for grove

use thiserror::Error;

/// Main error type for the crate
///
/// Generation itself never fails; only configuration loading, validation
/// and named parameter updates produce errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),
}
