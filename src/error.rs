//! Error types for the analysis engine.
//!
//! Degenerate computations (zero variance, zero IQR, too few values) are not
//! errors: each component substitutes its documented fallback in place.

use thiserror::Error;

/// Errors surfaced to callers of the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The dataset argument is absent or not an array of row objects.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl EngineError {
    /// HTTP-equivalent status for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            EngineError::InvalidInput(_) => 400,
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
