//! Error types for engine operations

use crate::error::AppError;

/// Result type for engine operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while loading documents or executing expressions
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Expression execution failed
    #[error("search execution failed: {0}")]
    ExecutionFailed(String),

    /// Document loading failed
    #[error("document loading failed: {0}")]
    LoadFailed(String),
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        AppError::Processing(err.to_string())
    }
}
