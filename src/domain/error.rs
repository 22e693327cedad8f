//! Error types for domain metadata operations

use crate::error::AppError;

/// Errors from domain name validation and field configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Domain name shorter than 3 characters
    #[error("too short domain name \"{0}\"")]
    TooShortName(String),

    /// Domain name longer than 28 characters
    #[error("too long domain name \"{0}\"")]
    TooLongName(String),

    /// Domain name contains characters outside `a-z0-9`; the payload is the
    /// quoted, comma-separated list of offending characters
    #[error("{0} cannot appear in a domain name")]
    InvalidNameCharacters(String),

    /// Field defined twice
    #[error("the field \"{0}\" is already defined")]
    FieldAlreadyExists(String),

    /// Field referenced but never defined
    #[error("the field \"{0}\" is not defined")]
    UnknownField(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UnknownField(_) => AppError::NotFound(err.to_string()),
            _ => AppError::Validation(err.to_string()),
        }
    }
}
