//! Error types for query translation

use crate::error::AppError;

/// Result type for query translation
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Errors raised while translating a simple query
///
/// Translation is a pure function of the input string, so every error carries
/// the byte offset of the offending position for the 400-class response the
/// request handler builds out of it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A phrase was opened with `"` but never closed
    #[error("unterminated phrase: no closing double quote for the quote at offset {offset}")]
    UnterminatedPhrase { offset: usize },
}

impl ParseError {
    /// Byte offset into the query string at which the error was detected
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnterminatedPhrase { offset } => *offset,
        }
    }
}

impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        AppError::Validation(err.to_string())
    }
}
