//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Failed to parse model response: {error}\nRaw response: {raw}")]
    ParseError { error: String, raw: String },

    #[error("Model response is not a JSON object: {0}")]
    NotAnObject(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Unknown agent role: {0}")]
    UnknownRole(String),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),
}

impl DomainError {
    /// Check if this error was caused by unusable model output
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, DomainError::ParseError { .. } | DomainError::NotAnObject(_))
    }
}
