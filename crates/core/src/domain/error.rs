// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("field '{field}' is required")]
    MissingField { field: &'static str },

    #[error("field '{field}' is invalid: {reason}")]
    MalformedField { field: &'static str, reason: String },

    #[error("{0}")]
    Incomplete(String),
}

impl DomainError {
    pub fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::MalformedField {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
