// Central Error Type for the Application

use crate::domain::DomainError;
use thiserror::Error;

/// Response status codes and their fixed reason phrases
pub mod code {
    pub const OK: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const FORBIDDEN: u16 = 403;
    pub const NOT_FOUND: u16 = 404;
    pub const INVALID_REQUEST: u16 = 422;
    pub const INTERNAL_ERROR: u16 = 500;

    pub fn reason(code: u16) -> &'static str {
        match code {
            OK => "OK",
            BAD_REQUEST => "Bad Request",
            FORBIDDEN => "Forbidden",
            NOT_FOUND => "Not Found",
            INVALID_REQUEST => "Invalid Request",
            _ => "Internal Server Error",
        }
    }
}

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Envelope or method arguments failed validation
    #[error("Invalid arguments: {}", join(.0))]
    InvalidArguments(Vec<DomainError>),

    #[error("Authentication failed")]
    AuthFailure,

    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    #[error("Scoring error: {0}")]
    Scoring(#[from] crate::port::ScoringError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Status code reported to the caller
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::InvalidArguments(_) | AppError::UnknownMethod(_) => code::INVALID_REQUEST,
            AppError::AuthFailure => code::FORBIDDEN,
            AppError::Serialization(_) => code::BAD_REQUEST,
            AppError::Scoring(_) | AppError::Config(_) | AppError::Internal(_) => {
                code::INTERNAL_ERROR
            }
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::InvalidArguments(vec![err])
    }
}

impl From<Vec<DomainError>> for AppError {
    fn from(errors: Vec<DomainError>) -> Self {
        AppError::InvalidArguments(errors)
    }
}

fn join(errors: &[DomainError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::AuthFailure.status_code(), 403);
        assert_eq!(AppError::UnknownMethod("x".into()).status_code(), 422);
        assert_eq!(AppError::InvalidArguments(vec![]).status_code(), 422);
        assert_eq!(AppError::Internal("boom".into()).status_code(), 500);
    }

    #[test]
    fn test_invalid_arguments_lists_every_problem() {
        let err = AppError::InvalidArguments(vec![
            DomainError::MissingField { field: "login" },
            DomainError::malformed("phone", "must be 11 digits starting with 7"),
        ]);

        let msg = err.to_string();
        assert!(msg.contains("'login' is required"));
        assert!(msg.contains("'phone' is invalid"));
    }

    #[test]
    fn test_reason_phrases() {
        assert_eq!(code::reason(code::OK), "OK");
        assert_eq!(code::reason(code::INVALID_REQUEST), "Invalid Request");
        assert_eq!(code::reason(code::INTERNAL_ERROR), "Internal Server Error");
    }
}
