//! HTTP Error Types
//!
//! Maps application errors onto status codes and reply bodies.

use crate::types::ResponseBody;
use hyper::StatusCode;
use scoring_core::error::{code, AppError};
use thiserror::Error;

/// Transport errors (startup and shutdown only; requests never fail this way)
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server already stopped")]
    AlreadyStopped,

    #[error("Server task failed: {0}")]
    Join(String),
}

/// Convert a status code from the fixed set to a hyper StatusCode
pub fn to_status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Convert AppError to a reply body
///
/// Request-body problems (invalid JSON, non-object JSON) carry only the
/// reason phrase; everything else carries the error message.
pub fn to_response_body(err: &AppError) -> ResponseBody {
    match err {
        AppError::Serialization(_) => ResponseBody::status(code::BAD_REQUEST),
        AppError::AuthFailure => ResponseBody::status(code::FORBIDDEN),
        other => ResponseBody::Error {
            error: serde_json::Value::String(other.to_string()),
            code: other.status_code(),
        },
    }
}
