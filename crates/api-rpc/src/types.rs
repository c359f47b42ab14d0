//! Response Envelope Types
//!
//! Every reply carries the status code in the body as well as on the wire.

use scoring_core::error::code;
use serde::Serialize;
use serde_json::Value;

/// Body of every HTTP reply
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// 200: `{"response": <payload>, "code": 200}`
    Success { response: Value, code: u16 },
    /// Anything else: `{"error": <message>, "code": <status>}`
    Error { error: Value, code: u16 },
}

impl ResponseBody {
    /// Shape a dispatcher result.
    ///
    /// An empty error payload is replaced by the reason phrase.
    pub fn from_outcome(payload: Value, status: u16) -> Self {
        if status == code::OK {
            return ResponseBody::Success {
                response: payload,
                code: status,
            };
        }

        let error = if is_empty_payload(&payload) {
            Value::String(code::reason(status).to_string())
        } else {
            payload
        };
        ResponseBody::Error {
            error,
            code: status,
        }
    }

    /// Error reply carrying only the reason phrase
    pub fn status(status: u16) -> Self {
        ResponseBody::Error {
            error: Value::String(code::reason(status).to_string()),
            code: status,
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            ResponseBody::Success { code, .. } | ResponseBody::Error { code, .. } => *code,
        }
    }
}

fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let body = ResponseBody::from_outcome(json!({"score": 3.0}), 200);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"response": {"score": 3.0}, "code": 200})
        );
    }

    #[test]
    fn test_forbidden_uses_reason_phrase() {
        let body = ResponseBody::from_outcome(json!({}), 403);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"error": "Forbidden", "code": 403})
        );
    }

    #[test]
    fn test_error_keeps_message() {
        let body = ResponseBody::from_outcome(json!("Unknown method: x"), 422);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"error": "Unknown method: x", "code": 422})
        );
    }

    #[test]
    fn test_status_only() {
        let body = ResponseBody::status(404);
        assert_eq!(body.code(), 404);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"error": "Not Found", "code": 404})
        );
    }
}
