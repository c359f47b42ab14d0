// Method handlers - one use case per RPC method

pub mod clients_interests;
pub mod online_score;

use crate::application::context::Audit;
use serde_json::Value;

/// Handler result: response payload plus audit metadata for the context
#[derive(Debug, Clone, PartialEq)]
pub struct MethodOutcome {
    pub payload: Value,
    pub audit: Audit,
}
