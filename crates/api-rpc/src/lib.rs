//! HTTP API Layer
//!
//! Serves the Scoring API: `POST /method` carries a JSON envelope, the reply
//! is `{"response": ..., "code": ...}` or `{"error": ..., "code": ...}`.

pub mod error;
pub mod handler;
pub mod server;
pub mod shutdown;
pub mod types;

pub use server::{RpcServer, ServerHandle};
