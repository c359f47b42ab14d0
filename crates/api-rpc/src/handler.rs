//! HTTP Request Handler
//!
//! Routes requests, decodes the JSON body and hands it to the dispatcher.

use crate::error::{to_response_body, to_status_code};
use crate::types::{HealthResponse, ResponseBody};
use bytes::Bytes;
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::{Body, Incoming};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Request, Response};
use scoring_core::application::{Dispatcher, RequestContext};
use scoring_core::error::{code, AppError};
use scoring_core::port::IdProvider;
use serde_json::Value;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Path of the RPC endpoint
pub const METHOD_PATH: &str = "/method";

/// Path of the liveness endpoint
pub const HEALTH_PATH: &str = "/health";

/// Largest accepted `/method` body
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Request id header (read from the request, echoed in the reply)
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub type HttpResponse = Response<Full<Bytes>>;

/// HTTP handler with injected dependencies
pub struct RpcHandler {
    dispatcher: Arc<Dispatcher>,
    id_provider: Arc<dyn IdProvider>,
}

impl RpcHandler {
    pub fn new(dispatcher: Arc<Dispatcher>, id_provider: Arc<dyn IdProvider>) -> Self {
        Self {
            dispatcher,
            id_provider,
        }
    }

    /// Handle one HTTP request; every failure becomes a JSON reply
    pub async fn handle(&self, req: Request<Incoming>) -> Result<HttpResponse, Infallible> {
        let request_id = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.id_provider.generate_id());

        let method = req.method().clone();
        let path = req.uri().path().to_string();
        debug!(request_id = %request_id, "{} {}", method, path);

        let body = match (method.as_str(), path.as_str()) {
            ("GET", HEALTH_PATH) => {
                let health = HealthResponse {
                    status: "ok",
                    version: scoring_core::VERSION,
                };
                return Ok(json_response(
                    code::OK,
                    serde_json::to_vec(&health).unwrap_or_else(|_| b"{\"status\":\"ok\"}".to_vec()),
                    &request_id,
                ));
            }
            ("POST", METHOD_PATH) => match read_body(req.into_body()).await {
                Ok(bytes) => self.handle_body(&bytes, &request_id),
                Err(e) => {
                    warn!(request_id = %request_id, error = %e, "Failed to read request body");
                    ResponseBody::status(code::BAD_REQUEST)
                }
            },
            _ => ResponseBody::status(code::NOT_FOUND),
        };

        Ok(reply(&body, &request_id))
    }

    /// Decode and dispatch a raw `/method` body
    pub fn handle_body(&self, body: &[u8], request_id: &str) -> ResponseBody {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => {
                debug!(request_id = %request_id, error = %e, "Undecodable body");
                return to_response_body(&AppError::from(e));
            }
        };

        let mut ctx = RequestContext::new(request_id);
        let (payload, status) = self.dispatcher.respond(&value, &mut ctx);
        let method_name = value
            .get("method")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();

        info!(
            request_id = %ctx.request_id,
            method = method_name,
            status,
            has = ?ctx.has,
            nclients = ?ctx.nclients,
            "Request handled"
        );

        ResponseBody::from_outcome(payload, status)
    }
}

/// Collect a request body, failing once it grows past [`MAX_BODY_BYTES`]
async fn read_body<B>(body: B) -> Result<Bytes, Box<dyn std::error::Error + Send + Sync>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    Ok(Limited::new(body, MAX_BODY_BYTES).collect().await?.to_bytes())
}

fn reply(body: &ResponseBody, request_id: &str) -> HttpResponse {
    let bytes = serde_json::to_vec(body).unwrap_or_else(|_| {
        format!(
            r#"{{"error":"{}","code":500}}"#,
            code::reason(code::INTERNAL_ERROR)
        )
        .into_bytes()
    });
    json_response(body.code(), bytes, request_id)
}

fn json_response(status: u16, bytes: Vec<u8>, request_id: &str) -> HttpResponse {
    let mut response = Response::new(Full::new(Bytes::from(bytes)));
    *response.status_mut() = to_status_code(status);
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(value) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
