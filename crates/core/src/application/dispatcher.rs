//! Dispatcher
//!
//! Linear state machine for one request:
//! envelope → authenticate → resolve method arguments → handler → payload.
//! Every failure is terminal and mapped to a status code; nothing is retried.

use crate::application::auth::Authenticator;
use crate::application::context::RequestContext;
use crate::application::method::{clients_interests, online_score, MethodOutcome};
use crate::application::panic_guard::{execute_guarded, PanicGuardResult};
use crate::application::settings::Settings;
use crate::domain::{Envelope, Method, MethodArgs, MethodRequest};
use crate::error::{code, AppError, Result};
use crate::port::{Scoring, TimeProvider};
use serde_json::{Map, Value};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, warn};

/// Routes authenticated envelopes to method handlers
pub struct Dispatcher {
    settings: Arc<Settings>,
    authenticator: Authenticator,
    scoring: Arc<dyn Scoring>,
}

impl Dispatcher {
    pub fn new(
        settings: Arc<Settings>,
        scoring: Arc<dyn Scoring>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            authenticator: Authenticator::new(settings.clone(), time_provider),
            settings,
            scoring,
        }
    }

    /// Validate, authenticate and run one request.
    ///
    /// Audit metadata is written into `ctx` only when a handler succeeds.
    pub fn dispatch(&self, body: &Value, ctx: &mut RequestContext) -> Result<Value> {
        let envelope = Envelope::from_value(body)?;

        if !self.authenticator.authenticate(&envelope) {
            return Err(AppError::AuthFailure);
        }

        let method = Method::parse(&envelope.method)
            .ok_or_else(|| AppError::UnknownMethod(envelope.method.clone()))?;
        let arguments = MethodArgs::resolve(method, &envelope.arguments)?;
        let is_admin = self.authenticator.is_admin(&envelope.login);
        let request = MethodRequest::new(envelope, arguments, is_admin);

        debug!(
            request_id = %ctx.request_id,
            method = %request.arguments.method(),
            login = %request.login,
            admin = request.is_admin,
            "Dispatching"
        );

        let outcome = self.run_guarded(&request)?;
        ctx.record(outcome.audit);
        Ok(outcome.payload)
    }

    /// Dispatch and shape the result as `(payload, status code)`.
    ///
    /// Forbidden carries an empty payload; other failures carry the error message.
    pub fn respond(&self, body: &Value, ctx: &mut RequestContext) -> (Value, u16) {
        match self.dispatch(body, ctx) {
            Ok(payload) => (payload, code::OK),
            Err(AppError::AuthFailure) => (Value::Object(Map::new()), code::FORBIDDEN),
            Err(e) => {
                let status = e.status_code();
                if status >= code::INTERNAL_ERROR {
                    warn!(request_id = %ctx.request_id, error = %e, "Request failed");
                } else {
                    debug!(request_id = %ctx.request_id, error = %e, "Request rejected");
                }
                (Value::String(e.to_string()), status)
            }
        }
    }

    fn run_guarded(&self, request: &MethodRequest) -> Result<MethodOutcome> {
        match execute_guarded(AssertUnwindSafe(|| self.run(request))) {
            PanicGuardResult::Success(result) => result,
            PanicGuardResult::Panicked(msg) => Err(AppError::Internal(msg)),
        }
    }

    fn run(&self, request: &MethodRequest) -> Result<MethodOutcome> {
        match &request.arguments {
            MethodArgs::OnlineScore(args) => online_score::execute(
                self.scoring.as_ref(),
                args,
                self.settings.admin_score(),
                request.is_admin,
            ),
            MethodArgs::ClientsInterests(args) => {
                clients_interests::execute(self.scoring.as_ref(), args)
            }
        }
    }
}
