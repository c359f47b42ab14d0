// Request Envelope & MethodRequest

use super::arguments::MethodArgs;
use super::error::DomainError;
use super::field::{Field, FieldKind};
use super::schema::Schema;
use serde_json::{Map, Value};

static ENVELOPE_SCHEMA: Schema = Schema::new(
    "envelope",
    &[
        Field::new("account", FieldKind::Char).nullable(),
        Field::new("login", FieldKind::Char).required().nullable(),
        Field::new("token", FieldKind::Char).required().nullable(),
        Field::new("arguments", FieldKind::Arguments).required().nullable(),
        Field::new("method", FieldKind::Char).required(),
    ],
);

/// Outer request shape, validated independently of the method schema
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub account: Option<String>,
    /// May be empty ("unset")
    pub login: String,
    pub method: String,
    pub token: String,
    /// Opaque until the method schema is resolved
    pub arguments: Map<String, Value>,
}

impl Envelope {
    /// Validate a decoded request body.
    ///
    /// `login`, `token` and `arguments` must be present (possibly empty);
    /// `method` must be a non-empty string; `arguments` must be an object.
    pub fn from_value(body: &Value) -> Result<Self, Vec<DomainError>> {
        let object = body
            .as_object()
            .ok_or_else(|| vec![DomainError::malformed("body", "must be a JSON object")])?;

        let mut fields = ENVELOPE_SCHEMA.validate(object)?;

        // An explicit "" account is kept apart from a missing one; they sign differently
        let account = fields.take_text("account").or_else(|| {
            object
                .get("account")
                .and_then(Value::as_str)
                .map(String::from)
        });

        Ok(Self {
            account,
            login: fields.take_text("login").unwrap_or_default(),
            method: fields.take_text("method").unwrap_or_default(),
            token: fields.take_text("token").unwrap_or_default(),
            arguments: fields.take_arguments("arguments").unwrap_or_default(),
        })
    }

    pub fn is_admin(&self, admin_login: &str) -> bool {
        self.login == admin_login
    }
}

/// Envelope plus its schema-typed arguments.
///
/// Built once per call after authentication, dropped after the response.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodRequest {
    pub account: Option<String>,
    pub login: String,
    pub token: String,
    pub arguments: MethodArgs,
    pub is_admin: bool,
}

impl MethodRequest {
    pub fn new(envelope: Envelope, arguments: MethodArgs, is_admin: bool) -> Self {
        Self {
            account: envelope.account,
            login: envelope.login,
            token: envelope.token,
            arguments,
            is_admin,
        }
    }
}
