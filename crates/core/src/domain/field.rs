//! Field Descriptors
//!
//! A [`Field`] is a named, self-validating rule: a primitive kind, a
//! `required` flag (the key must be present) and a `nullable` flag (the value
//! may be empty). Descriptors are plain `const` values so schemas can be
//! declared as static tables.

use super::error::{DomainError, Result};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// Phone numbers are exactly 11 digits
pub const PHONE_LENGTH: usize = 11;

/// Phone numbers start with this digit
pub const PHONE_PREFIX: char = '7';

/// Integer form of the phone range (70000000000..=79999999999)
const PHONE_MIN: u64 = 70_000_000_000;
const PHONE_MAX: u64 = 79_999_999_999;

/// DD.MM.YYYY, syntactic only (31.02.2000 passes)
const DATE_PATTERN: &str = r"^[0-9]{2}\.[0-9]{2}\.[0-9]{4}$";

fn date_regex() -> &'static Regex {
    static DATE_REGEX: OnceLock<Regex> = OnceLock::new();
    DATE_REGEX.get_or_init(|| Regex::new(DATE_PATTERN).expect("valid regex"))
}

/// Gender enum (wire codes 0/1/2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Unknown,
    Male,
    Female,
}

impl Gender {
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(Gender::Unknown),
            1 => Some(Gender::Male),
            2 => Some(Gender::Female),
            _ => None,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Unknown => write!(f, "unknown"),
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// Primitive kind of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text
    Char,
    /// Text containing '@'
    Email,
    /// 11 digits starting with 7, string or integer
    Phone,
    /// DD.MM.YYYY
    Date,
    /// 0/1/2
    Gender,
    /// Ordered list of non-negative integers
    ClientIds,
    /// Opaque JSON object
    Arguments,
}

/// A validated, canonicalized field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Char, Email, Date and Phone (canonical 11-character form)
    Text(String),
    Gender(Gender),
    ClientIds(Vec<u64>),
    Arguments(Map<String, Value>),
}

impl FieldValue {
    pub fn into_text(self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_gender(self) -> Option<Gender> {
        match self {
            FieldValue::Gender(g) => Some(g),
            _ => None,
        }
    }

    pub fn into_client_ids(self) -> Option<Vec<u64>> {
        match self {
            FieldValue::ClientIds(ids) => Some(ids),
            _ => None,
        }
    }

    pub fn into_arguments(self) -> Option<Map<String, Value>> {
        match self {
            FieldValue::Arguments(map) => Some(map),
            _ => None,
        }
    }
}

/// Field descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub nullable: bool,
}

impl Field {
    /// Optional, non-nullable field of the given kind
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            nullable: false,
        }
    }

    /// The key must be present in the input mapping
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// An empty value ("", [], {}) is accepted as "not set"
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Validate a raw JSON value (`None` when the key is absent).
    ///
    /// Returns `Ok(None)` for an accepted absent/empty value. JSON `null`
    /// counts as absent. Only an empty value of the kind's own JSON type is
    /// empty; `[]` for a string field or `""` for `arguments` is malformed.
    pub fn validate(&self, raw: Option<&Value>) -> Result<Option<FieldValue>> {
        let raw = match raw {
            None | Some(Value::Null) => {
                return if self.required {
                    Err(DomainError::MissingField { field: self.name })
                } else {
                    Ok(None)
                };
            }
            Some(value) => value,
        };

        if self.is_empty(raw) {
            return if self.nullable {
                Ok(None)
            } else {
                Err(DomainError::MissingField { field: self.name })
            };
        }

        self.parse(raw).map(Some)
    }

    fn parse(&self, raw: &Value) -> Result<FieldValue> {
        match self.kind {
            FieldKind::Char => self.text(raw).map(|s| FieldValue::Text(s.to_string())),
            FieldKind::Email => {
                let s = self.text(raw)?;
                if !s.contains('@') {
                    return Err(DomainError::malformed(self.name, "must contain '@'"));
                }
                Ok(FieldValue::Text(s.to_string()))
            }
            FieldKind::Phone => self.phone(raw).map(FieldValue::Text),
            FieldKind::Date => {
                let s = self.text(raw)?;
                if !date_regex().is_match(s) {
                    return Err(DomainError::malformed(self.name, "must be DD.MM.YYYY"));
                }
                Ok(FieldValue::Text(s.to_string()))
            }
            FieldKind::Gender => raw
                .as_u64()
                .and_then(Gender::from_code)
                .map(FieldValue::Gender)
                .ok_or_else(|| DomainError::malformed(self.name, "must be one of 0, 1, 2")),
            FieldKind::ClientIds => {
                let items = raw.as_array().ok_or_else(|| {
                    DomainError::malformed(self.name, "must be a list of integers")
                })?;
                items
                    .iter()
                    .map(|item| {
                        item.as_u64().ok_or_else(|| {
                            DomainError::malformed(self.name, "must contain non-negative integers")
                        })
                    })
                    .collect::<Result<Vec<u64>>>()
                    .map(FieldValue::ClientIds)
            }
            FieldKind::Arguments => raw
                .as_object()
                .cloned()
                .map(FieldValue::Arguments)
                .ok_or_else(|| DomainError::malformed(self.name, "must be an object")),
        }
    }

    fn is_empty(&self, raw: &Value) -> bool {
        match (self.kind, raw) {
            (
                FieldKind::Char | FieldKind::Email | FieldKind::Phone | FieldKind::Date,
                Value::String(s),
            ) => s.is_empty(),
            (FieldKind::ClientIds, Value::Array(items)) => items.is_empty(),
            (FieldKind::Arguments, Value::Object(map)) => map.is_empty(),
            _ => false,
        }
    }

    fn text<'a>(&self, raw: &'a Value) -> Result<&'a str> {
        raw.as_str()
            .ok_or_else(|| DomainError::malformed(self.name, "must be a string"))
    }

    /// Canonical form is the 11-character digit string
    fn phone(&self, raw: &Value) -> Result<String> {
        match raw {
            Value::String(s) => {
                let valid = s.len() == PHONE_LENGTH
                    && s.starts_with(PHONE_PREFIX)
                    && s.chars().all(|c| c.is_ascii_digit());
                if valid {
                    Ok(s.clone())
                } else {
                    Err(DomainError::malformed(
                        self.name,
                        "must be 11 digits starting with 7",
                    ))
                }
            }
            Value::Number(n) => match n.as_u64() {
                Some(v) if (PHONE_MIN..=PHONE_MAX).contains(&v) => Ok(v.to_string()),
                _ => Err(DomainError::malformed(
                    self.name,
                    "must be 11 digits starting with 7",
                )),
            },
            _ => Err(DomainError::malformed(
                self.name,
                "must be a string or an integer",
            )),
        }
    }
}
