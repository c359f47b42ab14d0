// Schema: a static table of field descriptors

use super::error::DomainError;
use super::field::{Field, FieldValue, Gender};
use serde_json::{Map, Value};
use tracing::debug;

/// Named grouping of field descriptors
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Schema {
    pub const fn new(name: &'static str, fields: &'static [Field]) -> Self {
        Self { name, fields }
    }

    /// Validate every declared field against the input mapping.
    ///
    /// All field errors are collected, not just the first one.
    /// Keys not declared by the schema are ignored.
    pub fn validate(&self, input: &Map<String, Value>) -> Result<ValidatedFields, Vec<DomainError>> {
        let mut values = Vec::with_capacity(self.fields.len());
        let mut errors = Vec::new();

        for field in self.fields {
            match field.validate(input.get(field.name)) {
                Ok(Some(value)) => values.push((field.name, value)),
                Ok(None) => {}
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() {
            Ok(ValidatedFields { values })
        } else {
            debug!(schema = self.name, errors = errors.len(), "Validation failed");
            Err(errors)
        }
    }
}

/// Non-empty validated values, in schema declaration order
#[derive(Debug, Clone, Default)]
pub struct ValidatedFields {
    values: Vec<(&'static str, FieldValue)>,
}

impl ValidatedFields {
    /// Names of the fields that carried a non-empty value
    pub fn present(&self) -> Vec<&'static str> {
        self.values.iter().map(|(name, _)| *name).collect()
    }

    pub fn take(&mut self, name: &str) -> Option<FieldValue> {
        let idx = self.values.iter().position(|(n, _)| *n == name)?;
        Some(self.values.remove(idx).1)
    }

    pub fn take_text(&mut self, name: &str) -> Option<String> {
        self.take(name).and_then(FieldValue::into_text)
    }

    pub fn take_gender(&mut self, name: &str) -> Option<Gender> {
        self.take(name).and_then(FieldValue::into_gender)
    }

    pub fn take_client_ids(&mut self, name: &str) -> Option<Vec<u64>> {
        self.take(name).and_then(FieldValue::into_client_ids)
    }

    pub fn take_arguments(&mut self, name: &str) -> Option<Map<String, Value>> {
        self.take(name).and_then(FieldValue::into_arguments)
    }
}

/// Capability shared by every method's argument set
pub trait MethodArguments: Sized {
    /// Field table for this argument set
    fn schema() -> &'static Schema;

    /// Build the typed arguments and apply cross-field rules
    fn from_fields(fields: ValidatedFields) -> Result<Self, Vec<DomainError>>;

    fn validate(arguments: &Map<String, Value>) -> Result<Self, Vec<DomainError>> {
        let fields = Self::schema().validate(arguments)?;
        Self::from_fields(fields)
    }
}
