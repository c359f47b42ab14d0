// Domain Layer - Field descriptors, schemas and request shapes

pub mod arguments;
pub mod envelope;
pub mod error;
pub mod field;
pub mod schema;

// Re-exports
pub use arguments::{ClientsInterestsArgs, Method, MethodArgs, OnlineScoreArgs};
pub use envelope::{Envelope, MethodRequest};
pub use error::DomainError;
pub use field::{Field, FieldKind, FieldValue, Gender};
pub use schema::{MethodArguments, Schema, ValidatedFields};
