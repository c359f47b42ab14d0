// Port Layer - Interfaces for external dependencies

pub mod id_provider; // For deterministic testing
pub mod scoring;
pub mod time_provider;

// Re-exports
pub use id_provider::IdProvider;
pub use scoring::{Scoring, ScoringError};
pub use time_provider::TimeProvider;
