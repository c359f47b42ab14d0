// Scoring Infrastructure - Collaborator Adapters
// Implements: Scoring

pub mod basic_scorer;

pub use basic_scorer::BasicScorer;
