// Scoring Port
// Abstraction over the external score / interests computation

use crate::domain::OnlineScoreArgs;
use thiserror::Error;

/// Scoring collaborator errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("Scoring backend unavailable: {0}")]
    Unavailable(String),

    #[error("Scoring failed: {0}")]
    Failed(String),
}

/// Scoring collaborator
///
/// Calls are synchronous and must not keep state between requests.
///
/// Implementations:
/// - BasicScorer (infra-scoring): weighted field score, catalogue interests
pub trait Scoring: Send + Sync {
    /// Compute a score from the validated online_score fields
    fn get_score(&self, args: &OnlineScoreArgs) -> Result<f64, ScoringError>;

    /// Look up the interests of a single client
    fn get_interests(&self, client_id: u64) -> Result<Vec<String>, ScoringError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock scoring behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Fixed score, interests tagged with the client id
        Success(f64),
        /// Always fail with message
        Fail(String),
        /// Panic with message (for panic isolation testing)
        Panic(String),
    }

    /// Mock Scoring collaborator for testing
    pub struct MockScoring {
        behavior: Arc<Mutex<MockBehavior>>,
        score_calls: Arc<Mutex<usize>>,
        interest_calls: Arc<Mutex<Vec<u64>>>,
    }

    impl MockScoring {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                score_calls: Arc::new(Mutex::new(0)),
                interest_calls: Arc::new(Mutex::new(Vec::new())),
            }
        }
        pub fn new_success(score: f64) -> Self {
            Self::new(MockBehavior::Success(score))
        }
        pub fn new_fail(message: impl Into<String>) -> Self {
            Self::new(MockBehavior::Fail(message.into()))
        }
        pub fn new_panic_inducing(message: impl Into<String>) -> Self {
            Self::new(MockBehavior::Panic(message.into()))
        }
        pub fn score_calls(&self) -> usize {
            *self.score_calls.lock().unwrap()
        }
        /// Client ids passed to get_interests, in call order
        pub fn interest_calls(&self) -> Vec<u64> {
            self.interest_calls.lock().unwrap().clone()
        }
    }

    impl Scoring for MockScoring {
        fn get_score(&self, _args: &OnlineScoreArgs) -> Result<f64, ScoringError> {
            *self.score_calls.lock().unwrap() += 1;

            let behavior = self.behavior.lock().unwrap().clone();
            match behavior {
                MockBehavior::Success(score) => Ok(score),
                MockBehavior::Fail(msg) => Err(ScoringError::Failed(msg)),
                MockBehavior::Panic(msg) => {
                    panic!("{}", msg); // Actually panic for panic isolation testing
                }
            }
        }

        fn get_interests(&self, client_id: u64) -> Result<Vec<String>, ScoringError> {
            self.interest_calls.lock().unwrap().push(client_id);

            let behavior = self.behavior.lock().unwrap().clone();
            match behavior {
                MockBehavior::Success(_) => Ok(vec![format!("interest-{}", client_id)]),
                MockBehavior::Fail(msg) => Err(ScoringError::Unavailable(msg)),
                MockBehavior::Panic(msg) => {
                    panic!("{}", msg);
                }
            }
        }
    }
}
