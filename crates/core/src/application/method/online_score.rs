// online_score Use Case

use super::MethodOutcome;
use crate::application::context::Audit;
use crate::domain::OnlineScoreArgs;
use crate::error::Result;
use crate::port::Scoring;
use serde_json::json;

/// Execute online_score
///
/// # Arguments
///
/// * `scoring` - Scoring collaborator (skipped for the admin identity)
/// * `args` - Validated arguments
/// * `admin_score` - Sentinel score returned when `is_admin` is set
/// * `is_admin` - Caller authenticated as the admin login
pub fn execute(
    scoring: &dyn Scoring,
    args: &OnlineScoreArgs,
    admin_score: i64,
    is_admin: bool,
) -> Result<MethodOutcome> {
    let audit = Audit::Has(args.present_fields());

    if is_admin {
        return Ok(MethodOutcome {
            payload: json!({ "score": admin_score }),
            audit,
        });
    }

    let score = scoring.get_score(args)?;

    Ok(MethodOutcome {
        payload: json!({ "score": score }),
        audit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::port::scoring::mocks::MockScoring;

    fn args() -> OnlineScoreArgs {
        OnlineScoreArgs {
            email: Some("a@b".to_string()),
            phone: Some("79175002040".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_regular_caller_gets_collaborator_score() {
        let scoring = MockScoring::new_success(3.0);

        let outcome = execute(&scoring, &args(), 42, false).unwrap();

        assert_eq!(outcome.payload, json!({"score": 3.0}));
        assert_eq!(outcome.audit, Audit::Has(vec!["email", "phone"]));
        assert_eq!(scoring.score_calls(), 1);
    }

    #[test]
    fn test_admin_bypasses_collaborator() {
        let scoring = MockScoring::new_success(3.0);

        let outcome = execute(&scoring, &args(), 42, true).unwrap();

        assert_eq!(outcome.payload, json!({"score": 42}));
        assert_eq!(scoring.score_calls(), 0);
    }

    #[test]
    fn test_collaborator_failure_propagates() {
        let scoring = MockScoring::new_fail("backend down");

        let err = execute(&scoring, &args(), 42, false).unwrap_err();

        assert!(matches!(err, AppError::Scoring(_)));
        assert_eq!(err.status_code(), 500);
    }
}
