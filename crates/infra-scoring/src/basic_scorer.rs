// Basic scoring collaborator
use scoring_core::domain::OnlineScoreArgs;
use scoring_core::port::scoring::{Scoring, ScoringError};
use tracing::trace;

/// Weight of a supplied phone
pub const PHONE_WEIGHT: f64 = 1.5;
/// Weight of a supplied email
pub const EMAIL_WEIGHT: f64 = 1.5;
/// Weight of birthday + gender together
pub const BIRTHDAY_GENDER_WEIGHT: f64 = 1.5;
/// Weight of first + last name together
pub const NAME_WEIGHT: f64 = 0.5;

/// Interests handed out to clients
pub const INTEREST_CATALOGUE: [&str; 11] = [
    "cars", "pets", "travel", "hi-tech", "sport", "music", "books", "tv", "cinema", "geek", "otus",
];

/// Stateless scorer: weighted field presence and catalogue interests.
///
/// Each client gets two distinct interests derived from its id, so
/// repeated calls agree.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicScorer;

impl BasicScorer {
    pub fn new() -> Self {
        Self
    }
}

impl Scoring for BasicScorer {
    fn get_score(&self, args: &OnlineScoreArgs) -> Result<f64, ScoringError> {
        let mut score = 0.0;
        if args.phone.is_some() {
            score += PHONE_WEIGHT;
        }
        if args.email.is_some() {
            score += EMAIL_WEIGHT;
        }
        if args.birthday.is_some() && args.gender.is_some() {
            score += BIRTHDAY_GENDER_WEIGHT;
        }
        if args.first_name.is_some() && args.last_name.is_some() {
            score += NAME_WEIGHT;
        }

        trace!(score, "Computed score");
        Ok(score)
    }

    fn get_interests(&self, client_id: u64) -> Result<Vec<String>, ScoringError> {
        let len = INTEREST_CATALOGUE.len() as u64;
        let first = client_id % len;
        let mut second = client_id.wrapping_mul(7).wrapping_add(3) % len;
        if second == first {
            second = (first + 1) % len;
        }

        let interests: Vec<String> = [first, second]
            .iter()
            .map(|&idx| INTEREST_CATALOGUE[idx as usize].to_string())
            .collect();

        trace!(client_id, ?interests, "Looked up interests");
        Ok(interests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoring_core::domain::Gender;

    #[test]
    fn test_score_weights() {
        let scorer = BasicScorer::new();

        let full = OnlineScoreArgs {
            first_name: Some("a".into()),
            last_name: Some("b".into()),
            email: Some("a@b".into()),
            phone: Some("79175002040".into()),
            birthday: Some("01.01.2000".into()),
            gender: Some(Gender::Male),
        };
        assert_eq!(scorer.get_score(&full).unwrap(), 5.0);

        let contacts = OnlineScoreArgs {
            email: Some("a@b".into()),
            phone: Some("79175002040".into()),
            ..Default::default()
        };
        assert_eq!(scorer.get_score(&contacts).unwrap(), 3.0);

        let names = OnlineScoreArgs {
            first_name: Some("a".into()),
            last_name: Some("b".into()),
            ..Default::default()
        };
        assert_eq!(scorer.get_score(&names).unwrap(), 0.5);
    }

    #[test]
    fn test_half_pair_adds_nothing() {
        let scorer = BasicScorer::new();
        let args = OnlineScoreArgs {
            first_name: Some("a".into()),
            birthday: Some("01.01.2000".into()),
            ..Default::default()
        };

        assert_eq!(scorer.get_score(&args).unwrap(), 0.0);
    }

    #[test]
    fn test_interests_are_two_distinct_catalogue_items() {
        let scorer = BasicScorer::new();

        for client_id in [0, 1, 2, 10, 11, 1234567, u64::MAX] {
            let interests = scorer.get_interests(client_id).unwrap();
            assert_eq!(interests.len(), 2);
            assert_ne!(interests[0], interests[1]);
            for interest in &interests {
                assert!(INTEREST_CATALOGUE.contains(&interest.as_str()));
            }
        }
    }

    #[test]
    fn test_interests_are_deterministic() {
        let scorer = BasicScorer::new();

        assert_eq!(
            scorer.get_interests(42).unwrap(),
            scorer.get_interests(42).unwrap()
        );
    }
}
