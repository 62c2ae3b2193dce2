// Project scoring: free-text project descriptions -> three 1-10 scores.
// All LLM calls go through llm_client; this module owns the prompt, the
// reply interpreter and the validation gate every score set passes through.

pub mod handlers;
pub mod interpreter;
pub mod prompts;
pub mod scorer;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use scorer::{LlmProjectScorer, ProjectScorer, RemoteProjectScorer, ScoringError};

pub const PROJECT_COUNT: usize = 3;
pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;

/// Why a reply could not be turned into a score set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreParseError {
    #[error("bracketed literal is not a JSON array: {0}")]
    MalformedArray(String),

    #[error("score {0} is not a number")]
    NotANumber(String),

    #[error("expected exactly three scores, found {0}")]
    WrongCount(usize),

    #[error("score {0} is outside [1, 10]")]
    OutOfRange(f64),
}

/// Exactly three scores, each within [1, 10]. Only constructible through
/// `TryFrom`, so holding one means validation passed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct ProjectScoreSet([f64; PROJECT_COUNT]);

impl ProjectScoreSet {
    pub fn as_array(&self) -> &[f64; PROJECT_COUNT] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for ProjectScoreSet {
    type Error = ScoreParseError;

    fn try_from(scores: Vec<f64>) -> Result<Self, Self::Error> {
        let scores: [f64; PROJECT_COUNT] = scores
            .try_into()
            .map_err(|v: Vec<f64>| ScoreParseError::WrongCount(v.len()))?;

        if let Some(bad) = scores
            .iter()
            .copied()
            .find(|s| !(MIN_SCORE..=MAX_SCORE).contains(s))
        {
            return Err(ScoreParseError::OutOfRange(bad));
        }

        Ok(Self(scores))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_bounds() {
        let set = ProjectScoreSet::try_from(vec![1.0, 10.0, 5.5]).unwrap();
        assert_eq!(set.as_array(), &[1.0, 10.0, 5.5]);
    }

    #[test]
    fn test_rejects_wrong_count() {
        assert_eq!(
            ProjectScoreSet::try_from(vec![7.0, 8.0]),
            Err(ScoreParseError::WrongCount(2))
        );
        assert_eq!(
            ProjectScoreSet::try_from(vec![7.0, 8.0, 6.0, 5.0]),
            Err(ScoreParseError::WrongCount(4))
        );
    }

    #[test]
    fn test_rejects_out_of_range_without_clamping() {
        assert_eq!(
            ProjectScoreSet::try_from(vec![0.0, 8.0, 6.0]),
            Err(ScoreParseError::OutOfRange(0.0))
        );
        assert_eq!(
            ProjectScoreSet::try_from(vec![7.0, 8.0, 10.5]),
            Err(ScoreParseError::OutOfRange(10.5))
        );
        assert_eq!(
            ScoreParseError::OutOfRange(0.0).to_string(),
            "score 0 is outside [1, 10]"
        );
    }

    #[test]
    fn test_deserialize_runs_validation() {
        let ok: ProjectScoreSet = serde_json::from_str("[7, 8, 6]").unwrap();
        assert_eq!(ok.as_array(), &[7.0, 8.0, 6.0]);
        assert!(serde_json::from_str::<ProjectScoreSet>("[7, 8, 60]").is_err());
        assert!(serde_json::from_str::<ProjectScoreSet>("[7, 8]").is_err());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let set = ProjectScoreSet::try_from(vec![7.0, 8.0, 6.0]).unwrap();
        assert_eq!(serde_json::to_string(&set).unwrap(), "[7.0,8.0,6.0]");
    }
}
