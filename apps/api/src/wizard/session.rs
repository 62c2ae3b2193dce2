use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wizard::answers::WizardAnswers;

/// One page of the wizard. Serialized as its 1-based index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WizardStep {
    /// Basic info
    #[default]
    One,
    /// Technical details
    Two,
    /// Projects
    Three,
}

impl WizardStep {
    pub fn index(self) -> u8 {
        match self {
            WizardStep::One => 1,
            WizardStep::Two => 2,
            WizardStep::Three => 3,
        }
    }

    /// The step that follows a successful submission of this one.
    /// Step three has no successor; the session is cleared instead.
    pub fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::One => Some(WizardStep::Two),
            WizardStep::Two => Some(WizardStep::Three),
            WizardStep::Three => None,
        }
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(WizardStep::One),
            2 => Ok(WizardStep::Two),
            3 => Ok(WizardStep::Three),
            other => Err(format!("step must be 1, 2 or 3 (got {other})")),
        }
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.index()
    }
}

/// Session-scoped wizard state passed through the step sequence.
///
/// Steps are revisitable: navigating backwards and resubmitting is allowed,
/// so nothing here enforces forward-only progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardSession {
    pub answers: WizardAnswers,
    pub current_step: WizardStep,
    pub updated_at: DateTime<Utc>,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSession {
    pub fn new() -> Self {
        Self {
            answers: WizardAnswers::default(),
            current_step: WizardStep::One,
            updated_at: Utc::now(),
        }
    }

    pub fn merge(&mut self, patch: WizardAnswers) {
        self.answers.merge(patch);
        self.touch();
    }

    pub fn set_step(&mut self, step: WizardStep) {
        self.current_step = step;
        self.touch();
    }

    /// Back to a fresh wizard: empty answers, step one.
    pub fn clear(&mut self) {
        self.answers = WizardAnswers::default();
        self.current_step = WizardStep::One;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_empty_at_step_one() {
        let session = WizardSession::new();
        assert_eq!(session.current_step, WizardStep::One);
        assert_eq!(session.answers, WizardAnswers::default());
    }

    #[test]
    fn test_clear_resets_answers_and_step() {
        let mut session = WizardSession::new();
        session.merge(WizardAnswers {
            leetcode: Some("354".into()),
            ..Default::default()
        });
        session.set_step(WizardStep::Three);

        session.clear();

        assert_eq!(session.current_step, WizardStep::One);
        assert!(session.answers.leetcode.is_none());
    }

    #[test]
    fn test_step_serializes_as_index() {
        let json = serde_json::to_string(&WizardStep::Two).unwrap();
        assert_eq!(json, "2");
        let step: WizardStep = serde_json::from_str("3").unwrap();
        assert_eq!(step, WizardStep::Three);
    }

    #[test]
    fn test_step_rejects_out_of_range_index() {
        assert!(serde_json::from_str::<WizardStep>("0").is_err());
        assert!(serde_json::from_str::<WizardStep>("4").is_err());
    }

    #[test]
    fn test_step_sequence() {
        assert_eq!(WizardStep::One.next(), Some(WizardStep::Two));
        assert_eq!(WizardStep::Two.next(), Some(WizardStep::Three));
        assert_eq!(WizardStep::Three.next(), None);
    }
}
