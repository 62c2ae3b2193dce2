//! Submission pipeline: score the projects, then predict the salary.
//!
//! Two fallible stages run strictly in order: the prediction request is built
//! from the validated scores, so a scoring failure returns before the
//! prediction service is ever contacted.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::features::{transform, FeatureError};
use crate::prediction::{PredictionError, PredictionRequest, SalaryPredictor};
use crate::scoring::{ProjectScoreSet, ProjectScorer, ScoringError, PROJECT_COUNT};
use crate::wizard::answers::WizardAnswers;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Features(#[from] FeatureError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

#[derive(Debug, Clone, Serialize)]
pub struct SalaryPrediction {
    pub salary: f64,
    pub scores: ProjectScoreSet,
    /// Where the front-end should navigate to display the result.
    pub result_path: String,
}

pub async fn run_prediction(
    answers: &WizardAnswers,
    projects: &[String; PROJECT_COUNT],
    scorer: &dyn ProjectScorer,
    predictor: &dyn SalaryPredictor,
) -> Result<SalaryPrediction, PipelineError> {
    let scores = scorer.score(projects).await.map_err(|e| {
        warn!(backend = scorer.backend(), "project scoring failed: {e}");
        e
    })?;

    let vector = transform(answers, &scores)?;
    debug!(features = ?vector.named().collect::<Vec<_>>(), "feature vector assembled");
    let request = PredictionRequest::new(&vector, answers.communication.as_deref())?;
    let salary = predictor.predict(&request).await?;

    info!(salary, scores = ?scores.as_array(), "salary predicted");

    Ok(SalaryPrediction {
        salary,
        scores,
        result_path: format!("/result?salary={salary}"),
    })
}
