use std::sync::Arc;

use crate::prediction::SalaryPredictor;
use crate::scoring::ProjectScorer;
use crate::wizard::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionStore>,
    /// Backend behind `POST /api/evaluate-projects`. Always LLM-based in production.
    pub evaluator: Arc<dyn ProjectScorer>,
    /// Backend used by wizard submissions. Remote collaborator when `SCORING_URL` is set,
    /// otherwise the same LLM scorer as `evaluator`.
    pub scorer: Arc<dyn ProjectScorer>,
    pub predictor: Arc<dyn SalaryPredictor>,
}
