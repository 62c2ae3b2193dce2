//! Axum route handlers for the Wizard API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::pipeline::{run_prediction, SalaryPrediction};
use crate::state::AppState;
use crate::wizard::answers::{StepOneInput, StepThreeInput, StepTwoInput, WizardAnswers};
use crate::wizard::session::{WizardSession, WizardStep};
use crate::wizard::validation::{normalize_projects, validate_step_one, validate_step_two};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub session: WizardSession,
}

#[derive(Debug, Deserialize)]
pub struct SetStepRequest {
    pub step: WizardStep,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/wizard/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let session_id = Uuid::new_v4();
    let session = WizardSession::new();
    state.sessions.save(session_id, &session).await?;
    info!(%session_id, "wizard session started");
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id,
            session,
        }),
    ))
}

/// GET /api/v1/wizard/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = load_session(&state, session_id).await?;
    Ok(Json(SessionResponse {
        session_id,
        session,
    }))
}

/// DELETE /api/v1/wizard/sessions/:id
pub async fn handle_clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/wizard/sessions/:id/step
///
/// Steps are revisitable in any order; this only moves the cursor.
pub async fn handle_set_step(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SetStepRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut session = load_session(&state, session_id).await?;
    session.set_step(request.step);
    save_session(&state, session_id, session).await
}

/// POST /api/v1/wizard/sessions/:id/step-one
pub async fn handle_step_one(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(input): Json<StepOneInput>,
) -> Result<Json<SessionResponse>, AppError> {
    validate_step_one(&input).map_err(AppError::InvalidFields)?;
    advance(&state, session_id, WizardStep::One, input.into()).await
}

/// POST /api/v1/wizard/sessions/:id/step-two
pub async fn handle_step_two(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(input): Json<StepTwoInput>,
) -> Result<Json<SessionResponse>, AppError> {
    validate_step_two(&input).map_err(AppError::InvalidFields)?;
    advance(&state, session_id, WizardStep::Two, input.into()).await
}

/// POST /api/v1/wizard/sessions/:id/step-three
///
/// Scores the projects, predicts the salary and clears the session on success.
/// On failure the session keeps the submitted descriptions so the user can retry.
pub async fn handle_step_three(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(input): Json<StepThreeInput>,
) -> Result<Json<SalaryPrediction>, AppError> {
    let projects = normalize_projects(&input).map_err(AppError::InvalidFields)?;

    let mut session = load_session(&state, session_id).await?;
    let [project_1, project_2, project_3] = projects.clone();
    session.merge(WizardAnswers {
        project_1: Some(project_1),
        project_2: Some(project_2),
        project_3: Some(project_3),
        ..Default::default()
    });
    session.set_step(WizardStep::Three);
    state.sessions.save(session_id, &session).await?;

    let prediction = run_prediction(
        &session.answers,
        &projects,
        state.scorer.as_ref(),
        state.predictor.as_ref(),
    )
    .await?;

    session.clear();
    state.sessions.save(session_id, &session).await?;
    info!(%session_id, salary = prediction.salary, "wizard completed");

    Ok(Json(prediction))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn load_session(state: &AppState, session_id: Uuid) -> Result<WizardSession, AppError> {
    state
        .sessions
        .load(session_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))
}

async fn save_session(
    state: &AppState,
    session_id: Uuid,
    session: WizardSession,
) -> Result<Json<SessionResponse>, AppError> {
    state.sessions.save(session_id, &session).await?;
    Ok(Json(SessionResponse {
        session_id,
        session,
    }))
}

/// Merges a validated step and moves the cursor to the following step.
async fn advance(
    state: &AppState,
    session_id: Uuid,
    submitted: WizardStep,
    patch: WizardAnswers,
) -> Result<Json<SessionResponse>, AppError> {
    let mut session = load_session(state, session_id).await?;
    session.merge(patch);
    session.set_step(submitted.next().unwrap_or(submitted));
    save_session(state, session_id, session).await
}
