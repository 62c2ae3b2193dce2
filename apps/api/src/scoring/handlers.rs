//! `POST /api/evaluate-projects`: the scoring endpoint other clients call.
//!
//! Error bodies use a flat `{ "message": ... }` shape rather than `AppError`'s
//! envelope, matching what scoring clients already parse.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::scoring::PROJECT_COUNT;
use crate::state::AppState;

pub async fn handle_evaluate_projects(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let projects = match &payload {
        Ok(Json(body)) => parse_projects(body),
        Err(rejection) => {
            warn!("Rejected evaluate-projects body: {rejection}");
            None
        }
    };
    let Some(projects) = projects else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Invalid input" })),
        );
    };

    match state.evaluator.score(&projects).await {
        Ok(scores) => (
            StatusCode::OK,
            Json(json!({ "scores": scores.as_array() })),
        ),
        Err(e) if e.is_parse_failure() => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Failed to parse evaluation scores" })),
        ),
        Err(e) => {
            error!("Project evaluation failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "OpenAI failed to evaluate" })),
            )
        }
    }
}

/// `projects` must be an array of exactly three strings.
fn parse_projects(body: &Value) -> Option<[String; PROJECT_COUNT]> {
    let items = body.get("projects")?.as_array()?;
    let texts = items
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()?;
    texts.try_into().ok()
}
