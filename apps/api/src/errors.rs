use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::pipeline::PipelineError;
use crate::prediction::PredictionError;
use crate::scoring::ScoringError;
use crate::wizard::validation::FieldErrors;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid fields: {0:?}")]
    InvalidFields(FieldErrors),

    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),

    #[error("Prediction error: {0}")]
    Prediction(PredictionError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<PredictionError> for AppError {
    fn from(e: PredictionError) -> Self {
        match e {
            // Caught before anything is sent: the user's input is at fault.
            PredictionError::InvalidFeature { .. } | PredictionError::MissingCommunication => {
                AppError::Validation(e.to_string())
            }
            other => AppError::Prediction(other),
        }
    }
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::Scoring(e) => AppError::Scoring(e),
            PipelineError::Features(e) => {
                AppError::InvalidFields(FieldErrors::from([(e.field(), e.to_string())]))
            }
            PipelineError::Prediction(e) => e.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidFields(fields) => {
                let body = Json(json!({
                    "error": {
                        "code": "VALIDATION_ERROR",
                        "message": "One or more fields are invalid",
                        "fields": fields
                    }
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::Scoring(e) => {
                tracing::error!("Scoring error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SCORING_ERROR",
                    "Project evaluation failed".to_string(),
                )
            }
            AppError::Prediction(e) => {
                tracing::error!("Error predicting salary: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PREDICTION_ERROR",
                    "Salary prediction failed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureError;
    use crate::scoring::ScoreParseError;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::InvalidFields(FieldErrors::from([("cgpa", "bad".to_string())])),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Scoring(ScoringError::Parse {
                    source: ScoreParseError::WrongCount(2),
                    reply: "[1, 2]".into(),
                }),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::Prediction(PredictionError::InvalidSalary("\"x\"".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::Internal(anyhow::anyhow!("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_pre_send_prediction_errors_are_validation() {
        let err: AppError = PredictionError::MissingCommunication.into();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_feature_errors_map_to_field() {
        let err: AppError = PipelineError::Features(FeatureError::Missing { field: "leetcode" }).into();
        match err {
            AppError::InvalidFields(fields) => {
                assert_eq!(fields["leetcode"], "leetcode is required")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
