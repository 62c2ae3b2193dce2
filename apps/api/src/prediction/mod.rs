//! Prediction client: sends the finished feature payload to the external
//! salary model and extracts the numeric `salary` from its reply.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use crate::features::FeatureVector;

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("invalid number for {name}: {value}")]
    InvalidFeature { name: &'static str, value: f64 },

    #[error("communication level is required")]
    MissingCommunication,

    #[error("prediction service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("prediction service returned non-JSON response (status {status}): {body}")]
    NonJson { status: u16, body: String },

    #[error("prediction service returned unparseable JSON: {0}")]
    MalformedJson(String),

    #[error("prediction service error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("invalid salary value received: {0}")]
    InvalidSalary(String),
}

/// Wire payload for the prediction service: nine numeric features in vector
/// order, then the communication level as a lowercase label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub feature1: f64,
    pub feature2: f64,
    pub feature3: f64,
    pub feature4: f64,
    pub feature5: f64,
    pub feature6: f64,
    pub feature7: f64,
    pub feature8: f64,
    pub feature9: f64,
    pub feature10: String,
}

impl PredictionRequest {
    /// Validates and builds the payload. Rejects non-finite numbers and an
    /// empty communication label before anything is sent.
    pub fn new(vector: &FeatureVector, communication: Option<&str>) -> Result<Self, PredictionError> {
        const NAMES: [&str; 9] = [
            "feature1", "feature2", "feature3", "feature4", "feature5", "feature6", "feature7",
            "feature8", "feature9",
        ];

        let values = vector.as_array();
        for (name, value) in NAMES.iter().zip(values.iter()) {
            if !value.is_finite() {
                return Err(PredictionError::InvalidFeature {
                    name: *name,
                    value: *value,
                });
            }
        }

        let feature10 = communication.unwrap_or_default().trim().to_lowercase();
        if feature10.is_empty() {
            return Err(PredictionError::MissingCommunication);
        }

        Ok(Self {
            feature1: values[0],
            feature2: values[1],
            feature3: values[2],
            feature4: values[3],
            feature5: values[4],
            feature6: values[5],
            feature7: values[6],
            feature8: values[7],
            feature9: values[8],
            feature10,
        })
    }
}

#[async_trait]
pub trait SalaryPredictor: Send + Sync {
    async fn predict(&self, request: &PredictionRequest) -> Result<f64, PredictionError>;
}

pub struct HttpSalaryPredictor {
    client: Client,
    url: String,
}

impl HttpSalaryPredictor {
    pub fn new(client: Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl SalaryPredictor for HttpSalaryPredictor {
    async fn predict(&self, request: &PredictionRequest) -> Result<f64, PredictionError> {
        debug!(?request, "sending features to prediction service");

        let response = self
            .client
            .post(&self.url)
            .header(header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));

        let body = response.text().await?;
        if !is_json {
            return Err(PredictionError::NonJson {
                status: status.as_u16(),
                body,
            });
        }

        let data: Value = serde_json::from_str(&body)
            .map_err(|e| PredictionError::MalformedJson(e.to_string()))?;

        if !status.is_success() {
            error!("Server error response: {data}");
            let message = data
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("Failed to predict salary")
                .to_string();
            return Err(PredictionError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        match data.get("salary") {
            Some(salary) => salary
                .as_f64()
                .ok_or_else(|| PredictionError::InvalidSalary(salary.to_string())),
            None => Err(PredictionError::InvalidSalary("missing".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::transform;
    use crate::scoring::ProjectScoreSet;
    use crate::test_support::spawn_stub;
    use crate::wizard::answers::WizardAnswers;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::json;

    fn sample_request() -> PredictionRequest {
        let answers = WizardAnswers {
            experience: Some("2.0".into()),
            certifications: Some("8".into()),
            cgpa: Some("9.95".into()),
            non_it_student: Some("No".into()),
            leetcode: Some("354".into()),
            full_stack_projects: Some("10".into()),
            communication: Some("Fluent".into()),
            ..Default::default()
        };
        let scores = ProjectScoreSet::try_from(vec![7.0, 8.0, 6.0]).unwrap();
        let vector = transform(&answers, &scores).unwrap();
        PredictionRequest::new(&vector, answers.communication.as_deref()).unwrap()
    }

    async fn predictor_for(router: Router) -> HttpSalaryPredictor {
        let base = spawn_stub(router).await;
        HttpSalaryPredictor::new(Client::new(), format!("{base}/api/predict/"))
    }

    #[test]
    fn test_request_carries_lowercase_communication() {
        let request = sample_request();
        assert_eq!(request.feature1, 354.0);
        assert_eq!(request.feature8, 9.95);
        assert_eq!(request.feature9, 0.0);
        assert_eq!(request.feature10, "fluent");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 10);
    }

    #[test]
    fn test_request_requires_communication() {
        let answers = WizardAnswers {
            experience: Some("1.0".into()),
            certifications: Some("2".into()),
            cgpa: Some("8.0".into()),
            leetcode: Some("50".into()),
            full_stack_projects: Some("1".into()),
            ..Default::default()
        };
        let scores = ProjectScoreSet::try_from(vec![5.0, 5.0, 5.0]).unwrap();
        let vector = transform(&answers, &scores).unwrap();

        assert!(matches!(
            PredictionRequest::new(&vector, Some("  ")),
            Err(PredictionError::MissingCommunication)
        ));
        assert!(matches!(
            PredictionRequest::new(&vector, None),
            Err(PredictionError::MissingCommunication)
        ));
    }

    #[tokio::test]
    async fn test_predict_returns_salary() {
        let router = Router::new().route(
            "/api/predict/",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["feature10"], "fluent");
                Json(json!({ "salary": 1234567.0 }))
            }),
        );
        let predictor = predictor_for(router).await;
        let salary = predictor.predict(&sample_request()).await.unwrap();
        assert_eq!(salary, 1234567.0);
    }

    #[tokio::test]
    async fn test_non_json_body_is_distinct_failure() {
        let router = Router::new().route(
            "/api/predict/",
            post(|| async { "<html>Server Error</html>" }),
        );
        let predictor = predictor_for(router).await;
        let err = predictor.predict(&sample_request()).await.unwrap_err();
        match err {
            PredictionError::NonJson { status, body } => {
                assert_eq!(status, 200);
                assert!(body.contains("Server Error"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_2xx_non_json_body_is_non_json_failure() {
        let router = Router::new().route(
            "/api/predict/",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream unavailable") }),
        );
        let predictor = predictor_for(router).await;
        let err = predictor.predict(&sample_request()).await.unwrap_err();
        match err {
            PredictionError::NonJson { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "upstream unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_json_content_type_with_unparseable_body_is_malformed() {
        let router = Router::new().route(
            "/api/predict/",
            post(|| async {
                (
                    [(axum::http::header::CONTENT_TYPE, "application/json")],
                    "{\"salary\": 12",
                )
            }),
        );
        let predictor = predictor_for(router).await;
        let err = predictor.predict(&sample_request()).await.unwrap_err();
        assert!(matches!(err, PredictionError::MalformedJson(_)));
    }

    #[tokio::test]
    async fn test_json_error_payload_surfaces_message() {
        let router = Router::new().route(
            "/api/predict/",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "feature3 missing" })),
                )
            }),
        );
        let predictor = predictor_for(router).await;
        let err = predictor.predict(&sample_request()).await.unwrap_err();
        match err {
            PredictionError::Upstream { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "feature3 missing");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_json_error_without_message_uses_default() {
        let router = Router::new().route(
            "/api/predict/",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))) }),
        );
        let predictor = predictor_for(router).await;
        let err = predictor.predict(&sample_request()).await.unwrap_err();
        assert!(
            matches!(err, PredictionError::Upstream { ref message, .. } if message == "Failed to predict salary")
        );
    }

    #[tokio::test]
    async fn test_non_numeric_salary_fails() {
        let router = Router::new().route(
            "/api/predict/",
            post(|| async { Json(json!({ "salary": "lots" })) }),
        );
        let predictor = predictor_for(router).await;
        let err = predictor.predict(&sample_request()).await.unwrap_err();
        assert!(matches!(err, PredictionError::InvalidSalary(_)));
    }
}
