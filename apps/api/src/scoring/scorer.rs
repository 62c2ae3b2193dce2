//! Project Scorer: pluggable, trait-based backends producing a `ProjectScoreSet`.
//!
//! Default: `LlmProjectScorer` (prompt -> chat completion -> reply interpreter).
//! Alternative: `RemoteProjectScorer`, delegating to an external scoring
//! collaborator that speaks `{ projects } -> { scores }`.
//!
//! `AppState` holds an `Arc<dyn ProjectScorer>`, chosen at startup via `SCORING_URL`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::llm_client::{LlmClient, LlmError};
use crate::scoring::interpreter::interpret_reply;
use crate::scoring::prompts::build_scoring_prompt;
use crate::scoring::{ProjectScoreSet, ScoreParseError, PROJECT_COUNT};

/// Stand-in reply when the completion carries no text.
const EMPTY_REPLY: &str = "[]";

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("failed to parse evaluation scores: {source}")]
    Parse {
        source: ScoreParseError,
        reply: String,
    },

    #[error("scoring service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("scoring service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("scoring service returned a malformed body: {0}")]
    MalformedResponse(String),
}

impl ScoringError {
    /// True when the upstream answered but the answer was unusable.
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            ScoringError::Parse { .. } | ScoringError::MalformedResponse(_)
        )
    }
}

/// Implement this to swap scoring backends without touching handlers or the
/// submission pipeline.
#[async_trait]
pub trait ProjectScorer: Send + Sync {
    async fn score(
        &self,
        projects: &[String; PROJECT_COUNT],
    ) -> Result<ProjectScoreSet, ScoringError>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmProjectScorer
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmProjectScorer {
    llm: LlmClient,
}

impl LlmProjectScorer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ProjectScorer for LlmProjectScorer {
    async fn score(
        &self,
        projects: &[String; PROJECT_COUNT],
    ) -> Result<ProjectScoreSet, ScoringError> {
        let prompt = build_scoring_prompt(projects);
        let reply = match self.llm.complete(&prompt).await {
            Ok(reply) => reply,
            // A blank or null reply is an empty score list, not a transport failure.
            Err(LlmError::EmptyContent) => EMPTY_REPLY.to_string(),
            Err(e) => return Err(e.into()),
        };

        match interpret_reply(&reply) {
            Ok(scores) => {
                info!(model = self.llm.model(), scores = ?scores.as_array(), "projects scored");
                Ok(scores)
            }
            Err(source) => {
                error!("Parsing error: {source}; raw reply: {reply}");
                Err(ScoringError::Parse { source, reply })
            }
        }
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// RemoteProjectScorer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub projects: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub scores: Vec<f64>,
}

pub struct RemoteProjectScorer {
    client: Client,
    url: String,
}

impl RemoteProjectScorer {
    pub fn new(client: Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl ProjectScorer for RemoteProjectScorer {
    async fn score(
        &self,
        projects: &[String; PROJECT_COUNT],
    ) -> Result<ProjectScoreSet, ScoringError> {
        let response = self
            .client
            .post(&self.url)
            .json(&ScoreRequest {
                projects: projects.to_vec(),
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ScoringError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ScoreResponse = serde_json::from_str(&body)
            .map_err(|e| ScoringError::MalformedResponse(e.to_string()))?;

        ProjectScoreSet::try_from(parsed.scores).map_err(|source| ScoringError::Parse {
            source,
            reply: body,
        })
    }

    fn backend(&self) -> &'static str {
        "remote"
    }
}
