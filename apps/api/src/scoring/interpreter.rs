//! Reply interpreter: turns an unstructured LLM reply into a `ProjectScoreSet`.
//!
//! Two stages, then a hard validation gate:
//! 1. Structured: first bracketed literal `[...]`, parsed as a JSON array.
//!    A bracket that does not parse fails outright; there is no fallback.
//! 2. Heuristic: only when no bracket exists, the first three digit runs.
//!
//! Nothing is clamped or truncated into success.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::scoring::{ProjectScoreSet, ScoreParseError, PROJECT_COUNT};

static ARRAY_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[.*?\]").expect("array literal regex is valid"));
static DIGIT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("digit run regex is valid"));

/// Which stage produced the raw numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePath {
    ArrayLiteral,
    DigitScan,
}

pub fn interpret_reply(text: &str) -> Result<ProjectScoreSet, ScoreParseError> {
    let (raw, path) = extract_numbers(text)?;
    debug!(?path, ?raw, "extracted project scores");
    ProjectScoreSet::try_from(raw)
}

fn extract_numbers(text: &str) -> Result<(Vec<f64>, ParsePath), ScoreParseError> {
    if let Some(literal) = ARRAY_LITERAL.find(text) {
        let values: Vec<Value> = serde_json::from_str(literal.as_str())
            .map_err(|_| ScoreParseError::MalformedArray(literal.as_str().to_string()))?;
        let numbers = values
            .iter()
            .map(|v| {
                v.as_f64()
                    .ok_or_else(|| ScoreParseError::NotANumber(v.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        return Ok((numbers, ParsePath::ArrayLiteral));
    }

    let numbers = DIGIT_RUN
        .find_iter(text)
        .take(PROJECT_COUNT)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect();
    Ok((numbers, ParsePath::DigitScan))
}
