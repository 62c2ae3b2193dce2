//! Feature transformer: maps collected wizard answers plus project scores
//! into the fixed-order vector the salary model was trained on.
//!
//! Pure: no I/O, no logging. Every required numeric field must parse;
//! nothing is silently coerced to zero.

use std::num::IntErrorKind;

use serde::Serialize;
use thiserror::Error;

use crate::features::communication::communication_code;
use crate::scoring::ProjectScoreSet;
use crate::wizard::answers::WizardAnswers;

pub const FEATURE_COUNT: usize = 10;

/// Model column names, in vector order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Leetcode_completed",
    "Project_1_score",
    "Project_2_score",
    "Project_3_score",
    "Total_full_stack_projects",
    "Years_of_experience",
    "No_of_certifications",
    "CGPA",
    "Non_IT_student",
    "Communication_Level",
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be a number (got '{value}')")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} must be a whole, non-negative number (got '{value}')")]
    NotACount { field: &'static str, value: String },

    #[error("{field} is too large (got '{value}')")]
    TooLarge { field: &'static str, value: String },
}

impl FeatureError {
    /// The wizard field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            FeatureError::Missing { field }
            | FeatureError::NotANumber { field, .. }
            | FeatureError::NotACount { field, .. }
            | FeatureError::TooLarge { field, .. } => field,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// `(column name, value)` pairs in model order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

/// Builds the feature vector from the answers and the three project scores.
pub fn transform(
    answers: &WizardAnswers,
    scores: &ProjectScoreSet,
) -> Result<FeatureVector, FeatureError> {
    let leetcode = parse_count("leetcode", answers.leetcode.as_deref())?;
    let full_stack = parse_count("full_stack_projects", answers.full_stack_projects.as_deref())?;
    let experience = parse_decimal("experience", answers.experience.as_deref())?;
    let certifications = parse_count("certifications", answers.certifications.as_deref())?;
    let cgpa = parse_decimal("cgpa", answers.cgpa.as_deref())?;
    let [p1, p2, p3] = *scores.as_array();

    Ok(FeatureVector([
        f64::from(leetcode),
        p1,
        p2,
        p3,
        f64::from(full_stack),
        experience,
        f64::from(certifications),
        cgpa,
        non_it_flag(answers.non_it_student.as_deref()),
        f64::from(communication_code(answers.communication.as_deref())),
    ]))
}

/// 1.0 for "yes" in any casing; everything else, including absence, is 0.0.
pub fn non_it_flag(value: Option<&str>) -> f64 {
    match value {
        Some(v) if v.trim().eq_ignore_ascii_case("yes") => 1.0,
        _ => 0.0,
    }
}

/// Parses a non-negative whole-number answer such as a certification count.
pub fn parse_count(field: &'static str, value: Option<&str>) -> Result<u32, FeatureError> {
    let raw = required(field, value)?;
    raw.parse::<u32>().map_err(|e| {
        // Distinguish "3.5" / "-1" from "abc" so the inline message is accurate.
        if *e.kind() == IntErrorKind::PosOverflow {
            FeatureError::TooLarge {
                field,
                value: raw.to_string(),
            }
        } else if raw.parse::<f64>().is_ok_and(f64::is_finite) {
            FeatureError::NotACount {
                field,
                value: raw.to_string(),
            }
        } else {
            FeatureError::NotANumber {
                field,
                value: raw.to_string(),
            }
        }
    })
}

/// Parses a finite decimal answer such as CGPA or years of experience.
pub fn parse_decimal(field: &'static str, value: Option<&str>) -> Result<f64, FeatureError> {
    let raw = required(field, value)?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FeatureError::NotANumber {
            field,
            value: raw.to_string(),
        }),
    }
}

fn required<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, FeatureError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(FeatureError::Missing { field }),
    }
}
