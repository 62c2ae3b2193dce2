//! Per-step input validation. Each step reports every bad field at once so
//! the form can show all inline messages in one round trip.
//!
//! Numeric checks reuse the transformer's parsers, so anything accepted here
//! is accepted again at transformation time.

use std::collections::BTreeMap;

use crate::features::transformer::{parse_count, parse_decimal, FeatureError};
use crate::scoring::PROJECT_COUNT;
use crate::wizard::answers::{StepOneInput, StepThreeInput, StepTwoInput};

/// Minimum length, in characters, of a project description.
pub const MIN_PROJECT_DESCRIPTION_CHARS: usize = 250;

/// Field name -> inline error message.
pub type FieldErrors = BTreeMap<&'static str, String>;

pub fn validate_step_one(input: &StepOneInput) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    record(
        &mut errors,
        parse_decimal("experience", input.experience.as_deref()),
    );
    record(
        &mut errors,
        parse_count("certifications", input.certifications.as_deref()),
    );
    record(&mut errors, parse_decimal("cgpa", input.cgpa.as_deref()));
    finish(errors)
}

pub fn validate_step_two(input: &StepTwoInput) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    record(&mut errors, parse_count("leetcode", input.leetcode.as_deref()));
    record(
        &mut errors,
        parse_count("full_stack_projects", input.full_stack_projects.as_deref()),
    );
    if input
        .communication
        .as_deref()
        .map_or(true, |c| c.trim().is_empty())
    {
        errors.insert("communication", "Communication level is required".to_string());
    }
    finish(errors)
}

/// Cleans the three descriptions (whitespace, one pair of wrapping quotes)
/// and checks their length. Returns them in project order.
pub fn normalize_projects(input: &StepThreeInput) -> Result<[String; PROJECT_COUNT], FieldErrors> {
    let fields = [
        ("project_1", input.project_1.as_deref()),
        ("project_2", input.project_2.as_deref()),
        ("project_3", input.project_3.as_deref()),
    ];

    let mut errors = FieldErrors::new();
    let cleaned = fields.map(|(field, raw)| {
        let text = clean_description(raw.unwrap_or_default());
        if text.chars().count() < MIN_PROJECT_DESCRIPTION_CHARS {
            errors.insert(
                field,
                format!(
                    "Project description is required (at least {MIN_PROJECT_DESCRIPTION_CHARS} characters)"
                ),
            );
        }
        text
    });

    if errors.is_empty() {
        Ok(cleaned)
    } else {
        Err(errors)
    }
}

fn clean_description(raw: &str) -> String {
    let text = raw.trim();
    let text = text.strip_prefix('"').unwrap_or(text);
    let text = text.strip_suffix('"').unwrap_or(text);
    text.to_string()
}

fn record<T>(errors: &mut FieldErrors, result: Result<T, FeatureError>) {
    if let Err(e) = result {
        errors.insert(e.field(), e.to_string());
    }
}

fn finish(errors: FieldErrors) -> Result<(), FieldErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
