//! Result page: renders a predicted salary passed as a query parameter.

use axum::{extract::Query, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Where a user goes to try another prediction.
pub const RESTART_PATH: &str = "/api/v1/wizard/sessions";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultView {
    Ok {
        salary: f64,
        formatted_salary: String,
        period: &'static str,
        restart_path: &'static str,
    },
    Error {
        message: &'static str,
        restart_path: &'static str,
    },
}

impl ResultView {
    pub fn is_error(&self) -> bool {
        matches!(self, ResultView::Error { .. })
    }
}

pub fn render_result(salary: Option<&str>) -> ResultView {
    let Some(raw) = salary.filter(|s| !s.trim().is_empty()) else {
        return ResultView::Error {
            message: "No salary value provided",
            restart_path: RESTART_PATH,
        };
    };

    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => ResultView::Ok {
            salary: value,
            formatted_salary: format_inr(value),
            period: "per annum",
            restart_path: RESTART_PATH,
        },
        _ => {
            error!("Error formatting salary: invalid salary value {raw:?}");
            ResultView::Error {
                message: "Unable to format salary value",
                restart_path: RESTART_PATH,
            }
        }
    }
}

/// Formats whole rupees the way the en-IN locale does: `₹12,34,567`.
/// The last three digits form one group; the rest are grouped in pairs.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_indian(&digits);
    if rounded < 0.0 {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

#[derive(Debug, Deserialize)]
pub struct ResultQuery {
    pub salary: Option<String>,
}

/// GET /result?salary=
pub async fn handle_result(Query(query): Query<ResultQuery>) -> (StatusCode, Json<ResultView>) {
    let view = render_result(query.salary.as_deref());
    let status = if view.is_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };
    (status, Json(view))
}
