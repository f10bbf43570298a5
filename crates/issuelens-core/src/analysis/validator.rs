// SPDX-License-Identifier: Apache-2.0

//! Field-level validation of a candidate analysis object.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::ai::types::{IssueAnalysis, IssueType};
use crate::error::AnalyzerError;

/// Maximum characters in `summary` and `potential_impact`.
pub const MAX_TEXT_CHARS: usize = 200;

/// Maximum characters in `priority_score`.
pub const MAX_PRIORITY_CHARS: usize = 100;

/// Maximum number of suggested labels kept.
pub const MAX_LABELS: usize = 5;

static LABEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\-_\s]+$").expect("label pattern is valid"));

/// Validates a parsed JSON candidate and builds an [`IssueAnalysis`] from it.
///
/// Text fields are trimmed. Labels are trimmed and lowercased; entries that
/// are not strings, are blank, or contain characters outside
/// `[a-zA-Z0-9-_ ]` are dropped, and at most five survive. `priority_score`
/// may be a JSON number, in which case its textual form is used.
///
/// # Errors
///
/// Returns `AnalyzerError::Validation` naming the first offending field.
pub fn validate(candidate: &Value) -> Result<IssueAnalysis, AnalyzerError> {
    let object = candidate
        .as_object()
        .ok_or_else(|| AnalyzerError::validation("analysis", "expected a JSON object"))?;

    let summary = bounded_text(object, "summary", MAX_TEXT_CHARS)?;
    let issue_type = issue_type(object)?;
    let priority_score = priority_score(object)?;
    let suggested_labels = labels(object)?;
    let potential_impact = bounded_text(object, "potential_impact", MAX_TEXT_CHARS)?;

    Ok(IssueAnalysis {
        summary,
        issue_type,
        priority_score,
        suggested_labels,
        potential_impact,
    })
}

fn bounded_text(
    object: &Map<String, Value>,
    field: &'static str,
    max_chars: usize,
) -> Result<String, AnalyzerError> {
    let raw = match object.get(field) {
        Some(Value::String(s)) => s,
        Some(_) => return Err(AnalyzerError::validation(field, "expected a string")),
        None => return Err(AnalyzerError::validation(field, "missing")),
    };
    check_text(field, raw, max_chars)
}

fn check_text(field: &'static str, raw: &str, max_chars: usize) -> Result<String, AnalyzerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AnalyzerError::validation(field, "must not be empty"));
    }
    let chars = trimmed.chars().count();
    if chars > max_chars {
        return Err(AnalyzerError::validation(
            field,
            format!("{chars} characters exceeds limit of {max_chars}"),
        ));
    }
    Ok(trimmed.to_string())
}

fn issue_type(object: &Map<String, Value>) -> Result<IssueType, AnalyzerError> {
    let literal = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| AnalyzerError::validation("type", "missing or not a string"))?;

    IssueType::from_literal(literal)
        .ok_or_else(|| AnalyzerError::validation("type", format!("unknown type {literal:?}")))
}

fn priority_score(object: &Map<String, Value>) -> Result<String, AnalyzerError> {
    const FIELD: &str = "priority_score";
    match object.get(FIELD) {
        Some(Value::String(s)) => check_text(FIELD, s, MAX_PRIORITY_CHARS),
        Some(Value::Number(n)) => check_text(FIELD, &n.to_string(), MAX_PRIORITY_CHARS),
        Some(_) => Err(AnalyzerError::validation(FIELD, "expected a string")),
        None => Err(AnalyzerError::validation(FIELD, "missing")),
    }
}

fn labels(object: &Map<String, Value>) -> Result<Vec<String>, AnalyzerError> {
    const FIELD: &str = "suggested_labels";
    let entries = object
        .get(FIELD)
        .and_then(Value::as_array)
        .ok_or_else(|| AnalyzerError::validation(FIELD, "missing or not an array"))?;

    let labels = clean_labels(entries.iter().filter_map(Value::as_str));
    if labels.is_empty() {
        return Err(AnalyzerError::validation(FIELD, "no valid labels"));
    }
    Ok(labels)
}

/// Trims and lowercases labels, drops blank or ill-formed ones, keeps five.
pub(crate) fn clean_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    labels
        .into_iter()
        .map(|label| label.trim().to_lowercase())
        .filter(|label| !label.is_empty() && LABEL_PATTERN.is_match(label))
        .take(MAX_LABELS)
        .collect()
}
