// SPDX-License-Identifier: Apache-2.0

//! Keyword-based classification used when the model output is unusable.

use tracing::debug;

use super::validator::clean_labels;
use crate::ai::types::{IssueAnalysis, IssueType};

const BUG_KEYWORDS: &[&str] = &["bug", "error", "issue", "broken", "not working"];
const FEATURE_KEYWORDS: &[&str] = &["feature", "add", "support", "enhancement"];
const DOC_KEYWORDS: &[&str] = &["doc", "documentation", "readme"];
const QUESTION_PREFIXES: &[&str] = &["how", "why", "what", "?"];

/// Characters of the title kept in the fallback summary.
const SUMMARY_TITLE_CHARS: usize = 100;

/// Existing labels carried over into the fallback analysis.
const CARRIED_LABELS: usize = 3;

const FALLBACK_PRIORITY: &str = "3 - Unable to determine exact priority, defaulting to moderate";
const FALLBACK_IMPACT: &str = "Impact assessment requires manual review due to processing error";
const TRIAGE_LABEL: &str = "needs-triage";

/// Infers an issue type from the title alone.
///
/// Rules are tried in order and matching is case-insensitive: bug keywords,
/// then feature keywords, then documentation keywords, then question
/// prefixes. Anything else is `Other`.
#[must_use]
pub fn infer_type(title: &str) -> IssueType {
    let title = title.to_lowercase();
    let contains_any = |words: &[&str]| words.iter().any(|w| title.contains(w));

    if contains_any(BUG_KEYWORDS) {
        IssueType::Bug
    } else if contains_any(FEATURE_KEYWORDS) {
        IssueType::FeatureRequest
    } else if contains_any(DOC_KEYWORDS) {
        IssueType::Documentation
    } else if QUESTION_PREFIXES.iter().any(|p| title.starts_with(p)) {
        IssueType::Question
    } else {
        IssueType::Other
    }
}

/// Builds a deterministic analysis from the issue title and existing labels.
///
/// Always succeeds. The body is accepted for parity with the model path but
/// does not influence the result. Carried-over labels are cleaned the same
/// way model labels are; if none survive, `needs-triage` is used.
#[must_use]
pub fn classify(title: &str, _body: &str, existing_labels: &[String]) -> IssueAnalysis {
    let issue_type = infer_type(title);

    let mut summary = String::from("Issue regarding: ");
    summary.extend(title.chars().take(SUMMARY_TITLE_CHARS));
    if title.chars().count() > SUMMARY_TITLE_CHARS {
        summary.push_str("...");
    }
    let summary = summary.trim().to_string();

    let mut suggested_labels = clean_labels(
        existing_labels
            .iter()
            .take(CARRIED_LABELS)
            .map(String::as_str),
    );
    if suggested_labels.is_empty() {
        suggested_labels.push(TRIAGE_LABEL.to_string());
    }

    debug!(issue_type = %issue_type, "Built fallback analysis");

    IssueAnalysis {
        summary,
        issue_type,
        priority_score: FALLBACK_PRIORITY.to_string(),
        suggested_labels,
        potential_impact: FALLBACK_IMPACT.to_string(),
    }
}
