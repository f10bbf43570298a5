// SPDX-License-Identifier: Apache-2.0

//! Turns free-text model output into a validated analysis.
//!
//! The model is asked for a bare JSON object but routinely wraps it in prose
//! or markdown fences. The normalizer slices out the outermost braces, parses,
//! validates, and falls back to the keyword classifier on any failure. It
//! never returns an error.

use serde_json::Value;
use tracing::{debug, warn};

use super::fallback::classify;
use super::validator::validate;
use crate::ai::types::IssueAnalysis;
use crate::utils::truncate;

/// Characters of raw model output included in log records.
const LOGGED_RESPONSE_CHARS: usize = 500;

/// How a normalized analysis was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeOutcome {
    /// The model output parsed and validated.
    Parsed(IssueAnalysis),
    /// The model output was unusable; the keyword classifier produced the result.
    FallenBack {
        /// Fallback analysis.
        analysis: IssueAnalysis,
        /// Why the model output was rejected.
        reason: String,
    },
}

impl NormalizeOutcome {
    /// Returns the analysis regardless of how it was produced.
    #[must_use]
    pub fn analysis(&self) -> &IssueAnalysis {
        match self {
            NormalizeOutcome::Parsed(analysis) | NormalizeOutcome::FallenBack { analysis, .. } => {
                analysis
            }
        }
    }

    /// Consumes the outcome, returning the analysis.
    #[must_use]
    pub fn into_analysis(self) -> IssueAnalysis {
        match self {
            NormalizeOutcome::Parsed(analysis) | NormalizeOutcome::FallenBack { analysis, .. } => {
                analysis
            }
        }
    }

    /// True if the fallback classifier produced the analysis.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, NormalizeOutcome::FallenBack { .. })
    }
}

/// Returns the span from the first `{` to the last `}` inclusive, if any.
///
/// Linear in the input length. The span is not checked for balance; the JSON
/// parser decides whether it is usable.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Normalizes raw model output, reporting whether the fallback was used.
#[must_use]
pub fn normalize_outcome(
    raw: &str,
    title: &str,
    body: &str,
    existing_labels: &[String],
) -> NormalizeOutcome {
    let trimmed = raw.trim();
    let candidate = extract_json_object(trimmed).unwrap_or(trimmed);

    let parsed = serde_json::from_str::<Value>(candidate)
        .map_err(|e| format!("response is not valid JSON: {e}"))
        .and_then(|value| validate(&value).map_err(|e| e.to_string()));

    match parsed {
        Ok(analysis) => {
            debug!(issue_type = %analysis.issue_type, "Parsed AI analysis");
            NormalizeOutcome::Parsed(analysis)
        }
        Err(reason) => {
            warn!(
                reason = %reason,
                raw_response = %truncate(trimmed, LOGGED_RESPONSE_CHARS),
                "Unusable AI response, using fallback analysis"
            );
            NormalizeOutcome::FallenBack {
                analysis: classify(title, body, existing_labels),
                reason,
            }
        }
    }
}

/// Normalizes raw model output into a valid [`IssueAnalysis`].
///
/// Never fails: unusable output yields the keyword-based fallback.
///
/// # Examples
///
/// ```
/// use issuelens_core::{IssueType, normalize};
///
/// let analysis = normalize("I cannot help with that.", "Docs are outdated", "", &[]);
/// assert_eq!(analysis.issue_type, IssueType::Documentation);
/// assert_eq!(analysis.suggested_labels, vec!["needs-triage"]);
/// ```
#[must_use]
pub fn normalize(raw: &str, title: &str, body: &str, existing_labels: &[String]) -> IssueAnalysis {
    normalize_outcome(raw, title, body, existing_labels).into_analysis()
}
