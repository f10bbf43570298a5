// SPDX-License-Identifier: Apache-2.0

//! Analysis prompt construction.

use std::fmt::Write;

use super::types::IssueType;

const BODY_PLACEHOLDER: &str = "No description provided";
const COMMENTS_PLACEHOLDER: &str = "No comments";
const LABELS_PLACEHOLDER: &str = "None";

/// Renders the issue into the instructional prompt sent to the model.
///
/// Deterministic: the same inputs always produce the same prompt. Blank
/// `body` and `comments` are replaced with fixed placeholders.
#[must_use]
pub fn build_prompt(
    title: &str,
    body: &str,
    comments: &str,
    label_names: &[String],
    state: &str,
) -> String {
    let body = if body.trim().is_empty() {
        BODY_PLACEHOLDER
    } else {
        body
    };
    let comments = if comments.trim().is_empty() {
        COMMENTS_PLACEHOLDER
    } else {
        comments
    };
    let labels = if label_names.is_empty() {
        LABELS_PLACEHOLDER.to_string()
    } else {
        label_names.join(", ")
    };
    let types = IssueType::ALL
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>();

    let mut prompt = String::new();
    prompt.push_str(
        "You are an expert GitHub issue analyst. Analyze the following issue and provide a structured JSON response.\n\n",
    );

    prompt.push_str("ISSUE DETAILS:\n");
    let _ = writeln!(prompt, "Title: {title}");
    let _ = writeln!(prompt, "Body: {body}");
    let _ = writeln!(prompt, "Current State: {state}");
    let _ = writeln!(prompt, "Existing Labels: {labels}");
    let _ = writeln!(prompt, "Comments: {comments}");
    prompt.push('\n');

    prompt.push_str(
        "Please analyze this issue and respond with ONLY a valid JSON object in this exact format:\n",
    );
    prompt.push_str("{\n");
    prompt.push_str("  \"summary\": \"A clear one-sentence summary of the issue\",\n");
    let _ = writeln!(prompt, "  \"type\": \"{}\",", types.join("|"));
    prompt.push_str(
        "  \"priority_score\": \"1-5 score with brief justification (e.g., '3 - Moderate impact on user experience')\",\n",
    );
    prompt.push_str("  \"suggested_labels\": [\"2-3 relevant labels\"],\n");
    prompt.push_str(
        "  \"potential_impact\": \"Brief description of impact on users (especially for bugs)\"\n",
    );
    prompt.push_str("}\n\n");

    prompt.push_str("Guidelines:\n");
    prompt.push_str("- Summary should be concise but informative\n");
    let _ = writeln!(
        prompt,
        "- Type must be exactly one of: {}",
        types.join(", ")
    );
    prompt.push_str("- Priority: 1=low, 2=minor, 3=moderate, 4=high, 5=critical\n");
    prompt.push_str("- Suggested labels should be practical and commonly used in GitHub projects\n");
    prompt.push_str("- For non-bugs, potential_impact can describe general user benefit\n\n");

    prompt.push_str("Respond with ONLY the JSON object, no additional text.");
    prompt
}
