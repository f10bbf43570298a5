// SPDX-License-Identifier: Apache-2.0

//! AI request/response types.
//!
//! Defines the chat-completions wire structures used to talk to Gemini's
//! OpenAI-compatible endpoint, the issue details fed into the prompt, and the
//! structured analysis returned to callers.

use std::fmt;

use bon::Builder;
use serde::{Deserialize, Serialize};

/// A chat message sent to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant".
    pub role: String,
    /// Message content.
    pub content: String,
}

/// Request body for the chat completions API.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier (e.g., "gemini-1.5-flash").
    pub model: String,
    /// List of messages in the conversation.
    pub messages: Vec<ChatMessage>,
    /// Maximum tokens in response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Temperature for response randomness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Response from the chat completions API.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    /// List of choices (usually just one).
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Token usage, when reported.
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// A single choice in the chat completion response.
#[derive(Debug, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: ResponseMessage,
}

/// The assistant message inside a choice. Content may be null.
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    /// Generated text.
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage reported by the provider.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Usage {
    /// Prompt tokens.
    #[serde(default)]
    pub prompt_tokens: u64,
    /// Completion tokens.
    #[serde(default)]
    pub completion_tokens: u64,
}

/// Details about an issue, as fed to the prompt and the fallback classifier.
#[derive(Debug, Clone, Builder)]
pub struct IssueDetails {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Issue number.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Issue body (markdown content), empty when absent.
    #[builder(default)]
    pub body: String,
    /// "open" or "closed".
    #[builder(default)]
    pub state: String,
    /// Current label names on the issue.
    #[builder(default)]
    pub labels: Vec<String>,
    /// Comments rendered into a single text blob, empty when there are none.
    #[builder(default)]
    pub comments: String,
}

/// Issue classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// Something is broken.
    Bug,
    /// A request for new behavior.
    FeatureRequest,
    /// Documentation problem or request.
    Documentation,
    /// A usage question.
    Question,
    /// Anything else.
    Other,
}

impl IssueType {
    /// All variants, in the order they appear in the prompt.
    pub const ALL: [IssueType; 5] = [
        IssueType::Bug,
        IssueType::FeatureRequest,
        IssueType::Documentation,
        IssueType::Question,
        IssueType::Other,
    ];

    /// The wire literal for this type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IssueType::Bug => "bug",
            IssueType::FeatureRequest => "feature_request",
            IssueType::Documentation => "documentation",
            IssueType::Question => "question",
            IssueType::Other => "other",
        }
    }

    /// Parses an exact wire literal. No trimming or case folding.
    #[must_use]
    pub fn from_literal(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured analysis of an issue.
///
/// Only ever constructed through [`crate::analysis::validate`] (or the
/// fallback path, which validates too), so every instance satisfies the
/// field constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueAnalysis {
    /// One-sentence summary (non-empty, at most 200 characters).
    pub summary: String,
    /// Classification.
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// 1-5 rating with justification (non-empty, at most 100 characters).
    pub priority_score: String,
    /// 1-5 lowercase labels.
    pub suggested_labels: Vec<String>,
    /// Impact on users (non-empty, at most 200 characters).
    pub potential_impact: String,
}
