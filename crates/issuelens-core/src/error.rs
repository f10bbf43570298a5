// SPDX-License-Identifier: Apache-2.0

//! Error types for Issuelens.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Application code should use `anyhow::Result` for top-level error handling.

use thiserror::Error;

/// Coarse classification of an error, used by transports to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller supplied something unusable (bad URL, bad issue number).
    InvalidInput,
    /// The requested issue does not exist upstream.
    NotFound,
    /// GitHub could not be reached or answered with an error.
    UpstreamUnavailable,
    /// Anything else.
    Internal,
}

/// Errors that can occur during Issuelens operations.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Repository URL did not match any accepted form.
    #[error(
        "Invalid GitHub repository URL format. Expected: https://github.com/owner/repo (got: {input:?})"
    )]
    InvalidUrl {
        /// The rejected input.
        input: String,
    },

    /// Issue numbers start at 1.
    #[error("Issue number must be positive (got: {0})")]
    InvalidIssueNumber(i64),

    /// GitHub returned 404 for the issue.
    #[error("Issue #{number} not found in repository {owner}/{repo}")]
    IssueNotFound {
        /// Repository owner.
        owner: String,
        /// Repository name.
        repo: String,
        /// Issue number.
        number: u64,
    },

    /// GitHub returned 403 (rate limit exceeded or private repository).
    #[error("GitHub API rate limit exceeded or repository is private")]
    RateLimited,

    /// GitHub returned an unexpected non-200 status.
    #[error("GitHub API returned status {status}")]
    UpstreamStatus {
        /// HTTP status code.
        status: u16,
    },

    /// The GitHub request timed out.
    #[error("GitHub API request timed out")]
    Timeout,

    /// The GitHub API could not be reached.
    #[error("Failed to connect to GitHub API: {message}")]
    Connection {
        /// Underlying transport error message.
        message: String,
    },

    /// GitHub answered 200 but the payload could not be decoded.
    #[error("Unexpected response from GitHub API: {message}")]
    UpstreamResponse {
        /// Decoding error message.
        message: String,
    },

    /// The model call failed or produced no text.
    #[error("Empty response from AI model ({provider}): {reason}")]
    EmptyResponse {
        /// Name of the AI provider.
        provider: String,
        /// Why no text was produced.
        reason: String,
    },

    /// A field of the analysis violated its constraints.
    #[error("Invalid analysis field `{field}`: {message}")]
    Validation {
        /// Offending field name.
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// Configuration file or environment error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// Network/HTTP error from reqwest.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl AnalyzerError {
    /// Builds a `Validation` error for `field`.
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AnalyzerError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Returns the category used to map this error onto a transport status.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnalyzerError::InvalidUrl { .. }
            | AnalyzerError::InvalidIssueNumber(_)
            | AnalyzerError::Validation { .. } => ErrorCategory::InvalidInput,
            AnalyzerError::IssueNotFound { .. } => ErrorCategory::NotFound,
            AnalyzerError::RateLimited
            | AnalyzerError::UpstreamStatus { .. }
            | AnalyzerError::Timeout
            | AnalyzerError::Connection { .. }
            | AnalyzerError::UpstreamResponse { .. }
            | AnalyzerError::Network(_) => ErrorCategory::UpstreamUnavailable,
            AnalyzerError::EmptyResponse { .. } | AnalyzerError::Config { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

impl From<config::ConfigError> for AnalyzerError {
    fn from(err: config::ConfigError) -> Self {
        AnalyzerError::Config {
            message: err.to_string(),
        }
    }
}
