// SPDX-License-Identifier: Apache-2.0

//! Credential resolution.
//!
//! This module defines the `TokenProvider` trait, which abstracts where the
//! GitHub token and Gemini API key come from, and `Credentials`, the resolved
//! set that is loaded once at startup and handed to the API clients.

use secrecy::SecretString;
use tracing::{info, warn};

use crate::error::AnalyzerError;

/// Environment variable for the GitHub access token.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable for the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Provides GitHub and Gemini credentials for API calls.
///
/// Implementations should return `None` if a credential is not available.
pub trait TokenProvider: Send + Sync {
    /// Retrieves the GitHub API token.
    fn github_token(&self) -> Option<SecretString>;

    /// Retrieves the Gemini API key.
    fn gemini_key(&self) -> Option<SecretString>;
}

/// Resolves credentials from environment variables.
///
/// Reads `GITHUB_TOKEN` for GitHub API access and `GEMINI_API_KEY` for the model.
/// Empty values are treated as unset.
pub struct EnvTokenProvider;

fn non_empty_env(name: &str) -> Option<SecretString> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(SecretString::from)
}

impl TokenProvider for EnvTokenProvider {
    fn github_token(&self) -> Option<SecretString> {
        non_empty_env(GITHUB_TOKEN_ENV)
    }

    fn gemini_key(&self) -> Option<SecretString> {
        non_empty_env(GEMINI_API_KEY_ENV)
    }
}

/// Credentials resolved once at startup.
#[derive(Clone)]
pub struct Credentials {
    /// Gemini API key (required).
    pub gemini_key: SecretString,
    /// GitHub token (optional; unauthenticated calls have stricter rate limits).
    pub github_token: Option<SecretString>,
}

impl Credentials {
    /// Resolves credentials from `provider`.
    ///
    /// # Errors
    ///
    /// Returns `AnalyzerError::Config` if the Gemini API key is missing.
    pub fn resolve(provider: &dyn TokenProvider) -> Result<Self, AnalyzerError> {
        let gemini_key = provider.gemini_key().ok_or_else(|| AnalyzerError::Config {
            message: format!("{GEMINI_API_KEY_ENV} environment variable is required"),
        })?;

        let github_token = provider.github_token();
        if github_token.is_some() {
            info!("Using GitHub token for authenticated requests");
        } else {
            warn!("No GitHub token provided - rate limits may apply");
        }

        Ok(Self {
            gemini_key,
            github_token,
        })
    }
}
