// SPDX-License-Identifier: Apache-2.0

//! Google AI Studio (Gemini) API client.
//!
//! Talks to Gemini through its OpenAI-compatible chat completions endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::SecretString;

use super::provider::AiProvider;
use crate::config::AiConfig;
use crate::error::AnalyzerError;

/// Gemini API client.
///
/// Holds the HTTP client, API key, and model settings for reuse across requests.
pub struct GeminiClient {
    http: Client,
    api_url: String,
    api_key: SecretString,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl GeminiClient {
    /// Creates a new Gemini client from configuration and an API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &AiConfig, api_key: SecretString) -> Result<Self, AnalyzerError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl AiProvider for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn http_client(&self) -> &Client {
        &self.http
    }

    fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }
}
