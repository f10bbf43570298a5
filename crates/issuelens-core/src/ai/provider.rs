// SPDX-License-Identifier: Apache-2.0

//! AI provider trait and shared implementations.
//!
//! Defines the `AiProvider` trait that text-generation backends implement,
//! along with default implementations for request sending and text
//! extraction.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::error::AnalyzerError;

/// AI provider trait for text generation.
///
/// Implementors supply connection details; `generate` is shared.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Returns the name of the provider (e.g., "gemini").
    fn name(&self) -> &str;

    /// Returns the chat completions URL for this provider.
    fn api_url(&self) -> &str;

    /// Returns the HTTP client for making requests.
    fn http_client(&self) -> &Client;

    /// Returns the API key for authentication.
    fn api_key(&self) -> &SecretString;

    /// Returns the model name.
    fn model(&self) -> &str;

    /// Returns the maximum tokens for API responses.
    fn max_tokens(&self) -> u32;

    /// Returns the temperature for API requests.
    fn temperature(&self) -> f32;

    /// Sends a chat completion request to the provider's API.
    ///
    /// Single attempt; no retry.
    async fn send_request_inner(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        let response = self
            .http_client()
            .post(self.api_url())
            .bearer_auth(self.api_key().expose_secret())
            .json(request)
            .send()
            .await
            .context(format!("Failed to send request to {} API", self.name()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "{} API error (HTTP {}): {}",
                self.name(),
                status.as_u16(),
                error_body
            );
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context(format!("Failed to parse {} API response", self.name()))?;

        Ok(completion)
    }

    /// Sends `prompt` as a single user message and returns the generated text.
    ///
    /// # Errors
    ///
    /// Returns `AnalyzerError::EmptyResponse` if the call fails for any reason
    /// or the model returns no text. Callers are expected to fall back.
    #[instrument(skip(self, prompt), fields(provider = %self.name(), prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String, AnalyzerError> {
        debug!(model = %self.model(), "Calling {} API", self.name());

        let request = ChatCompletionRequest {
            model: self.model().to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: Some(self.max_tokens()),
            temperature: Some(self.temperature()),
        };

        let empty = |reason: String| AnalyzerError::EmptyResponse {
            provider: self.name().to_string(),
            reason,
        };

        let completion = self.send_request_inner(&request).await.map_err(|e| {
            warn!(error = %format!("{e:#}"), "AI request failed");
            empty(format!("{e:#}"))
        })?;

        if let Some(usage) = completion.usage {
            debug!(
                input_tokens = usage.prompt_tokens,
                output_tokens = usage.completion_tokens,
                "AI usage"
            );
        }

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| empty("no text in response".to_string()))?;

        debug!(response_length = text.len(), "Received AI response");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct TestProvider {
        http: Client,
        api_key: SecretString,
        url: String,
    }

    impl TestProvider {
        fn new(server: &MockServer) -> Self {
            Self {
                http: Client::new(),
                api_key: SecretString::from("test-key".to_string()),
                url: format!("{}/v1/chat/completions", server.uri()),
            }
        }
    }

    impl AiProvider for TestProvider {
        fn name(&self) -> &'static str {
            "test"
        }

        fn api_url(&self) -> &str {
            &self.url
        }

        fn http_client(&self) -> &Client {
            &self.http
        }

        fn api_key(&self) -> &SecretString {
            &self.api_key
        }

        fn model(&self) -> &'static str {
            "test-model"
        }

        fn max_tokens(&self) -> u32 {
            256
        }

        fn temperature(&self) -> f32 {
            0.3
        }
    }

    fn completion(content: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3}
        }))
    }

    #[tokio::test]
    async fn test_generate_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "model": "test-model",
                "messages": [{"role": "user", "content": "Hello"}]
            })))
            .respond_with(completion(serde_json::json!("Hi there")))
            .expect(1)
            .mount(&server)
            .await;

        let text = TestProvider::new(&server).generate("Hello").await.unwrap();
        assert_eq!(text, "Hi there");
    }

    #[tokio::test]
    async fn test_generate_empty_content_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(completion(serde_json::Value::Null))
            .mount(&server)
            .await;

        let err = TestProvider::new(&server).generate("Hello").await.unwrap_err();
        assert!(matches!(err, AnalyzerError::EmptyResponse { .. }));
    }

    #[tokio::test]
    async fn test_generate_http_error_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let err = TestProvider::new(&server).generate("Hello").await.unwrap_err();
        let AnalyzerError::EmptyResponse { provider, reason } = err else {
            panic!("expected EmptyResponse");
        };
        assert_eq!(provider, "test");
        assert!(reason.contains("401"));
    }

    #[tokio::test]
    async fn test_generate_no_choices_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
            .mount(&server)
            .await;

        let err = TestProvider::new(&server).generate("Hello").await.unwrap_err();
        assert!(matches!(err, AnalyzerError::EmptyResponse { .. }));
    }
}
