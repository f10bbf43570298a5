// SPDX-License-Identifier: Apache-2.0

//! Shared fixtures: a router wired to wiremock stand-ins for GitHub and Gemini.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use issuelens_core::{AiConfig, GeminiClient, GitHubClient, GitHubConfig};
use issuelens_server::{AppState, router};
use secrecy::SecretString;
use tower::ServiceExt;
use wiremock::MockServer;

pub const AI_PATH: &str = "/v1beta/openai/chat/completions";
pub const CORS_ORIGIN: &str = "http://localhost:5173";

pub struct Harness {
    pub github: MockServer,
    pub ai: MockServer,
    pub app: Router,
}

impl Harness {
    pub async fn start() -> Self {
        let github = MockServer::start().await;
        let ai = MockServer::start().await;

        let gh_config = GitHubConfig {
            api_url: github.uri(),
            api_timeout_seconds: 2,
            ..GitHubConfig::default()
        };
        let ai_config = AiConfig {
            api_url: format!("{}{AI_PATH}", ai.uri()),
            timeout_seconds: Some(2),
            ..AiConfig::default()
        };

        let state = AppState {
            github: Arc::new(GitHubClient::new(&gh_config, None).unwrap()),
            ai: Arc::new(
                GeminiClient::new(&ai_config, SecretString::from("test-key".to_string()))
                    .unwrap(),
            ),
        };
        let app = router(state, CORS_ORIGIN).unwrap();

        Self { github, ai, app }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn analyze(&self, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let request = Request::post("/analyze")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }
}

pub fn ai_reply(content: &str) -> wiremock::ResponseTemplate {
    wiremock::ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    }))
}

pub fn issue_body(github: &MockServer, title: &str, comments: u64) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "body": "Steps to reproduce: click login",
        "state": "open",
        "labels": [{"name": "auth"}, {"name": "frontend"}],
        "comments": comments,
        "comments_url": format!("{}/repos/facebook/react/issues/123/comments", github.uri()),
    })
}
