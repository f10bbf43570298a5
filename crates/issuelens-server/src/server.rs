// SPDX-License-Identifier: Apache-2.0

//! Route handlers and shared state.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use issuelens_core::{AiProvider, AnalyzeRequest, GitHubClient, IssueAnalysis};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Clients shared by all requests. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// GitHub REST client.
    pub github: Arc<GitHubClient>,
    /// Text-generation provider.
    pub ai: Arc<dyn AiProvider>,
}

/// Health of one dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// Reachable and working.
    Healthy,
    /// Probe failed.
    Unhealthy,
}

/// Body of `GET /`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    /// Always "healthy".
    pub status: ServiceStatus,
    /// Service name.
    pub message: String,
}

/// Per-dependency statuses reported by `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatuses {
    /// Result of a live model probe.
    pub gemini_api: ServiceStatus,
    /// GitHub is not probed and is always reported healthy.
    pub github_api: ServiceStatus,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status. The service itself is up if it answers.
    pub status: ServiceStatus,
    /// Dependency statuses.
    pub services: ServiceStatuses,
}

pub(crate) async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        status: ServiceStatus::Healthy,
        message: "GitHub Issue Analyzer API".to_string(),
    })
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let gemini_api = if issuelens_core::probe_ai(state.ai.as_ref()).await {
        ServiceStatus::Healthy
    } else {
        ServiceStatus::Unhealthy
    };

    Json(HealthResponse {
        status: ServiceStatus::Healthy,
        services: ServiceStatuses {
            gemini_api,
            github_api: ServiceStatus::Healthy,
        },
    })
}

pub(crate) async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<IssueAnalysis>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let analysis =
        issuelens_core::analyze_issue(state.github.as_ref(), state.ai.as_ref(), &request).await?;
    Ok(Json(analysis))
}
