// SPDX-License-Identifier: Apache-2.0

//! Mapping from core errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use issuelens_core::{AnalyzerError, ErrorCategory};
use serde::Serialize;
use tracing::{error, warn};

/// Detail returned for any upstream GitHub failure.
pub const UPSTREAM_DETAIL: &str = "Failed to fetch data from GitHub API";

/// Detail returned for any internal failure.
pub const INTERNAL_DETAIL: &str = "Internal server error during analysis";

/// Error body: `{"detail": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable explanation.
    pub detail: String,
}

/// An error that can be returned from a handler.
#[derive(Debug)]
pub enum ApiError {
    /// A core analysis error.
    Analyzer(AnalyzerError),
    /// The request body could not be read as an analysis request.
    BadRequest(String),
}

impl From<AnalyzerError> for ApiError {
    fn from(err: AnalyzerError) -> Self {
        ApiError::Analyzer(err)
    }
}

impl ApiError {
    /// Status code and client-facing detail. Upstream and internal failures
    /// get fixed details; their specifics are only logged.
    #[must_use]
    pub fn status_and_detail(&self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ApiError::Analyzer(err) => match err.category() {
                ErrorCategory::InvalidInput => (StatusCode::BAD_REQUEST, err.to_string()),
                ErrorCategory::NotFound => (StatusCode::NOT_FOUND, err.to_string()),
                ErrorCategory::UpstreamUnavailable => {
                    (StatusCode::BAD_GATEWAY, UPSTREAM_DETAIL.to_string())
                }
                ErrorCategory::Internal => {
                    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_DETAIL.to_string())
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();

        let cause = match &self {
            ApiError::Analyzer(err) => err.to_string(),
            ApiError::BadRequest(message) => message.clone(),
        };
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %cause, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %cause, "Request rejected");
        }

        (status, Json(ErrorBody { detail })).into_response()
    }
}
