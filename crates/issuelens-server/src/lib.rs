// SPDX-License-Identifier: Apache-2.0

//! HTTP server exposing issuelens-core issue analysis.
//!
//! Routes:
//! - `GET /` - liveness
//! - `GET /health` - liveness plus a live model probe
//! - `POST /analyze` - analyze one GitHub issue

mod error;
mod server;

use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ErrorBody, INTERNAL_DETAIL, UPSTREAM_DETAIL};
pub use server::{AppState, HealthResponse, RootResponse, ServiceStatus, ServiceStatuses};

/// Builds the application router.
///
/// Cross-origin requests are accepted from `cors_origin` only, with any
/// method and header and with credentials.
///
/// # Errors
///
/// Returns an error if `cors_origin` is not a valid header value.
pub fn router(state: AppState, cors_origin: &str) -> anyhow::Result<Router> {
    let origin = HeaderValue::from_str(cors_origin)
        .with_context(|| format!("Invalid CORS origin: {cors_origin}"))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Ok(Router::new()
        .route("/", get(server::root))
        .route("/health", get(server::health))
        .route("/analyze", post(server::analyze))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Serves the router on `host:port` until Ctrl+C.
pub async fn run_http(host: &str, port: u16, router: Router) -> anyhow::Result<()> {
    // IPv6 literals need brackets
    let addr: SocketAddr = if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
    .parse()
    .with_context(|| format!("Invalid listen address {host}:{port}"))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received Ctrl+C, shutting down gracefully");
        })
        .await?;

    Ok(())
}
