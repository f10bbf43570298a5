// SPDX-License-Identifier: Apache-2.0

//! Binary entry point for the Issuelens HTTP server.

mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use issuelens_core::{Credentials, EnvTokenProvider, GeminiClient, GitHubClient, load_config};
use issuelens_server::{AppState, router, run_http};

/// GitHub issue analysis API.
#[derive(Parser, Debug)]
#[command(name = "issuelens-server", version, about)]
struct Cli {
    /// Address to listen on (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config).
    #[arg(long)]
    port: Option<u16>,

    /// Path to a TOML config file (default: ~/.config/issuelens/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init_logging();

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let credentials =
        Credentials::resolve(&EnvTokenProvider).context("Failed to resolve credentials")?;

    let github = GitHubClient::new(&config.github, credentials.github_token)
        .context("Failed to create GitHub client")?;
    let ai = GeminiClient::new(&config.ai, credentials.gemini_key)
        .context("Failed to create Gemini client")?;

    let state = AppState {
        github: Arc::new(github),
        ai: Arc::new(ai),
    };
    let app = router(state, &config.server.cors_origin)?;

    let host = cli.host.unwrap_or(config.server.host);
    let port = cli.port.unwrap_or(config.server.port);

    tracing::info!(model = %config.ai.model, "Starting issuelens server");
    run_http(&host, port, app).await
}
