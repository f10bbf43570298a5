// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # Issuelens Core
//!
//! Core library for Issuelens - AI-assisted GitHub issue analysis.
//!
//! This crate provides reusable components for:
//! - Repository URL parsing and GitHub REST issue retrieval
//! - Prompt construction and Gemini text generation
//! - Normalization of free-text model output into a validated analysis
//! - A keyword-based fallback classifier for when the model is unusable
//! - Configuration and credential loading
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use issuelens_core::{
//!     AnalyzeRequest, Credentials, EnvTokenProvider, GeminiClient, GitHubClient, analyze_issue,
//!     load_config,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = load_config(None)?;
//! let credentials = Credentials::resolve(&EnvTokenProvider)?;
//!
//! let github = GitHubClient::new(&config.github, credentials.github_token.clone())?;
//! let ai = GeminiClient::new(&config.ai, credentials.gemini_key.clone())?;
//!
//! let request = AnalyzeRequest {
//!     repo_url: "https://github.com/facebook/react".to_string(),
//!     issue_number: 123,
//! };
//! let analysis = analyze_issue(&github, &ai, &request).await?;
//! println!("{}: {}", analysis.issue_type, analysis.summary);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ai`] - Gemini integration and prompt construction
//! - [`analysis`] - Validation, fallback classification, and response normalization
//! - [`config`] - Configuration loading and paths
//! - [`error`] - Error types
//! - [`github`] - Repository URL parsing and the GitHub REST client

// ============================================================================
// Authentication
// ============================================================================

pub use auth::{Credentials, EnvTokenProvider, TokenProvider};

// ============================================================================
// Error Handling
// ============================================================================

pub use error::{AnalyzerError, ErrorCategory};

/// Convenience Result type for Issuelens operations.
///
/// This is equivalent to `std::result::Result<T, AnalyzerError>`.
pub type Result<T> = std::result::Result<T, AnalyzerError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    AiConfig, AppConfig, GitHubConfig, ServerConfig, config_dir, config_file_path, load_config,
};

// ============================================================================
// AI Analysis
// ============================================================================

pub use ai::types::{IssueAnalysis, IssueDetails, IssueType};
pub use ai::{AiProvider, GeminiClient, build_prompt};

// ============================================================================
// Normalization
// ============================================================================

pub use analysis::{NormalizeOutcome, classify, normalize, validate};

// ============================================================================
// GitHub Integration
// ============================================================================

pub use github::issues::{GitHubClient, RawIssue, format_comments};
pub use github::parse_repo_url;

// ============================================================================
// Utilities
// ============================================================================

pub use utils::{truncate, truncate_with_suffix};

// ============================================================================
// Platform-Agnostic Facade
// ============================================================================

pub use facade::{AnalyzeRequest, analyze_issue, probe_ai};

// ============================================================================
// Modules
// ============================================================================

pub mod ai;
pub mod analysis;
pub mod auth;
pub mod config;
pub mod error;
pub mod facade;
pub mod github;
pub mod utils;
