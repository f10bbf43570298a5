// SPDX-License-Identifier: Apache-2.0

//! Configuration management for Issuelens.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `ISSUELENS_`)
//! 2. Config file: `~/.config/issuelens/config.toml` (or an explicit path)
//! 3. Built-in defaults
//!
//! Credentials are not part of this structure; see [`crate::auth`].
//!
//! # Examples
//!
//! ```bash
//! # Override the listen port via environment variable
//! ISSUELENS_SERVER__PORT=9000 cargo run
//! ```

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AnalyzerError;

/// Gemini OpenAI-compatible chat completions endpoint.
pub const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions";

/// GitHub REST API base URL.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// AI provider settings.
    pub ai: AiConfig,
    /// GitHub API settings.
    pub github: GitHubConfig,
}

/// HTTP listener settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// The single origin allowed to make cross-origin requests.
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origin: "http://localhost:5173".to_string(),
        }
    }
}

/// AI provider settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Model identifier.
    pub model: String,
    /// Chat completions endpoint.
    pub api_url: String,
    /// Maximum tokens for API responses.
    pub max_tokens: u32,
    /// Temperature for API requests (0.0-1.0).
    pub temperature: f32,
    /// Request timeout in seconds. `None` keeps the HTTP client default.
    pub timeout_seconds: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".to_string(),
            api_url: GEMINI_API_URL.to_string(),
            max_tokens: 2048,
            temperature: 0.3,
            timeout_seconds: None,
        }
    }
}

/// GitHub API settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API base URL.
    pub api_url: String,
    /// API request timeout in seconds.
    pub api_timeout_seconds: u64,
    /// User-Agent sent with every GitHub request.
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: GITHUB_API_URL.to_string(),
            api_timeout_seconds: 10,
            user_agent: "GitHub-Issue-Analyzer/1.0".to_string(),
        }
    }
}

/// Returns the Issuelens configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/issuelens`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("issuelens");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("issuelens")
}

/// Returns the path to the default configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration.
///
/// Loads from the config file at `path` (or [`config_file_path`] when `None`;
/// the file is optional) and environment variables. Environment variables use
/// the prefix `ISSUELENS_` and double underscore for nested keys
/// (e.g., `ISSUELENS_AI__MODEL`).
///
/// # Errors
///
/// Returns `AnalyzerError::Config` if the config file exists but is invalid.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, AnalyzerError> {
    let config_path = path.map_or_else(config_file_path, Path::to_path_buf);

    let config = Config::builder()
        // Load from config file (optional - may not exist)
        .add_source(File::from(config_path).required(false))
        // Override with environment variables
        .add_source(
            Environment::with_prefix("ISSUELENS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    #[serial]
    fn test_load_config_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config(Some(&dir.path().join("missing.toml")))
            .expect("should load with defaults");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.cors_origin, "http://localhost:5173");
        assert_eq!(config.ai.model, "gemini-1.5-flash");
        assert_eq!(config.ai.api_url, GEMINI_API_URL);
        assert!(config.ai.timeout_seconds.is_none());
        assert_eq!(config.github.api_url, GITHUB_API_URL);
        assert_eq!(config.github.api_timeout_seconds, 10);
        assert_eq!(config.github.user_agent, "GitHub-Issue-Analyzer/1.0");
    }

    #[test]
    #[serial]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).expect("create config");
        writeln!(
            file,
            r#"
[server]
port = 9100
cors_origin = "https://issues.example.com"

[ai]
model = "gemini-2.0-flash"
"#
        )
        .expect("write config");

        let config = load_config(Some(&path)).expect("should load file");

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.cors_origin, "https://issues.example.com");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.ai.model, "gemini-2.0-flash");
        assert_eq!(config.github.api_timeout_seconds, 10);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9100\n").expect("write config");

        // SAFETY: serialized test; no other threads read this variable.
        unsafe {
            std::env::set_var("ISSUELENS_SERVER__PORT", "9200");
        }
        let config = load_config(Some(&path));
        unsafe {
            std::env::remove_var("ISSUELENS_SERVER__PORT");
        }

        assert_eq!(config.expect("should load").server.port, 9200);
    }

    #[test]
    #[serial]
    fn test_invalid_config_file_is_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = \"not a port\"\n").expect("write config");

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, AnalyzerError::Config { .. }));
    }

    #[test]
    #[serial]
    fn test_config_dir_respects_xdg_config_home() {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", "/custom/config");
        }

        let dir = config_dir();
        assert_eq!(dir, PathBuf::from("/custom/config/issuelens"));

        // Cleanup
        unsafe {
            match original {
                Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
        }
    }

    #[test]
    fn test_config_file_path() {
        let path = config_file_path();
        assert!(path.ends_with("config.toml"));
    }
}
