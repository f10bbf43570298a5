// SPDX-License-Identifier: Apache-2.0

//! GitHub integration module.
//!
//! Provides repository URL parsing and the REST client used to fetch issues
//! and their comments.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::AnalyzerError;

pub mod issues;

/// Accepted repository URL shapes, tried in order. First match wins.
static REPO_URL_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        r"^https://github\.com/([^/]+)/([^/]+)/?$",
        r"^http://github\.com/([^/]+)/([^/]+)/?$",
        r"^github\.com/([^/]+)/([^/]+)/?$",
        r"^([^/]+)/([^/]+)/?$",
    ]
    .map(|pattern| Regex::new(pattern).expect("repository URL pattern is valid"))
});

/// Index of the bare `owner/repo` pattern in [`REPO_URL_PATTERNS`].
const BARE_PATTERN: usize = 3;

/// Parses a GitHub repository URL into `(owner, repo)`.
///
/// Supports, after trimming whitespace and a single trailing slash:
/// - `https://github.com/owner/repo`
/// - `http://github.com/owner/repo`
/// - `github.com/owner/repo`
/// - `owner/repo`
///
/// A trailing `.git` on the repository name is stripped, and `.` or `..` as
/// owner or repository is rejected. In the bare form the
/// owner may not look like a host name (`github.com/onlyowner` is rejected
/// rather than read as owner `github.com`).
///
/// # Errors
///
/// Returns `AnalyzerError::InvalidUrl` if the input is empty or no form matches.
///
/// # Examples
///
/// ```
/// use issuelens_core::parse_repo_url;
///
/// let (owner, repo) = parse_repo_url("https://github.com/facebook/react.git/").unwrap();
/// assert_eq!((owner.as_str(), repo.as_str()), ("facebook", "react"));
/// ```
pub fn parse_repo_url(url: &str) -> Result<(String, String), AnalyzerError> {
    let invalid = || AnalyzerError::InvalidUrl {
        input: url.to_string(),
    };

    let trimmed = url.trim();
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return Err(invalid());
    }

    for (index, pattern) in REPO_URL_PATTERNS.iter().enumerate() {
        let Some(captures) = pattern.captures(trimmed) else {
            continue;
        };

        let owner = &captures[1];
        let repo = &captures[2];

        if index == BARE_PATTERN && (owner.contains('.') || owner.contains(':')) {
            return Err(invalid());
        }

        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        if repo.is_empty() || is_dot_segment(owner) || is_dot_segment(repo) {
            return Err(invalid());
        }

        debug!(owner = %owner, repo = %repo, "Parsed repository URL");
        return Ok((owner.to_string(), repo.to_string()));
    }

    Err(invalid())
}

/// `.` and `..` would be collapsed as relative path steps in a request URL.
fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}
