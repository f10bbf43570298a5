// SPDX-License-Identifier: Apache-2.0

//! GitHub issue retrieval over the REST API.
//!
//! Fetches a single issue by number and its comment thread. Issue fetch
//! failures are mapped onto [`AnalyzerError`] variants; comment fetch
//! failures degrade to "no comments".

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::config::GitHubConfig;
use crate::error::AnalyzerError;

/// Media type requested from the GitHub REST API.
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Delimiter placed between formatted comments.
pub const COMMENT_SEPARATOR: &str = "\n---COMMENT---\n";

/// A label attached to an issue.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueLabel {
    /// Label name.
    pub name: String,
}

/// Issue metadata as returned by `GET /repos/{owner}/{repo}/issues/{number}`.
///
/// Only the fields the analysis needs are decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct RawIssue {
    /// Issue title.
    pub title: String,
    /// Issue body (markdown), absent when the issue has no description.
    #[serde(default)]
    pub body: Option<String>,
    /// "open" or "closed".
    #[serde(default)]
    pub state: String,
    /// Labels currently on the issue, in GitHub's order.
    #[serde(default)]
    pub labels: Vec<IssueLabel>,
    /// Number of comments on the issue.
    #[serde(rename = "comments", default)]
    pub comment_count: u64,
    /// URL of the issue's comment collection.
    #[serde(default)]
    pub comments_url: String,
    /// Present when the issue is actually a pull request.
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
}

impl RawIssue {
    /// Returns true if GitHub marked this issue as a pull request.
    #[must_use]
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.as_ref().is_some_and(|v| !v.is_null())
    }

    /// Returns the label names in order.
    #[must_use]
    pub fn label_names(&self) -> Vec<String> {
        self.labels.iter().map(|l| l.name.clone()).collect()
    }
}

#[derive(Debug, Deserialize)]
struct CommentUser {
    #[serde(default)]
    login: Option<String>,
}

/// A comment as returned by the issue comments endpoint.
#[derive(Debug, Deserialize)]
struct RawComment {
    #[serde(default)]
    user: Option<CommentUser>,
    #[serde(default)]
    body: Option<String>,
}

/// Renders comments as `Comment by {author}:\n{body}` joined by
/// [`COMMENT_SEPARATOR`].
///
/// Comments whose trimmed body is empty are skipped. Bodies are trimmed.
///
/// # Examples
///
/// ```
/// use issuelens_core::format_comments;
///
/// let text = format_comments([("alice", "first"), ("bob", "  "), ("carol", "second")]);
/// assert_eq!(text, "Comment by alice:\nfirst\n---COMMENT---\nComment by carol:\nsecond");
/// ```
#[must_use]
pub fn format_comments<'a>(comments: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    comments
        .into_iter()
        .filter_map(|(author, body)| {
            let body = body.trim();
            (!body.is_empty()).then(|| format!("Comment by {author}:\n{body}"))
        })
        .collect::<Vec<_>>()
        .join(COMMENT_SEPARATOR)
}

/// GitHub REST client.
///
/// Holds the HTTP client (with the request timeout baked in), the API base
/// URL, and the optional token.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: Option<SecretString>,
}

impl GitHubClient {
    /// Creates a client from configuration and an optional token.
    ///
    /// # Errors
    ///
    /// Returns an error if the user agent is not a valid header value or the
    /// HTTP client cannot be built.
    pub fn new(config: &GitHubConfig, token: Option<SecretString>) -> Result<Self, AnalyzerError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| AnalyzerError::Config {
                message: format!("invalid GitHub user agent: {e}"),
            })?,
        );

        let http = Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_seconds))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Returns true if requests carry an `Authorization` header.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.http.get(url);
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("token {}", token.expose_secret())),
            None => request,
        }
    }

    /// Builds `{api_url}/repos/{owner}/{repo}/issues/{number}` with each
    /// segment percent-encoded, so owner and repo can never add query,
    /// fragment, or path components.
    fn issue_url(&self, owner: &str, repo: &str, number: u64) -> Result<Url, AnalyzerError> {
        let invalid = |detail: String| AnalyzerError::Config {
            message: format!("invalid GitHub API URL {:?}: {detail}", self.api_url),
        };

        let mut url = Url::parse(&self.api_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend(["repos", owner, repo, "issues", &number.to_string()]);
        Ok(url)
    }

    /// Fetches issue metadata.
    ///
    /// # Errors
    ///
    /// - `InvalidIssueNumber` if `number < 1` (no request is made)
    /// - `IssueNotFound` on HTTP 404
    /// - `RateLimited` on HTTP 403
    /// - `UpstreamStatus` on any other non-200 status
    /// - `Timeout` / `Connection` on transport failures
    /// - `UpstreamResponse` if the body cannot be decoded
    #[instrument(skip(self), fields(owner = %owner, repo = %repo, number = number))]
    pub async fn fetch_issue(
        &self,
        owner: &str,
        repo: &str,
        number: i64,
    ) -> Result<RawIssue, AnalyzerError> {
        let number = u64::try_from(number)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or(AnalyzerError::InvalidIssueNumber(number))?;

        let url = self.issue_url(owner, repo, number)?;
        debug!(url = %url, "Fetching issue");

        let response = self.get(url.as_str()).send().await.map_err(transport_error)?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                return Err(AnalyzerError::IssueNotFound {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                    number,
                });
            }
            StatusCode::FORBIDDEN => return Err(AnalyzerError::RateLimited),
            status => {
                return Err(AnalyzerError::UpstreamStatus {
                    status: status.as_u16(),
                });
            }
        }

        let issue: RawIssue = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AnalyzerError::Timeout
            } else {
                AnalyzerError::UpstreamResponse {
                    message: e.to_string(),
                }
            }
        })?;

        if issue.is_pull_request() {
            warn!("Issue #{number} is actually a pull request");
        }

        info!(title = %issue.title, comments = issue.comment_count, "Fetched issue");
        Ok(issue)
    }

    /// Fetches and formats the comments at `comments_url`.
    ///
    /// Never fails: any transport error, non-200 status, or undecodable body
    /// is logged and yields an empty string.
    #[instrument(skip(self))]
    pub async fn fetch_comments(&self, comments_url: &str) -> String {
        if comments_url.is_empty() {
            return String::new();
        }

        match self.try_fetch_comments(comments_url).await {
            Ok(formatted) => formatted,
            Err(e) => {
                warn!(error = %e, "Failed to fetch comments");
                String::new()
            }
        }
    }

    async fn try_fetch_comments(&self, comments_url: &str) -> anyhow::Result<String> {
        let response = self.get(comments_url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            anyhow::bail!("status {}", status.as_u16());
        }

        let comments: Vec<RawComment> = response.json().await?;
        let formatted = format_comments(comments.iter().map(|c| {
            (
                c.user
                    .as_ref()
                    .and_then(|u| u.login.as_deref())
                    .unwrap_or("unknown"),
                c.body.as_deref().unwrap_or_default(),
            )
        }));

        debug!(fetched = comments.len(), "Fetched comments");
        Ok(formatted)
    }
}

/// Maps a reqwest send error onto the GitHub error taxonomy.
fn transport_error(err: reqwest::Error) -> AnalyzerError {
    if err.is_timeout() {
        AnalyzerError::Timeout
    } else if err.is_connect() {
        AnalyzerError::Connection {
            message: err.to_string(),
        }
    } else {
        AnalyzerError::Network(err)
    }
}
