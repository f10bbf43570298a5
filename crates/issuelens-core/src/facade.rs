// SPDX-License-Identifier: Apache-2.0

//! Transport-agnostic entry points.
//!
//! The HTTP server (or any other front end) builds clients once at startup and
//! calls these functions per request. Data-retrieval failures propagate;
//! analysis failures are absorbed by the fallback classifier.

use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::ai::build_prompt;
use crate::ai::provider::AiProvider;
use crate::ai::types::{IssueAnalysis, IssueDetails};
use crate::analysis::{NormalizeOutcome, classify, normalize_outcome};
use crate::error::AnalyzerError;
use crate::github::issues::GitHubClient;
use crate::github::parse_repo_url;

/// Prompt used by the health probe.
const PROBE_PROMPT: &str = "Hello";

/// A request to analyze one issue.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    /// Repository URL in any accepted form (see [`parse_repo_url`]).
    pub repo_url: String,
    /// Issue number; must be at least 1.
    pub issue_number: i64,
}

/// Fetches an issue, asks the model to analyze it, and returns a validated result.
///
/// Steps run strictly in sequence: parse the URL, fetch the issue, fetch
/// comments (only when the issue reports any), build the prompt, generate,
/// normalize. Input errors are reported before any network call.
///
/// # Errors
///
/// Returns URL, issue-number, and GitHub retrieval errors. Model failures are
/// never returned; they produce a fallback analysis instead.
#[instrument(skip_all, fields(repo_url = %request.repo_url, issue_number = request.issue_number))]
pub async fn analyze_issue(
    github: &GitHubClient,
    ai: &dyn AiProvider,
    request: &AnalyzeRequest,
) -> crate::Result<IssueAnalysis> {
    let (owner, repo) = parse_repo_url(&request.repo_url)?;
    if request.issue_number < 1 {
        return Err(AnalyzerError::InvalidIssueNumber(request.issue_number));
    }

    let raw = github.fetch_issue(&owner, &repo, request.issue_number).await?;

    let comments = if raw.comment_count > 0 {
        github.fetch_comments(&raw.comments_url).await
    } else {
        String::new()
    };

    let issue = IssueDetails::builder()
        .owner(owner)
        .repo(repo)
        .number(request.issue_number.unsigned_abs())
        .labels(raw.label_names())
        .title(raw.title)
        .body(raw.body.unwrap_or_default())
        .state(raw.state)
        .comments(comments)
        .build();

    let prompt = build_prompt(
        &issue.title,
        &issue.body,
        &issue.comments,
        &issue.labels,
        &issue.state,
    );

    let outcome = match ai.generate(&prompt).await {
        Ok(text) => normalize_outcome(&text, &issue.title, &issue.body, &issue.labels),
        Err(e) => {
            warn!(error = %e, "AI generation failed, using fallback analysis");
            NormalizeOutcome::FallenBack {
                analysis: classify(&issue.title, &issue.body, &issue.labels),
                reason: e.to_string(),
            }
        }
    };

    info!(
        owner = %issue.owner,
        repo = %issue.repo,
        number = issue.number,
        fallback = outcome.is_fallback(),
        issue_type = %outcome.analysis().issue_type,
        "Analysis complete"
    );

    Ok(outcome.into_analysis())
}

/// Probes the model with a trivial prompt. Returns `true` if it produced text.
#[instrument(skip(ai), fields(provider = %ai.name()))]
pub async fn probe_ai(ai: &dyn AiProvider) -> bool {
    match ai.generate(PROBE_PROMPT).await {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "AI health probe failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::GeminiClient;
    use crate::ai::types::IssueType;
    use crate::config::{AiConfig, GitHubConfig};
    use crate::error::ErrorCategory;
    use secrecy::SecretString;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const AI_PATH: &str = "/v1beta/openai/chat/completions";

    fn clients(github: &MockServer, ai: &MockServer) -> (GitHubClient, GeminiClient) {
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
        (
            GitHubClient::new(&gh_config, None).unwrap(),
            GeminiClient::new(&ai_config, SecretString::from("k".to_string())).unwrap(),
        )
    }

    fn request(repo_url: &str, issue_number: i64) -> AnalyzeRequest {
        AnalyzeRequest {
            repo_url: repo_url.to_string(),
            issue_number,
        }
    }

    async fn mount_issue(server: &MockServer, comments: u64) {
        Mock::given(method("GET"))
            .and(path("/repos/acme/app/issues/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "title": "Bug: login broken",
                "body": "Clicking login does nothing",
                "state": "open",
                "labels": [{"name": "auth"}],
                "comments": comments,
                "comments_url": format!("{}/repos/acme/app/issues/7/comments", server.uri()),
            })))
            .mount(server)
            .await;
    }

    fn ai_reply(content: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        }))
    }

    #[tokio::test]
    async fn test_analyze_issue_returns_model_analysis() {
        let github = MockServer::start().await;
        let ai = MockServer::start().await;
        mount_issue(&github, 1).await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/app/issues/7/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"user": {"login": "bob"}, "body": "Same on Firefox"}
            ])))
            .expect(1)
            .mount(&github)
            .await;
        Mock::given(method("POST"))
            .and(path(AI_PATH))
            .and(body_string_contains("Same on Firefox"))
            .respond_with(ai_reply(
                r#"{"summary":"Login button is unresponsive","type":"bug","priority_score":"4 - Blocks login","suggested_labels":["bug","auth"],"potential_impact":"Users cannot log in"}"#,
            ))
            .expect(1)
            .mount(&ai)
            .await;

        let (gh, gemini) = clients(&github, &ai);
        let analysis = analyze_issue(&gh, &gemini, &request("acme/app", 7))
            .await
            .unwrap();

        assert_eq!(analysis.summary, "Login button is unresponsive");
        assert_eq!(analysis.suggested_labels, vec!["bug", "auth"]);
    }

    #[tokio::test]
    async fn test_comments_skipped_when_count_is_zero() {
        let github = MockServer::start().await;
        let ai = MockServer::start().await;
        mount_issue(&github, 0).await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/app/issues/7/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(0)
            .mount(&github)
            .await;
        Mock::given(method("POST"))
            .and(body_string_contains("Comments: No comments"))
            .respond_with(ai_reply("not json"))
            .expect(1)
            .mount(&ai)
            .await;

        let (gh, gemini) = clients(&github, &ai);
        let analysis = analyze_issue(&gh, &gemini, &request("acme/app", 7))
            .await
            .unwrap();
        assert_eq!(analysis.issue_type, IssueType::Bug);
    }

    #[tokio::test]
    async fn test_model_failure_falls_back() {
        let github = MockServer::start().await;
        let ai = MockServer::start().await;
        mount_issue(&github, 0).await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&ai)
            .await;

        let (gh, gemini) = clients(&github, &ai);
        let analysis = analyze_issue(&gh, &gemini, &request("https://github.com/acme/app", 7))
            .await
            .unwrap();

        assert_eq!(analysis.issue_type, IssueType::Bug);
        assert_eq!(analysis.summary, "Issue regarding: Bug: login broken");
        assert_eq!(analysis.suggested_labels, vec!["auth"]);
    }

    #[tokio::test]
    async fn test_invalid_input_makes_no_requests() {
        let github = MockServer::start().await;
        let ai = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&github)
            .await;

        let (gh, gemini) = clients(&github, &ai);
        for req in [request("acme/app", 0), request("acme/app", -3), request("nope", 7)] {
            let err = analyze_issue(&gh, &gemini, &req).await.unwrap_err();
            assert_eq!(err.category(), ErrorCategory::InvalidInput);
        }
    }

    #[tokio::test]
    async fn test_github_not_found_propagates() {
        let github = MockServer::start().await;
        let ai = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&github)
            .await;
        Mock::given(method("POST"))
            .respond_with(ai_reply("unused"))
            .expect(0)
            .mount(&ai)
            .await;

        let (gh, gemini) = clients(&github, &ai);
        let err = analyze_issue(&gh, &gemini, &request("acme/app", 7))
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[tokio::test]
    async fn test_probe_ai() {
        let github = MockServer::start().await;
        let ai = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("Hello"))
            .respond_with(ai_reply("Hi"))
            .mount(&ai)
            .await;

        let (_, gemini) = clients(&github, &ai);
        assert!(probe_ai(&gemini).await);

        ai.reset().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&ai)
            .await;
        assert!(!probe_ai(&gemini).await);
    }
}
