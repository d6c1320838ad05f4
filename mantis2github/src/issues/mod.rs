//! GitHub issue writes.
//!
//! This module creates issues and comments in the target repository and
//! closes issues with a state reason. Every call is a single REST request;
//! nothing is retried and every non-success response surfaces as
//! [`IssueError::RemoteWrite`] with its status and raw body.

mod error;
mod status;

pub use error::IssueError;
pub use status::StateReason;

use crate::config::{MigrationConfig, RepoIdentifier};
use http::header::{HeaderName, ACCEPT};
use http::StatusCode;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// REST API version pinned on every request.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// Builds an authenticated GitHub client for the configured API base.
///
/// Retries are disabled so that a failed write aborts the run.
///
/// # Errors
///
/// Returns an error if the base URL is rejected or the client cannot be built.
pub fn build_client(config: &MigrationConfig) -> Result<Octocrab, octocrab::Error> {
    Octocrab::builder()
        .personal_token(config.github_token().to_string())
        .base_uri(config.github_api_base())?
        .add_retry_config(RetryConfig::None)
        .add_header(ACCEPT, "application/vnd.github+json".to_string())
        .add_header(
            HeaderName::from_static("x-github-api-version"),
            GITHUB_API_VERSION.to_string(),
        )
        .build()
}

/// Request body for creating an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<String>,
}

#[derive(Serialize)]
struct NewComment<'a> {
    body: &'a str,
}

#[derive(Serialize)]
struct CloseIssue {
    state: &'static str,
    state_reason: StateReason,
}

#[derive(Deserialize)]
struct CreatedIssue {
    number: u64,
}

#[derive(Deserialize)]
struct CreatedComment {
    id: u64,
}

#[derive(Deserialize)]
struct UpdatedIssue {
    number: u64,
}

/// Creates an issue and returns its number.
///
/// # Errors
///
/// Returns [`IssueError`] if GitHub rejects the request.
pub async fn create_issue(
    octocrab: &Octocrab,
    repository: &RepoIdentifier,
    issue: &NewIssue,
) -> Result<u64, IssueError> {
    let route = format!("/repos/{}/{}/issues", repository.owner, repository.name);
    debug!(route = %route, title = %issue.title, "Creating issue");

    let response = octocrab._post(route, Some(issue)).await?;
    let status = response.status();
    let text = octocrab.body_to_string(response).await?;
    let created: CreatedIssue = parse_response(status, text)?;
    Ok(created.number)
}

/// Adds a comment to an issue and returns the comment id.
///
/// # Errors
///
/// Returns [`IssueError`] if GitHub rejects the request.
pub async fn create_comment(
    octocrab: &Octocrab,
    repository: &RepoIdentifier,
    issue_number: u64,
    body: &str,
) -> Result<u64, IssueError> {
    let route = format!(
        "/repos/{}/{}/issues/{issue_number}/comments",
        repository.owner, repository.name
    );
    debug!(route = %route, "Creating comment");

    let response = octocrab._post(route, Some(&NewComment { body })).await?;
    let status = response.status();
    let text = octocrab.body_to_string(response).await?;
    let created: CreatedComment = parse_response(status, text)?;
    Ok(created.id)
}

/// Closes an issue with the given state reason.
///
/// # Errors
///
/// Returns [`IssueError`] if GitHub rejects the request.
pub async fn close_issue(
    octocrab: &Octocrab,
    repository: &RepoIdentifier,
    issue_number: u64,
    reason: StateReason,
) -> Result<(), IssueError> {
    let route = format!(
        "/repos/{}/{}/issues/{issue_number}",
        repository.owner, repository.name
    );
    debug!(route = %route, state_reason = %reason, "Closing issue");

    let body = CloseIssue {
        state: "closed",
        state_reason: reason,
    };
    let response = octocrab._patch(route, Some(&body)).await?;
    let status = response.status();
    let text = octocrab.body_to_string(response).await?;
    let updated: UpdatedIssue = parse_response(status, text)?;
    debug!(issue_number = updated.number, "Issue closed");
    Ok(())
}

/// Decodes a write response, keeping status and raw body of any non-success.
fn parse_response<R: DeserializeOwned>(
    status: StatusCode,
    body: String,
) -> Result<R, IssueError> {
    if !status.is_success() {
        return Err(IssueError::RemoteWrite {
            status: status.as_u16(),
            body,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_json_error_keeps_status_and_body() {
        let result: Result<CreatedIssue, _> =
            parse_response(StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>".to_string());

        match result {
            Err(IssueError::RemoteWrite { status, body }) => {
                assert_eq!(status, 502);
                assert_eq!(body, "<html>Bad Gateway</html>");
            }
            _ => panic!("expected remote write error"),
        }
    }

    #[test]
    fn empty_error_body_is_kept() {
        let result: Result<CreatedComment, _> =
            parse_response(StatusCode::SERVICE_UNAVAILABLE, String::new());
        assert_eq!(result.err().and_then(|e| e.status()), Some(503));
    }

    #[test]
    fn success_body_is_decoded() {
        let created: CreatedIssue =
            parse_response(StatusCode::CREATED, r#"{"number": 12, "title": "x"}"#.to_string())
                .unwrap();
        assert_eq!(created.number, 12);
    }

    #[test]
    fn undecodable_success_body_is_decode_error() {
        let result: Result<CreatedIssue, _> =
            parse_response(StatusCode::OK, "not json".to_string());
        assert!(matches!(result, Err(IssueError::Decode(_))));
    }
}
