//! Mantis Bug Tracker source.
//!
//! This module fetches the issue list from a Mantis instance over its REST API
//! and narrows it down to a single project.

mod error;
mod types;

pub use error::MantisError;
pub use types::{CodeRef, Issue, IssueCollection, Note, Project, User};

use reqwest::header::AUTHORIZATION;
use tracing::{debug, info, info_span, Instrument};

/// Path of the issues endpoint relative to the Mantis base URL.
const ISSUES_PATH: &str = "api/rest/issues";

/// Page size requested so that the whole issue list arrives in one page.
pub const MAX_PAGE_SIZE: u32 = 10_000;

/// Builds the issues endpoint URL from a Mantis base URL.
///
/// The path is appended unless the URL already ends with it; the result
/// always ends with `/`.
#[must_use]
pub fn issues_endpoint(base_url: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    if base.ends_with(ISSUES_PATH) {
        format!("{base}/")
    } else {
        format!("{base}/{ISSUES_PATH}/")
    }
}

/// Fetches every issue visible to `token` from a Mantis instance.
///
/// The token is sent verbatim in the `Authorization` header. Nothing is
/// retried.
///
/// # Errors
///
/// Returns [`MantisError::RemoteFetch`] with the status and body when Mantis
/// answers with a non-success status, and [`MantisError::Http`] when the
/// request or response decoding fails.
pub async fn fetch_issues(
    http: &reqwest::Client,
    base_url: &str,
    token: &str,
) -> Result<IssueCollection, MantisError> {
    let endpoint = issues_endpoint(base_url);
    let span = info_span!("fetch_issues", endpoint = %endpoint);

    async {
        info!("Fetching Mantis issues");

        let page_size = MAX_PAGE_SIZE.to_string();
        let response = http
            .get(&endpoint)
            .header(AUTHORIZATION, token)
            .query(&[("page_size", page_size.as_str()), ("page", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MantisError::RemoteFetch {
                status: status.as_u16(),
                body,
            });
        }

        let collection: IssueCollection = response.json().await?;
        info!(count = collection.len(), "Fetched Mantis issues");
        Ok(collection)
    }
    .instrument(span)
    .await
}

/// Keeps only the issues whose project name equals `project` exactly.
///
/// `None` or an empty name returns the collection unchanged.
#[must_use]
pub fn filter_by_project(issues: IssueCollection, project: Option<&str>) -> IssueCollection {
    let Some(project) = project.filter(|name| !name.is_empty()) else {
        return issues;
    };

    let total = issues.len();
    let filtered = IssueCollection {
        issues: issues
            .issues
            .into_iter()
            .filter(|issue| issue.project.name == project)
            .collect(),
    };
    debug!(
        project,
        total,
        kept = filtered.len(),
        "Filtered issues by project"
    );
    filtered
}
