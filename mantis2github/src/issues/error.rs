//! Issue write error types.

use thiserror::Error;

/// Errors that can occur while writing to GitHub.
#[derive(Debug, Error)]
pub enum IssueError {
    /// GitHub answered with a non-success status.
    #[error("GitHub returned {status}: {body}")]
    RemoteWrite { status: u16, body: String },

    /// A success response could not be decoded.
    #[error("Unexpected GitHub response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Transport or client failure.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),
}

impl IssueError {
    /// Returns the HTTP status GitHub answered with, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteWrite { status, .. } => Some(*status),
            Self::Decode(_) | Self::GitHubError(_) => None,
        }
    }
}
