//! Replication error types.

use super::ReplicationResult;
use crate::issues::IssueError;
use crate::templates::TemplateError;
use thiserror::Error;

/// Cause of a replication failure.
#[derive(Debug, Error)]
pub enum ReplicationFailure {
    /// A GitHub write failed.
    #[error(transparent)]
    Write(#[from] IssueError),

    /// The issue body could not be rendered.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Replication stopped at a Mantis issue.
///
/// Issues replicated before the failure remain in GitHub and are listed in
/// `completed`.
#[derive(Debug, Error)]
#[error("Replication of Mantis issue {issue_id} failed: {source}")]
pub struct ReplicationError {
    /// Mantis issue being replicated when the failure occurred.
    pub issue_id: u64,

    /// GitHub issue number, if the issue itself had already been created.
    pub issue_number: Option<u64>,

    /// Issues fully replicated before the failure.
    pub completed: Vec<ReplicationResult>,

    /// Underlying failure.
    #[source]
    pub source: ReplicationFailure,
}

impl ReplicationError {
    /// Returns the HTTP status of a failed GitHub write, if that was the cause.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match &self.source {
            ReplicationFailure::Write(error) => error.status(),
            ReplicationFailure::Template(_) => None,
        }
    }
}
