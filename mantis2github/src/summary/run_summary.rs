//! Run summary types.

use crate::mantis::IssueCollection;
use crate::replication::{IssuePlan, ReplicationResult};
use serde::Serialize;

/// Summary of a complete run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Number of issues returned by Mantis.
    pub issues_fetched: usize,

    /// Number of issues left after the project filter.
    pub issues_selected: usize,

    /// Number of distinct users referenced by the selected issues.
    pub users_found: usize,

    /// Number of users with a GitHub substitute.
    pub users_substituted: usize,

    /// Number of GitHub issues created.
    pub issues_created: usize,

    /// Number of GitHub comments created.
    pub comments_created: usize,

    /// Number of GitHub issues closed.
    pub issues_closed: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,

    /// Per-issue results of a live run, in replication order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<ReplicationResult>,

    /// Planned requests of a dry run.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plans: Vec<IssuePlan>,

    /// Issues selected by a dry run, as received from Mantis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<IssueCollection>,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the counters with one replicated issue.
    pub fn record_result(&mut self, result: &ReplicationResult) {
        self.issues_created += 1;
        self.comments_created += result.comment_ids.len();
        if result.close.is_closed() {
            self.issues_closed += 1;
        }
    }
}
