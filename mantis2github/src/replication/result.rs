//! Replication outcome types.

use crate::issues::{NewIssue, StateReason};
use serde::Serialize;

/// What happened to the GitHub issue's state after its comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CloseOutcome {
    /// The issue was left open.
    LeftOpen,

    /// The issue was closed.
    Closed {
        /// Reason sent with the close request.
        state_reason: StateReason,
    },
}

impl CloseOutcome {
    /// Returns true if the issue was closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed { .. })
    }
}

/// Result of replicating one Mantis issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplicationResult {
    /// Source Mantis issue id.
    pub mantis_id: u64,

    /// Number of the created GitHub issue.
    pub issue_number: u64,

    /// Assignee sent with the issue, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// Ids of the created comments, in note order.
    pub comment_ids: Vec<u64>,

    /// Final state of the GitHub issue.
    pub close: CloseOutcome,
}

/// Everything that would be sent for one Mantis issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuePlan {
    /// Source Mantis issue id.
    pub mantis_id: u64,

    /// Create-issue request body.
    pub issue: NewIssue,

    /// Number of comments that would be created.
    pub comment_count: usize,

    /// Close reason, or `None` if the issue stays open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<StateReason>,
}
