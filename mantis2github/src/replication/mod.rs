//! Replication of Mantis issues into GitHub.
//!
//! Issues are processed strictly one after another. For each issue the
//! GitHub issue is created first, then every note becomes a comment in its
//! original order, and finally the issue is closed if its Mantis status says
//! so. Every GitHub call is preceded by the [`Throttle`] delay. The first
//! failed call stops the whole run; whatever was created before it stays.

mod error;
mod resolution;
mod result;

pub use error::{ReplicationError, ReplicationFailure};
pub use resolution::{close_reason, RESOLUTION_FIXED, STATUS_SUSPENDED, STATUS_WONT_FIX};
pub use result::{CloseOutcome, IssuePlan, ReplicationResult};

use crate::config::{MigrationConfig, RepoIdentifier};
use crate::issues::{self, IssueError, NewIssue};
use crate::mantis::{Issue, IssueCollection, Note};
use crate::rate_limit::Throttle;
use crate::templates::{TemplateError, TemplateRenderer};
use crate::users::UserSet;
use octocrab::Octocrab;
use tracing::{debug, info, info_span, warn, Instrument};

/// Builds the create-issue request and close decision for `issue`.
///
/// The handler's substitute, if any, becomes the sole assignee.
///
/// # Errors
///
/// Returns an error if the issue body cannot be rendered.
pub fn plan_issue(
    issue: &Issue,
    users: &UserSet,
    renderer: &TemplateRenderer,
) -> Result<IssuePlan, TemplateError> {
    let body = renderer.render_issue_body(issue, users)?;

    let assignees = match &issue.handler {
        Some(handler) => match users.substitute_for(handler.id) {
            Some(login) => vec![login.to_string()],
            None => {
                warn!(
                    mantis_id = issue.id,
                    handler = %handler.name,
                    "Handler has no substitute, leaving issue unassigned"
                );
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    Ok(IssuePlan {
        mantis_id: issue.id,
        issue: NewIssue {
            title: issue.summary.clone(),
            body,
            assignees,
        },
        comment_count: issue.notes.len(),
        close: close_reason(issue.status_code(), issue.resolution_code()),
    })
}

/// Replicates issues, comments and close state into one GitHub repository.
pub struct Replicator {
    octocrab: Octocrab,
    repository: RepoIdentifier,
    renderer: TemplateRenderer,
    throttle: Throttle,
}

impl Replicator {
    /// Creates a replicator writing to the configured repository.
    pub fn new(octocrab: Octocrab, config: &MigrationConfig) -> Self {
        Self {
            octocrab,
            repository: config.repository().clone(),
            renderer: TemplateRenderer::new(),
            throttle: Throttle::new(config.throttle()),
        }
    }

    /// Uses a custom issue body renderer.
    pub fn with_renderer(mut self, renderer: TemplateRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Returns the issue body renderer.
    pub fn renderer(&self) -> &TemplateRenderer {
        &self.renderer
    }

    /// Replicates every issue in order, one at a time.
    ///
    /// `users` must already carry their substitutes.
    ///
    /// # Errors
    ///
    /// Returns [`ReplicationError`] on the first failure; no later issue is
    /// touched.
    pub async fn replicate_issues(
        &self,
        issues: &IssueCollection,
        users: &UserSet,
    ) -> Result<Vec<ReplicationResult>, ReplicationError> {
        info!(
            count = issues.len(),
            repo = %self.repository,
            "Replicating issues"
        );

        let mut results = Vec::with_capacity(issues.len());
        for issue in &issues.issues {
            let span = info_span!("replicate_issue", mantis_id = issue.id);
            let mut issue_number = None;

            let outcome = self
                .replicate_issue(issue, users, &mut issue_number)
                .instrument(span)
                .await;
            match outcome {
                Ok(result) => results.push(result),
                Err(source) => {
                    return Err(ReplicationError {
                        issue_id: issue.id,
                        issue_number,
                        completed: results,
                        source,
                    });
                }
            }
        }

        info!(count = results.len(), "Replication complete");
        Ok(results)
    }

    async fn replicate_issue(
        &self,
        issue: &Issue,
        users: &UserSet,
        issue_number: &mut Option<u64>,
    ) -> Result<ReplicationResult, ReplicationFailure> {
        let plan = plan_issue(issue, users, &self.renderer)?;

        self.throttle.wait().await;
        let number = issues::create_issue(&self.octocrab, &self.repository, &plan.issue).await?;
        *issue_number = Some(number);
        info!(issue_number = number, "Issue created");

        let comment_ids = self.replicate_comments(&issue.notes, number).await?;
        let close = self.close_if_resolved(issue, number).await?;

        Ok(ReplicationResult {
            mantis_id: issue.id,
            issue_number: number,
            assignee: plan.issue.assignees.into_iter().next(),
            comment_ids,
            close,
        })
    }

    /// Creates one comment per note, in note order.
    ///
    /// Makes no call at all when `notes` is empty.
    ///
    /// # Errors
    ///
    /// Returns the first [`IssueError`]; later notes are not submitted.
    pub async fn replicate_comments(
        &self,
        notes: &[Note],
        issue_number: u64,
    ) -> Result<Vec<u64>, IssueError> {
        let mut comment_ids = Vec::with_capacity(notes.len());
        for note in notes {
            self.throttle.wait().await;
            let comment_id =
                issues::create_comment(&self.octocrab, &self.repository, issue_number, &note.text)
                    .await?;
            debug!(issue_number, comment_id, note_id = note.id, "Comment created");
            comment_ids.push(comment_id);
        }

        if !comment_ids.is_empty() {
            info!(issue_number, count = comment_ids.len(), "Comments created");
        }
        Ok(comment_ids)
    }

    /// Closes the GitHub issue if the Mantis status calls for it.
    ///
    /// # Errors
    ///
    /// Returns [`IssueError`] if the close request fails.
    pub async fn close_if_resolved(
        &self,
        issue: &Issue,
        issue_number: u64,
    ) -> Result<CloseOutcome, IssueError> {
        let Some(state_reason) = close_reason(issue.status_code(), issue.resolution_code()) else {
            debug!(
                issue_number,
                status = issue.status_code(),
                "Leaving issue open"
            );
            return Ok(CloseOutcome::LeftOpen);
        };

        self.throttle.wait().await;
        issues::close_issue(&self.octocrab, &self.repository, issue_number, state_reason).await?;
        info!(issue_number, state_reason = %state_reason, "Issue closed");
        Ok(CloseOutcome::Closed { state_reason })
    }
}
