//! Orchestrates a Mantis to GitHub migration run.
//!
//! The pipeline is fetch, project filter, user extraction, user
//! substitution, then replication. Substitutes are resolved for every user
//! before the first GitHub call is made.

mod error;

pub use error::RunnerError;

use crate::config::MigrationConfig;
use crate::issues::build_client;
use crate::mantis::{fetch_issues, filter_by_project, IssueCollection};
use crate::replication::{plan_issue, IssuePlan, Replicator};
use crate::summary::RunSummary;
use crate::templates::TemplateRenderer;
use crate::users::{extract_users, resolve_substitutes, SubstituteProvider, UserSet};
use tracing::{info, warn};

/// User agent sent to Mantis.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Orchestrates a full migration run.
pub struct Runner {
    config: MigrationConfig,
    http: reqwest::Client,
    replicator: Replicator,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP or GitHub client cannot be built.
    pub fn new(config: MigrationConfig) -> Result<Self, RunnerError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let octocrab = build_client(&config)?;
        let replicator = Replicator::new(octocrab, &config);
        Ok(Self {
            config,
            http,
            replicator,
        })
    }

    /// Uses a custom issue body renderer.
    pub fn with_renderer(mut self, renderer: TemplateRenderer) -> Self {
        self.replicator = self.replicator.with_renderer(renderer);
        self
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Fetches and filters the issues to migrate.
    ///
    /// # Errors
    ///
    /// Returns an error if the Mantis request fails.
    pub async fn load_issues(&self) -> Result<(usize, IssueCollection), RunnerError> {
        let fetched = fetch_issues(
            &self.http,
            self.config.mantis_url(),
            self.config.mantis_token(),
        )
        .await?;
        let total = fetched.len();

        let selected = filter_by_project(fetched, self.config.project());
        info!(
            fetched = total,
            selected = selected.len(),
            project = self.config.project().unwrap_or("<all>"),
            "Selected issues"
        );
        Ok((total, selected))
    }

    /// Executes the full migration.
    ///
    /// `substitutes` is asked once per extracted user, before any GitHub
    /// call is made.
    ///
    /// # Errors
    ///
    /// Returns the first failure. Issues created before it remain in GitHub;
    /// see [`crate::replication::ReplicationError::completed`].
    pub async fn run<P>(&self, substitutes: &mut P) -> Result<RunSummary, RunnerError>
    where
        P: SubstituteProvider + ?Sized,
    {
        let mut summary = RunSummary::new(self.config.dry_run());

        let (fetched, issues) = self.load_issues().await?;
        summary.issues_fetched = fetched;
        summary.issues_selected = issues.len();

        if issues.is_empty() {
            warn!("No issues to migrate");
            if summary.dry_run {
                summary.selected = Some(issues);
            }
            return Ok(summary);
        }

        let users = resolve_substitutes(extract_users(&issues), substitutes);
        summary.users_found = users.len();
        summary.users_substituted = users.substituted_count();

        if self.config.dry_run() {
            summary.plans = self.plan(&issues, &users)?;
            summary.selected = Some(issues);
            info!(count = summary.plans.len(), "Dry run complete");
            return Ok(summary);
        }

        let results = self.replicator.replicate_issues(&issues, &users).await?;
        for result in &results {
            summary.record_result(result);
        }
        summary.results = results;

        Ok(summary)
    }

    /// Builds the requests a live run would send, without sending them.
    ///
    /// # Errors
    ///
    /// Returns an error if an issue body cannot be rendered.
    pub fn plan(
        &self,
        issues: &IssueCollection,
        users: &UserSet,
    ) -> Result<Vec<IssuePlan>, RunnerError> {
        issues
            .issues
            .iter()
            .map(|issue| {
                plan_issue(issue, users, self.replicator.renderer()).map_err(RunnerError::from)
            })
            .collect()
    }
}
