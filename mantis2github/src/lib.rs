#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod issues;
pub mod mantis;
pub mod rate_limit;
pub mod replication;
pub mod runner;
pub mod summary;
pub mod templates;
pub mod users;

pub use config::{load_substitutes, ConfigError, MigrationConfig, RepoIdentifier};
pub use issues::{
    build_client, close_issue, create_comment, create_issue, IssueError, NewIssue, StateReason,
};
pub use mantis::{
    fetch_issues, filter_by_project, issues_endpoint, Issue, IssueCollection, MantisError, Note,
    User,
};
pub use rate_limit::Throttle;
pub use replication::{
    close_reason, plan_issue, CloseOutcome, IssuePlan, ReplicationError, ReplicationFailure,
    ReplicationResult, Replicator,
};
pub use runner::{Runner, RunnerError};
pub use summary::RunSummary;
pub use templates::{TemplateError, TemplateRenderer};
pub use users::{extract_users, resolve_substitutes, SubstituteProvider, UserSet};
