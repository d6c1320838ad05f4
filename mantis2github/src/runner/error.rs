//! Runner error types.

/// Errors that abort a migration run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Fetching issues from Mantis failed.
    #[error(transparent)]
    Mantis(#[from] crate::mantis::MantisError),

    /// Issue body rendering failed.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// Writing to GitHub failed part way through.
    #[error(transparent)]
    Replication(#[from] crate::replication::ReplicationError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// HTTP client initialization errors.
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
