//! Migration configuration.
//!
//! This module holds the immutable [`MigrationConfig`] value passed into every
//! pipeline stage, the target [`RepoIdentifier`], and loading of batch user
//! substitution files.

mod error;
mod repository;
mod substitutes;

pub use error::ConfigError;
pub use repository::RepoIdentifier;
pub use substitutes::load_substitutes;

use std::time::Duration;

/// Default GitHub REST API base URL.
pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

/// Default delay between consecutive GitHub API calls.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(1000);

/// Configuration for one migration run.
#[derive(Clone)]
pub struct MigrationConfig {
    /// Base URL of the Mantis instance.
    mantis_url: String,
    /// Mantis API token, sent verbatim in the `Authorization` header.
    mantis_token: String,
    /// Mantis project to migrate; `None` migrates every project.
    project: Option<String>,
    /// Target GitHub repository.
    repository: RepoIdentifier,
    /// GitHub token used for all write calls.
    github_token: String,
    /// GitHub REST API base URL.
    github_api_base: String,
    /// Delay before each GitHub API call.
    throttle: Duration,
    /// Whether to preview the migration without writing to GitHub.
    dry_run: bool,
}

impl MigrationConfig {
    /// Creates a new configuration for a run.
    ///
    /// An empty `project` means no project filter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required value is blank or the Mantis URL
    /// does not parse.
    pub fn new(
        mantis_url: &str,
        mantis_token: &str,
        project: &str,
        repository: RepoIdentifier,
        github_token: &str,
    ) -> Result<Self, ConfigError> {
        let mantis_url = required("mantis_url", mantis_url)?;
        url::Url::parse(&mantis_url).map_err(|e| ConfigError::InvalidUrl {
            value: mantis_url.clone(),
            source: e,
        })?;

        let project = project.trim();
        Ok(Self {
            mantis_url,
            mantis_token: required("mantis_token", mantis_token)?,
            project: (!project.is_empty()).then(|| project.to_string()),
            repository,
            github_token: required("github_token", github_token)?,
            github_api_base: DEFAULT_GITHUB_API_BASE.to_string(),
            throttle: DEFAULT_THROTTLE,
            dry_run: false,
        })
    }

    /// Sets a custom GitHub API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL does not parse.
    pub fn with_github_api_base(mut self, api_base: &str) -> Result<Self, ConfigError> {
        let api_base = api_base.trim().trim_end_matches('/');
        url::Url::parse(api_base).map_err(|e| ConfigError::InvalidUrl {
            value: api_base.to_string(),
            source: e,
        })?;
        self.github_api_base = api_base.to_string();
        Ok(self)
    }

    /// Sets the delay applied before each GitHub API call.
    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Enables or disables dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the Mantis base URL.
    pub fn mantis_url(&self) -> &str {
        &self.mantis_url
    }

    /// Returns the Mantis API token.
    pub fn mantis_token(&self) -> &str {
        &self.mantis_token
    }

    /// Returns the project filter, if any.
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    /// Returns the target repository.
    pub fn repository(&self) -> &RepoIdentifier {
        &self.repository
    }

    /// Returns the GitHub token.
    pub fn github_token(&self) -> &str {
        &self.github_token
    }

    /// Returns the GitHub API base URL.
    pub fn github_api_base(&self) -> &str {
        &self.github_api_base
    }

    /// Returns the delay applied before each GitHub API call.
    pub fn throttle(&self) -> Duration {
        self.throttle
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}

impl std::fmt::Debug for MigrationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationConfig")
            .field("mantis_url", &self.mantis_url)
            .field("project", &self.project)
            .field("repository", &self.repository)
            .field("github_api_base", &self.github_api_base)
            .field("throttle", &self.throttle)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

fn required(name: &'static str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::MissingValue { name });
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> RepoIdentifier {
        RepoIdentifier::new("owner", "repo").unwrap()
    }

    #[test]
    fn empty_project_means_no_filter() {
        let config =
            MigrationConfig::new("https://bugs.example.com", "mt", "  ", repo(), "gh").unwrap();
        assert_eq!(config.project(), None);
        assert_eq!(config.github_api_base(), DEFAULT_GITHUB_API_BASE);
        assert_eq!(config.throttle(), DEFAULT_THROTTLE);
        assert!(!config.dry_run());
    }

    #[test]
    fn keeps_project_name() {
        let config =
            MigrationConfig::new("https://bugs.example.com", "mt", "Core", repo(), "gh").unwrap();
        assert_eq!(config.project(), Some("Core"));
    }

    #[test]
    fn rejects_blank_tokens() {
        let result = MigrationConfig::new("https://bugs.example.com", "", "", repo(), "gh");
        assert!(matches!(
            result,
            Err(ConfigError::MissingValue {
                name: "mantis_token"
            })
        ));

        let result = MigrationConfig::new("https://bugs.example.com", "mt", "", repo(), " ");
        assert!(matches!(
            result,
            Err(ConfigError::MissingValue {
                name: "github_token"
            })
        ));
    }

    #[test]
    fn rejects_invalid_mantis_url() {
        let result = MigrationConfig::new("not a url", "mt", "", repo(), "gh");
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn debug_output_hides_tokens() {
        let config =
            MigrationConfig::new("https://bugs.example.com", "secret-mt", "", repo(), "secret-gh")
                .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-mt"));
        assert!(!debug.contains("secret-gh"));
    }

    #[test]
    fn api_base_trailing_slash_is_trimmed() {
        let config = MigrationConfig::new("https://bugs.example.com", "mt", "", repo(), "gh")
            .unwrap()
            .with_github_api_base("http://127.0.0.1:8080/")
            .unwrap();
        assert_eq!(config.github_api_base(), "http://127.0.0.1:8080");
    }
}
