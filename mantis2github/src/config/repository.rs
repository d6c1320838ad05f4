//! Target repository identifier.

use crate::config::ConfigError;
use serde::Serialize;
use std::fmt;

/// A GitHub repository in `owner/repo` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoIdentifier {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,
}

impl RepoIdentifier {
    /// Creates an identifier from its parts, rejecting empty components.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRepository`] if either part is blank or
    /// contains a `/`.
    pub fn new(owner: &str, name: &str) -> Result<Self, ConfigError> {
        let owner = owner.trim();
        let name = name.trim().trim_end_matches(".git");
        if owner.is_empty() || name.is_empty() || owner.contains('/') || name.contains('/') {
            return Err(ConfigError::InvalidRepository {
                value: format!("{owner}/{name}"),
            });
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Parses a repository identifier.
    ///
    /// Supports formats:
    /// - owner/repo
    /// - https://github.com/owner/repo
    /// - git@github.com:owner/repo.git
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRepository`] for anything else.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let value = value.trim();
        let invalid = || ConfigError::InvalidRepository {
            value: value.to_string(),
        };

        let path = if value.starts_with("https://") || value.starts_with("http://") {
            let url = url::Url::parse(value).map_err(|_| invalid())?;
            url.path().trim_matches('/').to_string()
        } else if let Some(rest) = value.strip_prefix("git@") {
            rest.split_once(':').ok_or_else(invalid)?.1.to_string()
        } else {
            value.to_string()
        };

        match path.split('/').collect::<Vec<_>>().as_slice() {
            [owner, name] => Self::new(owner, name).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }

    /// Returns the `owner/repo` form.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
