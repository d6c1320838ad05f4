//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while building a migration configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required value was missing or blank.
    #[error("Missing required configuration value: {name}")]
    MissingValue { name: &'static str },

    /// The target repository identifier is not in `owner/repo` form.
    #[error("Invalid repository '{value}': expected owner/repo")]
    InvalidRepository { value: String },

    /// A URL could not be parsed.
    #[error("Invalid URL '{value}': {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse substitutes file '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A substitutes file key is not a Mantis user id.
    #[error("Invalid Mantis user id '{key}' in '{path}'")]
    InvalidUserId { path: String, key: String },
}
