//! Mantis fetch error types.

use thiserror::Error;

/// Errors that can occur while reading from Mantis.
#[derive(Debug, Error)]
pub enum MantisError {
    /// Mantis answered with a non-success status.
    #[error("Mantis returned {status}: {body}")]
    RemoteFetch { status: u16, body: String },

    /// Transport or decoding failure.
    #[error("Mantis request failed: {0}")]
    Http(#[from] reqwest::Error),
}
