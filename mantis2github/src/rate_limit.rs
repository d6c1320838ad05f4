//! Rate limiting for GitHub API calls.
//!
//! GitHub's secondary rate limits punish bursts of content-creating requests,
//! so every write is preceded by a fixed pause. There is no adaptive backoff
//! and nothing is retried.

use std::time::Duration;
use tracing::trace;

/// Fixed delay applied before each outbound GitHub API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    interval: Duration,
}

impl Throttle {
    /// Creates a throttle that pauses for `interval` on every call.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Returns the configured interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Suspends the caller for the configured interval.
    pub async fn wait(&self) {
        if self.interval.is_zero() {
            return;
        }
        trace!(interval_ms = self.interval.as_millis() as u64, "Throttling");
        tokio::time::sleep(self.interval).await;
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_THROTTLE)
    }
}
