//! Inter-request rate governing for the sequential strategy
//!
//! Bounded mode carries no explicit governor: the worker-count ceiling is
//! the de facto throttle there.

use std::time::Duration;

/// Fixed inter-request spacing
///
/// The sequential strategy consults this between successive videos (never
/// after the last one). A zero delay is a no-op fast path.
#[derive(Clone, Copy, Debug)]
pub struct RateGovernor {
    delay: Duration,
}

impl RateGovernor {
    /// Create a governor with the given inter-request delay
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The configured inter-request delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Suspend the caller for one inter-request interval
    pub async fn wait(&self) {
        // Fast path: no spacing configured
        if self.delay.is_zero() {
            return;
        }
        tokio::time::sleep(self.delay).await;
    }
}
