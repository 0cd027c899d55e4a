//! Per-video retry logic with pluggable backoff
//!
//! The retry controller wraps a single resolver call with a bounded attempt
//! budget. Every resolver error counts as a failed attempt — resolution
//! failures are dominated by permanently unavailable videos, so there is no
//! transient/permanent classification here — and only total exhaustion
//! produces a terminal per-item failure. Nothing escapes as an error.
//!
//! Backoff between attempts is a short constant pause (by default half the
//! configured inter-request delay), kept behind the [`BackoffPolicy`] trait
//! so a stricter strategy can be substituted without touching the retry
//! loop.

use crate::config::RetryConfig;
use crate::resolver::LinkResolver;
use crate::types::{Event, Outcome, Quality, VideoEntry};
use rand::Rng;
use std::time::Duration;
use tokio::sync::broadcast;

/// Pause schedule between failed attempts
pub trait BackoffPolicy: Send + Sync {
    /// Pause to apply after the given failed attempt (1-based)
    fn pause(&self, attempt: u32) -> Duration;
}

/// Constant, non-escalating backoff with optional jitter
#[derive(Clone, Copy, Debug)]
pub struct ConstantBackoff {
    delay: Duration,
    jitter: bool,
}

impl ConstantBackoff {
    /// Create a constant backoff with an explicit pause
    pub fn new(delay: Duration, jitter: bool) -> Self {
        Self { delay, jitter }
    }

    /// Derive the backoff from the inter-request delay (half of it)
    ///
    /// Retries wait a shorter pause than the regular request spacing: the
    /// failed call already consumed service time.
    pub fn from_request_delay(request_delay: Duration, jitter: bool) -> Self {
        Self::new(request_delay / 2, jitter)
    }
}

impl BackoffPolicy for ConstantBackoff {
    fn pause(&self, _attempt: u32) -> Duration {
        if self.jitter {
            add_jitter(self.delay)
        } else {
            self.delay
        }
    }
}

/// Resolve one entry with bounded re-attempts
///
/// Calls the resolver up to `config.max_attempts` times (treated as at
/// least 1), stopping at the first success. Between attempts — never after
/// the final one — the backoff policy's pause is applied and a
/// [`Event::Retrying`] is broadcast. The returned [`Outcome`] is terminal:
/// the entry is never retried again this run.
pub async fn resolve_with_retry(
    resolver: &dyn LinkResolver,
    entry: &VideoEntry,
    quality: Quality,
    config: &RetryConfig,
    backoff: &dyn BackoffPolicy,
    events: &broadcast::Sender<Event>,
) -> Outcome {
    let max_attempts = config.max_attempts.max(1);
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match resolver.resolve(entry, quality).await {
            Ok(link) => {
                if attempt > 1 {
                    tracing::info!(
                        video_id = %entry.id,
                        attempts = attempt,
                        "Resolution succeeded after retry"
                    );
                }
                return Outcome::Resolved {
                    entry: entry.clone(),
                    link,
                };
            }
            Err(e) => {
                tracing::warn!(
                    video_id = %entry.id,
                    error = %e,
                    attempt,
                    max_attempts,
                    "Resolution attempt failed"
                );
                last_error = Some(e);

                if attempt < max_attempts {
                    let _ = events.send(Event::Retrying {
                        id: entry.id.clone(),
                        attempt,
                        max_attempts,
                    });
                    tokio::time::sleep(backoff.pause(attempt)).await;
                }
            }
        }
    }

    let diagnostic = last_error
        .map(|e| e.to_string())
        .unwrap_or_else(|| "unknown error".to_string());

    tracing::error!(
        video_id = %entry.id,
        attempts = max_attempts,
        error = %diagnostic,
        "Resolution exhausted retries"
    );

    Outcome::Failed {
        entry: entry.clone(),
        reason: format!(
            "resolution exhausted retries after {} attempts: {}",
            max_attempts, diagnostic
        ),
    }
}

/// Add random jitter to a delay
///
/// Jitter is uniformly distributed between 0% and 100% of the delay, so the
/// actual pause lands between `delay` and `2 * delay`.
fn add_jitter(delay: Duration) -> Duration {
    let mut rng = rand::thread_rng();
    let jitter_factor: f64 = rng.gen_range(0.0..=1.0);
    Duration::from_secs_f64(delay.as_secs_f64() * (1.0 + jitter_factor))
}
