//! Sequential strategy: one entry at a time, in playlist order
//!
//! The rate governor spaces successive requests; retries inside a single
//! entry use the shorter retry backoff instead. Cancellation is observed
//! between entries and during the inter-request pause, never mid-call.

use super::PlaylistGrabber;
use super::report::ReportBuilder;
use crate::rate::RateGovernor;
use crate::retry::{self, ConstantBackoff};
use crate::types::{Event, RunReport, VideoEntry};

impl PlaylistGrabber {
    /// Resolve entries one at a time in input order
    pub(crate) async fn run_sequential(&self, entries: Vec<VideoEntry>) -> RunReport {
        let total = entries.len();
        let governor = RateGovernor::new(self.config.request_delay);
        let backoff =
            ConstantBackoff::from_request_delay(self.config.request_delay, self.config.retry.jitter);

        let mut builder = ReportBuilder::new(total, self.event_tx.clone());

        for (index, entry) in entries.into_iter().enumerate() {
            if self.cancel_token.is_cancelled() {
                break;
            }

            let _ = self.event_tx.send(Event::Resolving {
                id: entry.id.clone(),
                title: entry.title.clone(),
            });

            let outcome = retry::resolve_with_retry(
                self.resolver.as_ref(),
                &entry,
                self.config.quality,
                &self.config.retry,
                &backoff,
                &self.event_tx,
            )
            .await;

            builder.record(outcome);

            // Space out requests, but not after the last entry, and give
            // cancellation a chance to cut the pause short
            if index + 1 < total {
                tokio::select! {
                    _ = self.cancel_token.cancelled() => break,
                    _ = governor.wait() => {}
                }
            }
        }

        builder.finish()
    }
}
