//! Bounded strategy: a worker pool with a hard concurrency ceiling
//!
//! Admission runs in input order against a semaphore sized to the worker
//! count, so at most `workers` resolutions are in flight at any instant —
//! a hard ceiling, not a hint. As soon as a slot frees, the next pending
//! entry is admitted. Outcomes flow back over an mpsc channel to a single
//! consumer, which makes the aggregator lock-free; arrival order is
//! completion order.
//!
//! On cancellation, admission stops immediately. In-flight resolutions are
//! never aborted mid-call: they finish naturally and their outcomes are
//! kept, so the partial report only ever contains fully terminal outcomes.

use super::PlaylistGrabber;
use super::report::ReportBuilder;
use crate::retry::{self, ConstantBackoff};
use crate::types::{Event, Outcome, RunReport, VideoEntry};
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};

impl PlaylistGrabber {
    /// Resolve entries with at most `workers` concurrent resolutions
    ///
    /// `workers` must already be clamped by the coordinator.
    pub(crate) async fn run_bounded(&self, entries: Vec<VideoEntry>, workers: usize) -> RunReport {
        let total = entries.len();
        let semaphore = Arc::new(Semaphore::new(workers));
        let (outcome_tx, mut outcome_rx) = mpsc::channel::<Outcome>(workers.max(1));

        tracing::debug!(total, workers, "Starting bounded resolution");

        let admission = {
            let grabber = self.clone();
            let semaphore = Arc::clone(&semaphore);
            let outcome_tx = outcome_tx.clone();

            tokio::spawn(async move {
                let mut admitted = 0usize;

                for entry in entries {
                    let permit = tokio::select! {
                        biased;
                        _ = grabber.cancel_token.cancelled() => break,
                        permit = Arc::clone(&semaphore).acquire_owned() => match permit {
                            Ok(permit) => permit,
                            // Semaphore closed — cannot happen while we hold
                            // an Arc to it, but stop admitting rather than panic
                            Err(_) => break,
                        },
                    };

                    admitted += 1;

                    let resolver = Arc::clone(&grabber.resolver);
                    let retry_config = grabber.config.retry;
                    let quality = grabber.config.quality;
                    let backoff = ConstantBackoff::from_request_delay(
                        grabber.config.request_delay,
                        retry_config.jitter,
                    );
                    let events = grabber.event_tx.clone();
                    let tx = outcome_tx.clone();

                    tokio::spawn(async move {
                        // Holding the permit for the whole resolution is what
                        // enforces the ceiling
                        let _permit = permit;

                        let _ = events.send(Event::Resolving {
                            id: entry.id.clone(),
                            title: entry.title.clone(),
                        });

                        let outcome = retry::resolve_with_retry(
                            resolver.as_ref(),
                            &entry,
                            quality,
                            &retry_config,
                            &backoff,
                            &events,
                        )
                        .await;

                        let _ = tx.send(outcome).await;
                    });
                }

                admitted
            })
        };

        // Drop our sender so the channel closes once every admitted entry's
        // task has reported
        drop(outcome_tx);

        let mut builder = ReportBuilder::new(total, self.event_tx.clone());
        while let Some(outcome) = outcome_rx.recv().await {
            builder.record(outcome);
        }

        match admission.await {
            Ok(admitted) => {
                tracing::debug!(
                    admitted,
                    completed = builder.recorded(),
                    "Bounded resolution drained"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "Admission task panicked");
            }
        }

        builder.finish()
    }
}
