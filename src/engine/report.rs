//! Outcome aggregation for a single run
//!
//! The builder is the run's only mutable accumulator. Both strategies feed
//! it from a single consumer (the sequential loop itself, or the bounded
//! pool's results channel), so no locking is needed — synchronization is
//! the channel, not a mutex.

use crate::types::{Event, Outcome, ResolvedVideo, RunReport};
use tokio::sync::broadcast;

/// Accumulates per-item outcomes into a [`RunReport`]
///
/// Outcomes are appended in the order they arrive, which in bounded mode is
/// completion order, not admission order. At every point
/// `recorded() == resolved + failed`, so a cancelled run finishes into a
/// consistent partial report.
pub(crate) struct ReportBuilder {
    /// Entries admitted to the run (denominator for progress events)
    expected: usize,
    resolved: Vec<ResolvedVideo>,
    failed_titles: Vec<String>,
    events: broadcast::Sender<Event>,
}

impl ReportBuilder {
    /// Create a builder expecting `expected` outcomes
    pub(crate) fn new(expected: usize, events: broadcast::Sender<Event>) -> Self {
        Self {
            expected,
            resolved: Vec::new(),
            failed_titles: Vec::new(),
            events,
        }
    }

    /// Record one terminal outcome
    pub(crate) fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Resolved { entry, link } => {
                let _ = self.events.send(Event::Resolved {
                    id: entry.id.clone(),
                    title: entry.title.clone(),
                    resolution: link.resolution.clone(),
                    size_bytes: link.size_bytes,
                });
                self.resolved.push(ResolvedVideo { entry, link });
            }
            Outcome::Failed { entry, reason } => {
                let _ = self.events.send(Event::ResolveFailed {
                    id: entry.id.clone(),
                    title: entry.title.clone(),
                    error: reason,
                });
                self.failed_titles.push(entry.title);
            }
        }

        let _ = self.events.send(Event::Progress {
            completed: self.recorded(),
            total: self.expected,
        });
    }

    /// Outcomes recorded so far
    pub(crate) fn recorded(&self) -> usize {
        self.resolved.len() + self.failed_titles.len()
    }

    /// Finalize into a report
    ///
    /// Must only be called once every admitted item has reported; `total`
    /// counts recorded outcomes, so a cancelled run yields `total` below the
    /// input length while keeping the resolved-plus-failed invariant.
    pub(crate) fn finish(self) -> RunReport {
        RunReport {
            total: self.recorded() as u32,
            resolved: self.resolved,
            failed_titles: self.failed_titles,
            errors: Vec::new(),
        }
    }
}
