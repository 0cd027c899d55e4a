//! The resolution engine
//!
//! The `PlaylistGrabber` struct and its methods are organized by concern:
//! - [`sequential`] - One-at-a-time strategy with inter-request spacing
//! - [`bounded`] - Worker-pool strategy with a hard concurrency ceiling
//! - [`report`] - Outcome aggregation
//!
//! The engine owns the full run lifecycle: fetch the playlist, resolve
//! every entry under the configured strategy, aggregate outcomes, and hand
//! the resolved links to the output boundary. Individual resolution
//! failures never abort a run; only collaborator failures (playlist fetch,
//! empty input, output write) surface as errors.

mod bounded;
mod report;
mod sequential;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

use crate::config::{Config, ConcurrencyMode, MAX_WORKERS};
use crate::error::{Error, Result};
use crate::output;
use crate::resolver::{LinkResolver, YtDlpResolver};
use crate::source::{PlaylistSource, YtDlpSource};
use crate::types::{Event, Playlist, RunReport, RunSummary, VideoEntry};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Capacity of the event broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// Main engine instance (cloneable - all fields are Arc-wrapped or cheap)
///
/// # Examples
///
/// ```no_run
/// use playlist_grab::{Config, PlaylistGrabber};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let grabber = PlaylistGrabber::new(Config::default())?;
///
///     // Subscribe to progress events
///     let mut events = grabber.subscribe();
///     tokio::spawn(async move {
///         while let Ok(event) = events.recv().await {
///             println!("{:?}", event);
///         }
///     });
///
///     let summary = grabber.run("PLrAXtmErZgOeiKm4sgNOknGvNjby9efdf").await?;
///     println!("{} links resolved", summary.report.resolved_count());
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct PlaylistGrabber {
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
    /// Playlist metadata source (trait object for pluggable implementations)
    pub(crate) source: Arc<dyn PlaylistSource>,
    /// Link resolver (trait object for pluggable implementations)
    pub(crate) resolver: Arc<dyn LinkResolver>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: tokio::sync::broadcast::Sender<Event>,
    /// Cancellation token: stops admission immediately, lets in-flight
    /// resolutions finish naturally
    pub(crate) cancel_token: CancellationToken,
}

impl PlaylistGrabber {
    /// Create an engine backed by the yt-dlp binary
    ///
    /// Validates the configuration (warnings are logged) and discovers the
    /// yt-dlp binary from the configured path or PATH.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for an invalid configuration and
    /// `Error::ExternalTool` if no yt-dlp binary can be found.
    pub fn new(config: Config) -> Result<Self> {
        let (source, resolver) = match &config.resolver.ytdlp_path {
            Some(path) => (
                YtDlpSource::new(path.clone()),
                YtDlpResolver::new(path.clone()),
            ),
            None => {
                let source = YtDlpSource::from_path().ok_or_else(|| {
                    Error::ExternalTool(
                        "yt-dlp not found in PATH; install it or set resolver.ytdlp_path"
                            .to_string(),
                    )
                })?;
                let resolver = YtDlpResolver::from_path().ok_or_else(|| {
                    Error::ExternalTool(
                        "yt-dlp not found in PATH; install it or set resolver.ytdlp_path"
                            .to_string(),
                    )
                })?;
                (source, resolver)
            }
        };

        Self::with_components(config, Arc::new(source), Arc::new(resolver))
    }

    /// Create an engine with injected collaborators
    ///
    /// This is the constructor tests and embedders with custom sources or
    /// resolvers use; [`PlaylistGrabber::new`] delegates here.
    pub fn with_components(
        config: Config,
        source: Arc<dyn PlaylistSource>,
        resolver: Arc<dyn LinkResolver>,
    ) -> Result<Self> {
        for warning in config.validate()? {
            tracing::warn!(warning = %warning, "Configuration warning");
        }

        let (event_tx, _rx) = tokio::sync::broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            config: Arc::new(config),
            source,
            resolver,
            event_tx,
            cancel_token: CancellationToken::new(),
        })
    }

    /// Subscribe to run events
    ///
    /// Events are dropped for subscribers that fall more than the channel
    /// capacity behind; subscribe before starting a run to see everything.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// The engine's cancellation token
    ///
    /// Cancelling it stops admission of new entries immediately; in-flight
    /// resolutions finish naturally and their outcomes are kept.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Request cancellation of the current run
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    /// The engine's configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch playlist metadata without resolving anything
    ///
    /// # Errors
    ///
    /// Returns `Error::PlaylistFetch` if the reference is invalid or
    /// inaccessible. An empty playlist is not an error here.
    pub async fn fetch_playlist(&self, playlist_ref: &str) -> Result<Playlist> {
        tracing::info!(
            playlist_ref,
            source = self.source.name(),
            "Fetching playlist metadata"
        );

        let playlist = self.source.fetch(playlist_ref).await?;

        let _ = self.event_tx.send(Event::PlaylistFetched {
            title: playlist.title.clone(),
            total: playlist.entries.len(),
        });

        tracing::info!(
            title = %playlist.title,
            videos = playlist.entries.len(),
            "Playlist fetched"
        );

        Ok(playlist)
    }

    /// Resolve a batch of entries under the configured strategy
    ///
    /// This is the core entry point: it fails fast on empty input, selects
    /// the strategy, and returns the aggregated report. Per-item failures
    /// are contained in the report and never surface as errors.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyPlaylist` if `entries` is empty.
    pub async fn resolve_entries(&self, entries: Vec<VideoEntry>) -> Result<RunReport> {
        if entries.is_empty() {
            return Err(Error::EmptyPlaylist);
        }

        let report = match self.config.concurrency {
            ConcurrencyMode::Sequential => self.run_sequential(entries).await,
            ConcurrencyMode::Bounded { workers } => {
                let effective = self.config.concurrency.effective_workers();
                if workers > MAX_WORKERS {
                    tracing::warn!(
                        requested = workers,
                        clamped = effective,
                        "Worker count exceeds ceiling, clamping"
                    );
                }
                self.run_bounded(entries, effective).await
            }
        };

        if self.cancel_token.is_cancelled() {
            tracing::warn!(
                completed = report.total,
                "Run cancelled before all entries completed"
            );
            let _ = self.event_tx.send(Event::RunCancelled {
                completed: report.total as usize,
            });
        } else {
            let _ = self.event_tx.send(Event::RunComplete {
                total: report.total,
                resolved: report.resolved_count(),
                failed: report.failed_count(),
            });
        }

        Ok(report)
    }

    /// Process a playlist end to end: fetch, resolve, write the link file
    ///
    /// # Errors
    ///
    /// Returns `Error::PlaylistFetch` or `Error::EmptyPlaylist` before any
    /// resolution starts, and `Error::OutputWrite` if the link file cannot
    /// be written after resolution produced at least one link. A run where
    /// every entry failed is not an error: the summary comes back with
    /// `success == false`.
    pub async fn run(&self, playlist_ref: &str) -> Result<RunSummary> {
        let Playlist { title, entries } = self.fetch_playlist(playlist_ref).await?;

        if entries.is_empty() {
            return Err(Error::EmptyPlaylist);
        }

        tracing::info!(
            title = %title,
            videos = entries.len(),
            quality = %self.config.quality,
            "Resolving direct links"
        );

        let mut report = self.resolve_entries(entries).await?;

        if self.cancel_token.is_cancelled() {
            // Cancellation never triggers a partial file write
            report.errors.push("run cancelled before completion".to_string());
            return Ok(RunSummary {
                success: false,
                playlist_title: title,
                output_file: None,
                report,
            });
        }

        if report.resolved.is_empty() {
            report
                .errors
                .push("no URLs were successfully resolved".to_string());
            return Ok(RunSummary {
                success: false,
                playlist_title: title,
                output_file: None,
                report,
            });
        }

        let path = match &self.config.output.output_file {
            Some(path) => path.clone(),
            None => self
                .config
                .output
                .output_dir
                .join(output::generate_output_filename(&title, chrono::Utc::now())),
        };

        let link_count = output::write_link_file(&report.resolved, &path, &title).await?;

        let _ = self.event_tx.send(Event::OutputWritten {
            path: path.clone(),
            link_count,
        });
        tracing::info!(path = %path.display(), link_count, "Link file written");

        Ok(RunSummary {
            success: true,
            playlist_title: title,
            output_file: Some(path),
            report,
        })
    }
}
