//! # playlist-grab
//!
//! Highly configurable backend library for resolving direct download links
//! from video playlists.
//!
//! ## Design Philosophy
//!
//! playlist-grab is designed to be:
//! - **Highly configurable** - Quality, pacing, retries, and concurrency are all tunable
//! - **Sensible defaults** - Works out of the box with zero configuration
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Event-driven** - Consumers subscribe to events, no polling required
//!
//! The core is the resolution engine: N independent, I/O-bound, individually
//! fallible lookups executed either sequentially with inter-request spacing
//! or under a bounded worker pool, with per-video retry, cooperative
//! cancellation, and deterministic aggregation regardless of completion
//! order. Individual failures never abort a run.
//!
//! ## Quick Start
//!
//! ```no_run
//! use playlist_grab::{Config, ConcurrencyMode, PlaylistGrabber, Quality};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         quality: Quality::High,
//!         concurrency: ConcurrencyMode::Bounded { workers: 10 },
//!         ..Default::default()
//!     };
//!
//!     let grabber = PlaylistGrabber::new(config)?;
//!
//!     // Subscribe to events
//!     let mut events = grabber.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let summary = grabber
//!         .run("https://www.youtube.com/playlist?list=PLxxxxx")
//!         .await?;
//!     println!(
//!         "{} resolved, {} failed",
//!         summary.report.resolved_count(),
//!         summary.report.failed_count()
//!     );
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Configuration types
pub mod config;
/// The resolution engine (coordinator, strategies, aggregation)
pub mod engine;
/// Error types
pub mod error;
/// Link file output
pub mod output;
/// Inter-request rate governing
pub mod rate;
/// Direct-link resolvers
pub mod resolver;
/// Per-video retry logic with pluggable backoff
pub mod retry;
/// Playlist metadata sources
pub mod source;
/// Core types and events
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use config::{Config, ConcurrencyMode, OutputConfig, RetryConfig};
pub use engine::PlaylistGrabber;
pub use error::{ApiError, Error, ErrorDetail, ResolveError, Result, ToHttpStatus};
pub use rate::RateGovernor;
pub use resolver::{LinkResolver, YtDlpResolver};
pub use retry::{BackoffPolicy, ConstantBackoff};
pub use source::{PlaylistSource, YtDlpSource};
pub use types::{
    DirectLink, Event, Outcome, Playlist, Quality, ResolvedVideo, RunReport, RunSummary,
    VideoEntry, VideoId,
};

use tokio_util::sync::CancellationToken;

/// Cancel the given token when a termination signal arrives.
///
/// Admission stops immediately on cancellation; in-flight resolutions
/// finish naturally and the partial report is returned.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// # Example
///
/// ```no_run
/// use playlist_grab::{Config, PlaylistGrabber, cancel_on_signal};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let grabber = PlaylistGrabber::new(Config::default())?;
///
///     // Ctrl+C stops admission and keeps the partial report
///     tokio::spawn(cancel_on_signal(grabber.cancel_token()));
///
///     let summary = grabber.run("PLxxxxx").await?;
///     println!("success: {}", summary.success);
///     Ok(())
/// }
/// ```
pub async fn cancel_on_signal(token: CancellationToken) {
    wait_for_signal().await;
    tracing::info!("Termination signal received, cancelling run");
    token.cancel();
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Signal registration may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
