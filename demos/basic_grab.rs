//! Basic grab example
//!
//! This example demonstrates the core functionality of playlist-grab:
//! - Building a configuration
//! - Creating an engine instance
//! - Subscribing to events
//! - Running a playlist end to end
//! - Cancelling cleanly on Ctrl+C

use playlist_grab::config::OutputConfig;
use playlist_grab::{Config, ConcurrencyMode, Event, PlaylistGrabber, Quality, cancel_on_signal};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    let playlist_ref = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://www.youtube.com/playlist?list=PLxxxxx".to_string());

    // Build configuration: 1080p cap, 10 concurrent workers
    let config = Config {
        quality: Quality::High,
        concurrency: ConcurrencyMode::Bounded { workers: 10 },
        output: OutputConfig {
            output_dir: "links".into(),
            output_file: None,
        },
        ..Default::default()
    };

    // Create engine instance (discovers yt-dlp from PATH)
    let grabber = PlaylistGrabber::new(config)?;

    // Ctrl+C stops admission; in-flight resolutions finish and the partial
    // report is returned
    tokio::spawn(cancel_on_signal(grabber.cancel_token()));

    // Subscribe to events
    let mut events = grabber.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                Event::PlaylistFetched { title, total } => {
                    println!("✓ Found playlist: {} ({} videos)", title, total);
                }
                Event::Resolved {
                    title, resolution, ..
                } => {
                    println!("✓ Resolved: {} [{}]", title, resolution);
                }
                Event::ResolveFailed { title, .. } => {
                    println!("✗ Failed: {}", title);
                }
                Event::Progress { completed, total } => {
                    println!("  {}/{} done", completed, total);
                }
                Event::OutputWritten { path, link_count } => {
                    println!("✓ Wrote {} links to {}", link_count, path.display());
                }
                _ => {}
            }
        }
    });

    // Run the full pipeline: fetch, resolve, write the link file
    let summary = grabber.run(&playlist_ref).await?;

    println!();
    println!("Total videos: {}", summary.report.total);
    println!("Successful:   {}", summary.report.resolved_count());
    println!("Failed:       {}", summary.report.failed_count());
    for title in &summary.report.failed_titles {
        println!("  - {}", title);
    }

    std::process::exit(if summary.success { 0 } else { 1 });
}
