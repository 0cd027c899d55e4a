//! Link file output
//!
//! Writes the durable artifact of a run: a download-manager-friendly text
//! file with a banner header and one direct URL per resolved video, each
//! preceded by title and format comments.

use crate::error::{Error, Result};
use crate::types::ResolvedVideo;
use crate::utils::{format_size, sanitize_filename};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::path::Path;

/// Width of the banner separator lines
const BANNER_WIDTH: usize = 80;

/// Generate a filename from the playlist title and a timestamp
///
/// The title is sanitized for cross-platform safety; the timestamp keeps
/// repeated runs of the same playlist from colliding.
#[must_use]
pub fn generate_output_filename(playlist_title: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}_{}.txt",
        sanitize_filename(playlist_title),
        now.format("%Y%m%d_%H%M%S")
    )
}

/// Render the link file contents
#[must_use]
pub fn render_link_file(
    resolved: &[ResolvedVideo],
    playlist_title: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let mut out = String::new();

    // Header
    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out, "Playlist Direct Download URLs");
    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out, "Playlist: {playlist_title}");
    let _ = writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "Total Videos: {}", resolved.len());
    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out);

    let _ = writeln!(out, "IMPORTANT NOTES:");
    let _ = writeln!(out, "- These URLs expire after several hours. Use them promptly.");
    let _ = writeln!(
        out,
        "- Import this file into a download manager for batch downloading."
    );
    let _ = writeln!(out, "- Each URL is preceded by the video title as a comment.");
    let _ = writeln!(out);
    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out);

    for (index, video) in resolved.iter().enumerate() {
        let _ = writeln!(out, "# Video {}: {}", index + 1, video.entry.title);
        let _ = writeln!(
            out,
            "# Resolution: {} | Size: {}",
            video.link.resolution,
            format_size(video.link.size_bytes.unwrap_or(0))
        );
        let _ = writeln!(out, "{}", video.link.url);
        let _ = writeln!(out);
    }

    out
}

/// Write the link file, creating parent directories as needed
///
/// Returns the number of links written.
///
/// # Errors
///
/// Returns [`Error::OutputWrite`] if the directory or file cannot be
/// created — fatal, because resolution has already spent its effort by the
/// time this runs.
pub async fn write_link_file(
    resolved: &[ResolvedVideo],
    path: &Path,
    playlist_title: &str,
) -> Result<usize> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::OutputWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
    }

    let contents = render_link_file(resolved, playlist_title, Utc::now());

    tokio::fs::write(path, contents)
        .await
        .map_err(|e| Error::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(resolved.len())
}
