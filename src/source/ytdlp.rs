//! yt-dlp backed playlist source

use super::{PlaylistSource, normalize_playlist_ref};
use crate::error::{Error, Result};
use crate::types::{Playlist, VideoEntry, VideoId};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tokio::process::Command;

/// Playlist source backed by the external yt-dlp binary
///
/// Runs a flat extraction (`--flat-playlist --dump-single-json`): metadata
/// only, nothing is downloaded. Unavailable entries come back as JSON nulls
/// and are skipped.
///
/// # Examples
///
/// ```no_run
/// use playlist_grab::source::{PlaylistSource, YtDlpSource};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = YtDlpSource::from_path().expect("yt-dlp not found in PATH");
/// let playlist = source.fetch("PLrAXtmErZgOeiKm4sgNOknGvNjby9efdf").await?;
/// println!("{}: {} videos", playlist.title, playlist.entries.len());
/// # Ok(())
/// # }
/// ```
pub struct YtDlpSource {
    binary_path: PathBuf,
}

impl YtDlpSource {
    /// Create a source with an explicit yt-dlp path
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Attempt to find yt-dlp in PATH
    pub fn from_path() -> Option<Self> {
        which::which("yt-dlp").ok().map(Self::new)
    }
}

#[async_trait]
impl PlaylistSource for YtDlpSource {
    async fn fetch(&self, playlist_ref: &str) -> Result<Playlist> {
        let url = normalize_playlist_ref(playlist_ref);

        let output = Command::new(&self.binary_path)
            .arg("--flat-playlist")
            .arg("--dump-single-json")
            .arg("--no-warnings")
            .arg("--ignore-errors")
            .arg(&url)
            .output()
            .await
            .map_err(|e| Error::ExternalTool(format!("failed to execute yt-dlp: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::PlaylistFetch(format!(
                "yt-dlp exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        parse_flat_playlist(&output.stdout)
    }

    fn name(&self) -> &'static str {
        "yt-dlp"
    }
}

/// Wire shape of yt-dlp's flat playlist JSON (subset we consume)
#[derive(Debug, Deserialize)]
struct FlatPlaylist {
    title: Option<String>,
    /// Entries; individual entries are null for unavailable videos
    entries: Option<Vec<Option<FlatEntry>>>,
}

#[derive(Debug, Deserialize)]
struct FlatEntry {
    id: Option<String>,
    title: Option<String>,
    duration: Option<f64>,
}

/// Parse the flat-extraction JSON into a [`Playlist`]
///
/// Null entries (unavailable videos) and entries without an ID are skipped
/// rather than failing the whole fetch.
fn parse_flat_playlist(raw: &[u8]) -> Result<Playlist> {
    let parsed: FlatPlaylist = serde_json::from_slice(raw)
        .map_err(|e| Error::PlaylistFetch(format!("could not parse yt-dlp output: {}", e)))?;

    let Some(raw_entries) = parsed.entries else {
        return Err(Error::PlaylistFetch(
            "reference does not point to a playlist".to_string(),
        ));
    };

    let entries: Vec<VideoEntry> = raw_entries
        .into_iter()
        .flatten()
        .filter_map(|entry| {
            let id = entry.id?;
            Some(VideoEntry {
                id: VideoId::new(id),
                title: entry
                    .title
                    .unwrap_or_else(|| "Unknown Title".to_string()),
                duration_seconds: entry.duration.map(|d| d as u64),
            })
        })
        .collect();

    Ok(Playlist {
        title: parsed
            .title
            .unwrap_or_else(|| "Unknown Playlist".to_string()),
        entries,
    })
}
