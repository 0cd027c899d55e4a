//! yt-dlp backed link resolver

use super::LinkResolver;
use crate::error::ResolveError;
use crate::types::{DirectLink, Quality, VideoEntry};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tokio::process::Command;

/// Limit on stderr carried into failure diagnostics
const MAX_STDERR_DIAGNOSTIC: usize = 300;

/// Link resolver backed by the external yt-dlp binary
///
/// Extracts video info without downloading (`--dump-json`) and picks the
/// direct URL out of the info JSON. The resulting URLs expire after several
/// hours and must be used promptly.
pub struct YtDlpResolver {
    binary_path: PathBuf,
}

impl YtDlpResolver {
    /// Create a resolver with an explicit yt-dlp path
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Attempt to find yt-dlp in PATH
    pub fn from_path() -> Option<Self> {
        which::which("yt-dlp").ok().map(Self::new)
    }
}

/// yt-dlp format selector for a quality preference
///
/// Prefers mp4 video + m4a audio, degrading through progressively less
/// specific selections so every video resolves to something.
fn format_selector(quality: Quality) -> &'static str {
    match quality {
        Quality::High => {
            "bestvideo[height<=1080][ext=mp4]+bestaudio[ext=m4a]/best[height<=1080][ext=mp4]/best[ext=mp4]/best"
        }
        Quality::Medium => {
            "bestvideo[height<=720][ext=mp4]+bestaudio[ext=m4a]/best[height<=720][ext=mp4]/best[ext=mp4]/best"
        }
        Quality::Best => "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best",
    }
}

#[async_trait]
impl LinkResolver for YtDlpResolver {
    async fn resolve(
        &self,
        entry: &VideoEntry,
        quality: Quality,
    ) -> Result<DirectLink, ResolveError> {
        let watch_url = format!("https://www.youtube.com/watch?v={}", entry.id);

        let output = Command::new(&self.binary_path)
            .arg("--dump-json")
            .arg("--no-warnings")
            .arg("-f")
            .arg(format_selector(quality))
            .arg(&watch_url)
            .output()
            .await
            .map_err(|e| ResolveError::Tool(format!("failed to execute yt-dlp: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason: String = stderr.trim().chars().take(MAX_STDERR_DIAGNOSTIC).collect();
            return Err(ResolveError::Unavailable {
                id: entry.id.to_string(),
                reason,
            });
        }

        parse_video_info(entry.id.as_str(), &output.stdout)
    }

    fn name(&self) -> &'static str {
        "yt-dlp"
    }
}

/// Wire shape of yt-dlp's per-video info JSON (subset we consume)
#[derive(Debug, Deserialize)]
struct VideoInfo {
    url: Option<String>,
    /// Present for merged video+audio selections; the video half comes first
    requested_formats: Option<Vec<RequestedFormat>>,
    width: Option<u64>,
    height: Option<u64>,
    /// Sizes arrive as floats for approximations
    filesize: Option<f64>,
    filesize_approx: Option<f64>,
    ext: Option<String>,
    vcodec: Option<String>,
    acodec: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RequestedFormat {
    url: Option<String>,
}

/// Extract a [`DirectLink`] from the info JSON
fn parse_video_info(id: &str, raw: &[u8]) -> Result<DirectLink, ResolveError> {
    let info: VideoInfo =
        serde_json::from_slice(raw).map_err(|e| ResolveError::Parse(e.to_string()))?;

    // Single formats carry the URL at the top level; merged selections hide
    // it inside requested_formats, where the video half is what a download
    // manager wants.
    let url = info
        .url
        .or_else(|| {
            info.requested_formats
                .and_then(|formats| formats.into_iter().next())
                .and_then(|format| format.url)
        })
        .ok_or_else(|| ResolveError::MissingUrl { id: id.to_string() })?;

    let dimension = |value: Option<u64>| {
        value
            .map(|v| v.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    };

    let size_bytes = info
        .filesize
        .or(info.filesize_approx)
        .map(|size| size as u64)
        .filter(|&size| size > 0);

    Ok(DirectLink {
        url,
        resolution: format!("{}x{}", dimension(info.width), dimension(info.height)),
        size_bytes,
        video_codec: info.vcodec.unwrap_or_else(|| "unknown".to_string()),
        audio_codec: info.acodec.unwrap_or_else(|| "unknown".to_string()),
        container: info.ext.unwrap_or_else(|| "mp4".to_string()),
    })
}
