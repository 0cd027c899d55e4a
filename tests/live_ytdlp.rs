//! End-to-end tests against the real yt-dlp binary
//!
//! These tests hit the live service and need yt-dlp installed, so they are
//! compiled only with the `live-tests` feature and marked #[ignore] to keep
//! them out of normal CI.
//!
//! ```bash
//! cargo test --features live-tests --test live_ytdlp -- --ignored --nocapture
//! ```

#![cfg(feature = "live-tests")]

use playlist_grab::{LinkResolver, PlaylistSource, Quality, VideoEntry, YtDlpResolver, YtDlpSource};

/// A small, long-lived public playlist used as a stable target
const PUBLIC_PLAYLIST: &str = "PLrAXtmErZgOeiKm4sgNOknGvNjby9efdf";

#[tokio::test]
#[ignore]
async fn fetches_a_real_playlist() {
    let source = YtDlpSource::from_path().expect("yt-dlp must be installed for live tests");

    let playlist = source.fetch(PUBLIC_PLAYLIST).await.expect("fetch failed");

    assert!(!playlist.entries.is_empty(), "playlist should have entries");
    for entry in &playlist.entries {
        assert!(!entry.id.as_str().is_empty());
    }
}

#[tokio::test]
#[ignore]
async fn resolves_a_real_video() {
    let source = YtDlpSource::from_path().expect("yt-dlp must be installed for live tests");
    let resolver = YtDlpResolver::from_path().expect("yt-dlp must be installed for live tests");

    let playlist = source.fetch(PUBLIC_PLAYLIST).await.expect("fetch failed");
    let entry: &VideoEntry = playlist.entries.first().expect("playlist should have entries");

    let link = resolver
        .resolve(entry, Quality::Medium)
        .await
        .expect("resolution failed");

    assert!(link.url.starts_with("http"), "got: {}", link.url);
}
