//! Playlist metadata sources
//!
//! A [`PlaylistSource`] turns a playlist reference (URL or bare ID) into an
//! ordered list of entries. The shipped implementation shells out to
//! yt-dlp; tests inject scripted sources through the same trait.

mod ytdlp;

pub use ytdlp::YtDlpSource;

use crate::error::Result;
use crate::types::Playlist;
use async_trait::async_trait;

/// Source of playlist metadata
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    /// Fetch a playlist's title and entries
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PlaylistFetch`] if the reference is invalid
    /// or inaccessible. An accessible playlist with zero usable entries is
    /// not an error here; the engine treats it as empty input.
    async fn fetch(&self, playlist_ref: &str) -> Result<Playlist>;

    /// Short identifier for logging
    fn name(&self) -> &'static str;
}

/// Normalize a playlist reference into a fetchable URL
///
/// Full URLs pass through untouched; anything else is treated as a bare
/// playlist ID.
#[must_use]
pub fn normalize_playlist_ref(playlist_ref: &str) -> String {
    match url::Url::parse(playlist_ref) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => playlist_ref.to_string(),
        _ => format!(
            "https://www.youtube.com/playlist?list={}",
            playlist_ref.trim()
        ),
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_urls_pass_through() {
        let url = "https://www.youtube.com/playlist?list=PLrAXtmErZgOeiKm4sgNOknGvNjby9efdf";
        assert_eq!(normalize_playlist_ref(url), url);
    }

    #[test]
    fn bare_ids_become_playlist_urls() {
        assert_eq!(
            normalize_playlist_ref("PLrAXtmErZgOeiKm4sgNOknGvNjby9efdf"),
            "https://www.youtube.com/playlist?list=PLrAXtmErZgOeiKm4sgNOknGvNjby9efdf"
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_from_ids() {
        assert_eq!(
            normalize_playlist_ref("  PLabc  "),
            "https://www.youtube.com/playlist?list=PLabc"
        );
    }

    #[test]
    fn non_http_schemes_are_treated_as_ids() {
        // url::Url::parse accepts "PLabc:def" as a scheme; only http(s)
        // counts as an already-formed reference
        let normalized = normalize_playlist_ref("PLabc");
        assert!(normalized.starts_with("https://"));
    }
}
