//! Scripted collaborators built against the public trait boundaries

use async_trait::async_trait;
use playlist_grab::{
    DirectLink, Error, LinkResolver, Playlist, PlaylistSource, Quality, ResolveError, VideoEntry,
};
use std::collections::HashSet;
use std::sync::Mutex;

/// Playlist source returning a fixed playlist
pub struct FixedSource {
    playlist: Playlist,
}

impl FixedSource {
    pub fn new(title: &str, entries: Vec<VideoEntry>) -> Self {
        Self {
            playlist: Playlist {
                title: title.to_string(),
                entries,
            },
        }
    }
}

#[async_trait]
impl PlaylistSource for FixedSource {
    async fn fetch(&self, _playlist_ref: &str) -> playlist_grab::Result<Playlist> {
        Ok(self.playlist.clone())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Playlist source that always fails with a fetch error
pub struct UnreachableSource;

#[async_trait]
impl PlaylistSource for UnreachableSource {
    async fn fetch(&self, playlist_ref: &str) -> playlist_grab::Result<Playlist> {
        Err(Error::PlaylistFetch(format!(
            "could not reach {playlist_ref}"
        )))
    }

    fn name(&self) -> &'static str {
        "unreachable"
    }
}

/// Resolver that fails a fixed set of video IDs and resolves the rest
///
/// Deterministic: the same IDs fail on every call, so repeated runs produce
/// identical reports.
pub struct DeterministicResolver {
    failing_ids: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl DeterministicResolver {
    pub fn new(failing_ids: &[&str]) -> Self {
        Self {
            failing_ids: failing_ids.iter().map(|s| s.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every resolver call made so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }
}

#[async_trait]
impl LinkResolver for DeterministicResolver {
    async fn resolve(
        &self,
        entry: &VideoEntry,
        quality: Quality,
    ) -> Result<DirectLink, ResolveError> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(entry.id.to_string());

        if self.failing_ids.contains(entry.id.as_str()) {
            return Err(ResolveError::Unavailable {
                id: entry.id.to_string(),
                reason: "private video".into(),
            });
        }

        Ok(DirectLink {
            url: format!("https://cdn.test/{}?quality={quality}", entry.id),
            resolution: "1920x1080".into(),
            size_bytes: Some(50 * 1024 * 1024),
            video_codec: "avc1.640028".into(),
            audio_codec: "mp4a.40.2".into(),
            container: "mp4".into(),
        })
    }

    fn name(&self) -> &'static str {
        "deterministic"
    }
}

/// Entries "item1".."itemN" titled "Item 1".."Item N"
pub fn numbered_entries(n: usize) -> Vec<VideoEntry> {
    (1..=n)
        .map(|i| VideoEntry::new(format!("item{i}"), format!("Item {i}")))
        .collect()
}
