//! Shared helpers for engine tests: scripted collaborators and builders

use crate::config::Config;
use crate::engine::PlaylistGrabber;
use crate::error::{Error, ResolveError, Result};
use crate::resolver::LinkResolver;
use crate::source::PlaylistSource;
use crate::types::{DirectLink, Playlist, Quality, VideoEntry};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

/// Per-video behavior for the scripted resolver
#[derive(Clone, Copy, Debug)]
pub(crate) enum Script {
    /// Always resolve
    Succeed,
    /// Always fail
    Fail,
    /// Fail this many times, then resolve
    FailTimes(u32),
}

/// Deterministic resolver with per-video scripts and instrumentation
///
/// Tracks the number of calls per video and the peak number of
/// concurrently in-flight calls, which is how the worker-ceiling property
/// is verified.
pub(crate) struct ScriptedResolver {
    scripts: HashMap<String, Script>,
    latency: Duration,
    calls: Mutex<HashMap<String, u32>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ScriptedResolver {
    pub(crate) fn new() -> Self {
        Self {
            scripts: HashMap::new(),
            latency: Duration::ZERO,
            calls: Mutex::new(HashMap::new()),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Script the behavior for one video ID (default is Succeed)
    pub(crate) fn script(mut self, id: &str, script: Script) -> Self {
        self.scripts.insert(id.to_string(), script);
        self
    }

    /// Simulate per-call latency (needed for concurrency/cancel tests)
    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Calls made for one video ID
    pub(crate) async fn calls_for(&self, id: &str) -> u32 {
        self.calls.lock().await.get(id).copied().unwrap_or(0)
    }

    /// Highest number of simultaneously in-flight calls observed
    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LinkResolver for ScriptedResolver {
    async fn resolve(
        &self,
        entry: &VideoEntry,
        _quality: Quality,
    ) -> std::result::Result<DirectLink, ResolveError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        let call_number = {
            let mut calls = self.calls.lock().await;
            let counter = calls.entry(entry.id.to_string()).or_insert(0);
            *counter += 1;
            *counter
        };

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let script = self
            .scripts
            .get(entry.id.as_str())
            .copied()
            .unwrap_or(Script::Succeed);

        let succeed = match script {
            Script::Succeed => true,
            Script::Fail => false,
            Script::FailTimes(n) => call_number > n,
        };

        if succeed {
            Ok(link_for(entry.id.as_str()))
        } else {
            Err(ResolveError::Unavailable {
                id: entry.id.to_string(),
                reason: "scripted failure".into(),
            })
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Source returning a fixed playlist
pub(crate) struct StaticSource {
    playlist: Playlist,
}

impl StaticSource {
    pub(crate) fn new(playlist: Playlist) -> Self {
        Self { playlist }
    }
}

#[async_trait]
impl PlaylistSource for StaticSource {
    async fn fetch(&self, _playlist_ref: &str) -> Result<Playlist> {
        Ok(self.playlist.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Source that always fails, for the fatal-fetch-error path
pub(crate) struct FailingSource;

#[async_trait]
impl PlaylistSource for FailingSource {
    async fn fetch(&self, playlist_ref: &str) -> Result<Playlist> {
        Err(Error::PlaylistFetch(format!(
            "unreachable reference: {playlist_ref}"
        )))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// A deterministic link for the given video ID
pub(crate) fn link_for(id: &str) -> DirectLink {
    DirectLink {
        url: format!("https://cdn.test/{id}?expire=soon"),
        resolution: "1920x1080".into(),
        size_bytes: Some(10 * 1024 * 1024),
        video_codec: "avc1.640028".into(),
        audio_codec: "mp4a.40.2".into(),
        container: "mp4".into(),
    }
}

/// Entries "vid1".."vidN" titled "Video 1".."Video N"
pub(crate) fn entries(n: usize) -> Vec<VideoEntry> {
    (1..=n)
        .map(|i| VideoEntry::new(format!("vid{i}"), format!("Video {i}")))
        .collect()
}

/// A playlist wrapping [`entries`]
pub(crate) fn playlist(n: usize) -> Playlist {
    Playlist {
        title: "Test Playlist".into(),
        entries: entries(n),
    }
}

/// A grabber with a scripted resolver and a static source
pub(crate) fn scripted_grabber(
    config: Config,
    n_entries: usize,
    resolver: ScriptedResolver,
) -> (PlaylistGrabber, Arc<ScriptedResolver>) {
    let resolver = Arc::new(resolver);
    let grabber = PlaylistGrabber::with_components(
        config,
        Arc::new(StaticSource::new(playlist(n_entries))),
        Arc::clone(&resolver) as Arc<dyn LinkResolver>,
    )
    .expect("test config should validate");
    (grabber, resolver)
}

/// Config with near-zero delays so tests run fast
pub(crate) fn fast_config() -> Config {
    Config {
        request_delay: Duration::from_millis(1),
        ..Default::default()
    }
}

/// The set of resolved video IDs in a report
pub(crate) fn resolved_ids(report: &crate::types::RunReport) -> HashSet<String> {
    report
        .resolved
        .iter()
        .map(|r| r.entry.id.to_string())
        .collect()
}
