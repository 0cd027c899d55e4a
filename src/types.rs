//! Core types for playlist-grab

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use utoipa::ToSchema;

/// Unique identifier for a video within a playlist
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct VideoId(pub String);

impl VideoId {
    /// Create a new VideoId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for VideoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for VideoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quality preference for resolved links
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// Best available quality (default)
    #[default]
    Best,
    /// Up to 1080p (Full HD)
    High,
    /// Up to 720p (HD)
    Medium,
}

impl Quality {
    /// Height cap applied when selecting a format, if any
    pub fn max_height(&self) -> Option<u32> {
        match self {
            Quality::Best => None,
            Quality::High => Some(1080),
            Quality::Medium => Some(720),
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quality::Best => write!(f, "best"),
            Quality::High => write!(f, "1080p"),
            Quality::Medium => write!(f, "720p"),
        }
    }
}

/// One video discovered in a playlist
///
/// Immutable once the playlist is materialized; the engine never mutates
/// entries mid-run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VideoEntry {
    /// Video ID
    pub id: VideoId,
    /// Video title
    pub title: String,
    /// Duration in seconds, if the playlist metadata included it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u64>,
}

impl VideoEntry {
    /// Create a new entry
    pub fn new(id: impl Into<VideoId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration_seconds: None,
        }
    }
}

/// A playlist: its title plus the ordered entries it contains
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Playlist {
    /// Playlist title ("Unknown Playlist" when the source can't provide one)
    pub title: String,
    /// Entries in playlist order
    pub entries: Vec<VideoEntry>,
}

/// A successfully resolved direct link plus its descriptive metadata
///
/// The `url` is time-limited and opaque: it expires after several hours and
/// must be used promptly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DirectLink {
    /// Direct, time-limited download URL
    pub url: String,
    /// Resolution string (e.g., "1920x1080")
    pub resolution: String,
    /// File size in bytes, when the resolver reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    /// Video codec (e.g., "avc1.640028")
    pub video_codec: String,
    /// Audio codec (e.g., "mp4a.40.2")
    pub audio_codec: String,
    /// Container/extension (e.g., "mp4")
    pub container: String,
}

/// A resolved (entry, link) pair as recorded in the run report
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ResolvedVideo {
    /// The entry that was resolved
    pub entry: VideoEntry,
    /// The resolved direct link
    pub link: DirectLink,
}

/// Terminal per-item result of one resolution
///
/// Exactly one outcome is produced per entry per run; an entry is never
/// retried after its outcome is recorded.
#[derive(Clone, Debug)]
pub enum Outcome {
    /// The entry resolved to a direct link
    Resolved {
        /// The entry that was resolved
        entry: VideoEntry,
        /// The resolved direct link
        link: DirectLink,
    },
    /// The entry exhausted its retries without resolving
    Failed {
        /// The entry that failed
        entry: VideoEntry,
        /// Diagnostic reason for the terminal failure
        reason: String,
    },
}

impl Outcome {
    /// The entry this outcome belongs to
    pub fn entry(&self) -> &VideoEntry {
        match self {
            Outcome::Resolved { entry, .. } | Outcome::Failed { entry, .. } => entry,
        }
    }

    /// Whether this outcome is a success
    pub fn is_resolved(&self) -> bool {
        matches!(self, Outcome::Resolved { .. })
    }
}

/// Aggregate result of one resolution run
///
/// Invariant: `resolved.len() + failed_titles.len() == total`, for complete
/// and cancelled runs alike.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct RunReport {
    /// Number of entries that reached a terminal outcome
    pub total: u32,
    /// Resolved links, in completion order
    pub resolved: Vec<ResolvedVideo>,
    /// Titles of the entries that failed
    pub failed_titles: Vec<String>,
    /// Run-level error messages (collaborator failures surfaced to the caller)
    pub errors: Vec<String>,
}

impl RunReport {
    /// Whether at least one entry resolved
    ///
    /// A run with one success and many failures is still a successful run
    /// from the engine's perspective; the caller decides whether that is
    /// acceptable.
    pub fn is_success(&self) -> bool {
        !self.resolved.is_empty()
    }

    /// Number of resolved entries
    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    /// Number of failed entries
    pub fn failed_count(&self) -> usize {
        self.failed_titles.len()
    }
}

/// Summary of a full run: resolution report plus the output boundary result
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RunSummary {
    /// Whether the run produced at least one link and wrote the output file
    pub success: bool,
    /// Playlist title
    pub playlist_title: String,
    /// Path of the written link file, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
    /// The resolution report
    pub report: RunReport,
}

/// Event emitted during a resolution run
///
/// Events are broadcast to all subscribers; the engine itself has no
/// console or logger singleton, so progress rendering is entirely the
/// subscriber's concern.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Playlist metadata fetched
    PlaylistFetched {
        /// Playlist title
        title: String,
        /// Number of entries found
        total: usize,
    },

    /// Resolution of one entry started
    Resolving {
        /// Video ID
        id: VideoId,
        /// Video title
        title: String,
    },

    /// A failed attempt is being retried after backoff
    Retrying {
        /// Video ID
        id: VideoId,
        /// Attempt number just failed (1-based)
        attempt: u32,
        /// Configured attempt budget
        max_attempts: u32,
    },

    /// One entry resolved successfully
    Resolved {
        /// Video ID
        id: VideoId,
        /// Video title
        title: String,
        /// Resolution string of the chosen format
        resolution: String,
        /// File size in bytes, if known
        #[serde(skip_serializing_if = "Option::is_none")]
        size_bytes: Option<u64>,
    },

    /// One entry failed terminally
    ResolveFailed {
        /// Video ID
        id: VideoId,
        /// Video title
        title: String,
        /// Terminal failure diagnostic
        error: String,
    },

    /// Progress update after each recorded outcome
    Progress {
        /// Outcomes recorded so far
        completed: usize,
        /// Entries admitted to this run
        total: usize,
    },

    /// Run was cancelled before all entries completed
    RunCancelled {
        /// Outcomes that reached a terminal state before cancellation
        completed: usize,
    },

    /// All admitted entries reached a terminal outcome
    RunComplete {
        /// Total entries with a terminal outcome
        total: u32,
        /// Resolved count
        resolved: usize,
        /// Failed count
        failed: usize,
    },

    /// The link file was written
    OutputWritten {
        /// Path of the written file
        path: PathBuf,
        /// Number of links in the file
        link_count: usize,
    },
}
