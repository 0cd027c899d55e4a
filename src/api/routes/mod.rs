//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`grab`] — Playlist metadata and full resolution runs
//! - [`system`] — Health, events, OpenAPI

use serde::{Deserialize, Serialize};

mod grab;
mod system;

// Re-export all handlers so `routes::function_name` continues to work
pub use grab::*;
pub use system::*;

/// Request body naming a playlist to operate on
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PlaylistRequest {
    /// Playlist URL or bare playlist ID
    pub playlist_ref: String,
}

/// Request body listing specific videos to resolve
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ResolveRequest {
    /// The videos to resolve (typically a selection from `POST /playlist`)
    pub videos: Vec<crate::types::VideoEntry>,
}
