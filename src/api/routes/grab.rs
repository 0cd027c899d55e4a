//! Playlist metadata and resolution handlers.

use super::{PlaylistRequest, ResolveRequest};
use crate::api::AppState;
use crate::error::Error;
use crate::types::{Playlist, RunReport, RunSummary};
use axum::{Json, extract::State};

/// POST /playlist - Fetch playlist metadata without resolving links
///
/// Fast operation: a flat metadata extraction, nothing is resolved.
#[utoipa::path(
    post,
    path = "/playlist",
    tag = "playlist",
    request_body = PlaylistRequest,
    responses(
        (status = 200, description = "Playlist title and entries", body = crate::types::Playlist),
        (status = 422, description = "Playlist contains no usable entries", body = crate::error::ApiError),
        (status = 502, description = "Playlist reference invalid or inaccessible", body = crate::error::ApiError)
    )
)]
pub async fn fetch_playlist(
    State(state): State<AppState>,
    Json(request): Json<PlaylistRequest>,
) -> Result<Json<Playlist>, Error> {
    let playlist = state.grabber.fetch_playlist(&request.playlist_ref).await?;

    if playlist.entries.is_empty() {
        return Err(Error::EmptyPlaylist);
    }

    Ok(Json(playlist))
}

/// POST /grab - Run a full resolution and write the link file
///
/// Long-running for large playlists; progress streams on `/events`. A
/// summary with `success == false` means the run finished but produced no
/// usable links (or was cancelled), not that the request failed.
#[utoipa::path(
    post,
    path = "/grab",
    tag = "playlist",
    request_body = PlaylistRequest,
    responses(
        (status = 200, description = "Run summary with report and output file path", body = crate::types::RunSummary),
        (status = 422, description = "Playlist contains no usable entries", body = crate::error::ApiError),
        (status = 500, description = "Link file could not be written", body = crate::error::ApiError),
        (status = 502, description = "Playlist reference invalid or inaccessible", body = crate::error::ApiError)
    )
)]
pub async fn grab_playlist(
    State(state): State<AppState>,
    Json(request): Json<PlaylistRequest>,
) -> Result<Json<RunSummary>, Error> {
    let summary = state.grabber.run(&request.playlist_ref).await?;
    Ok(Json(summary))
}

/// POST /resolve - Resolve a specific selection of videos
///
/// Resolves the given entries (typically a subset picked from
/// `POST /playlist`) without touching the output boundary: the caller gets
/// the report and does its own rendering.
#[utoipa::path(
    post,
    path = "/resolve",
    tag = "playlist",
    request_body = ResolveRequest,
    responses(
        (status = 200, description = "Aggregated resolution report", body = crate::types::RunReport),
        (status = 422, description = "No videos supplied", body = crate::error::ApiError)
    )
)]
pub async fn resolve_videos(
    State(state): State<AppState>,
    Json(request): Json<ResolveRequest>,
) -> Result<Json<RunReport>, Error> {
    let report = state.grabber.resolve_entries(request.videos).await?;
    Ok(Json(report))
}
