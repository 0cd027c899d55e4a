//! OpenAPI documentation and schema generation
//!
//! Defines the OpenAPI specification for the playlist-grab REST API using
//! utoipa for compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the playlist-grab REST API
///
/// The spec can be accessed via:
/// - `/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "playlist-grab REST API",
        version = "0.1.0",
        description = "REST API for resolving direct download links from video playlists",
        license(name = "MIT OR Apache-2.0")
    ),
    servers(
        (url = "http://localhost:6780", description = "Local development server")
    ),
    paths(
        crate::api::routes::fetch_playlist,
        crate::api::routes::grab_playlist,
        crate::api::routes::resolve_videos,
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
        crate::api::routes::event_stream,
    ),
    components(schemas(
        crate::api::routes::PlaylistRequest,
        crate::api::routes::ResolveRequest,
        crate::error::ApiError,
        crate::error::ErrorDetail,
        crate::types::DirectLink,
        crate::types::Event,
        crate::types::Playlist,
        crate::types::Quality,
        crate::types::ResolvedVideo,
        crate::types::RunReport,
        crate::types::RunSummary,
        crate::types::VideoEntry,
        crate::types::VideoId,
    )),
    tags(
        (name = "playlist", description = "Playlist metadata and resolution"),
        (name = "system", description = "Health, events, and documentation"),
    )
)]
pub struct ApiDoc;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_spec_generates_and_lists_all_paths() {
        let spec = ApiDoc::openapi();
        let paths: Vec<_> = spec.paths.paths.keys().cloned().collect();

        assert!(paths.contains(&"/playlist".to_string()), "paths: {paths:?}");
        assert!(paths.contains(&"/grab".to_string()));
        assert!(paths.contains(&"/resolve".to_string()));
        assert!(paths.contains(&"/health".to_string()));
        assert!(paths.contains(&"/events".to_string()));
    }
}
