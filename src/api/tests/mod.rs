use super::*;
use crate::engine::test_helpers::{ScriptedResolver, StaticSource, playlist};
use crate::resolver::LinkResolver;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt; // for oneshot()

/// Router backed by a scripted engine writing into a temp directory
fn test_router(n_entries: usize) -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        request_delay: std::time::Duration::from_millis(1),
        output: crate::config::OutputConfig {
            output_dir: dir.path().to_path_buf(),
            output_file: None,
        },
        ..Default::default()
    };

    let grabber = PlaylistGrabber::with_components(
        config.clone(),
        Arc::new(StaticSource::new(playlist(n_entries))),
        Arc::new(ScriptedResolver::new()) as Arc<dyn LinkResolver>,
    )
    .unwrap();

    let router = create_router(Arc::new(grabber), Arc::new(config));
    (router, dir)
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok_and_version() {
    let (app, _dir) = test_router(1);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn fetch_playlist_returns_metadata_without_resolving() {
    let (app, _dir) = test_router(3);

    let response = app
        .oneshot(json_request(
            "/playlist",
            serde_json::json!({"playlist_ref": "PLtest"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Test Playlist");
    assert_eq!(body["entries"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn fetch_empty_playlist_is_unprocessable() {
    let (app, _dir) = test_router(0);

    let response = app
        .oneshot(json_request(
            "/playlist",
            serde_json::json!({"playlist_ref": "PLempty"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "empty_playlist");
}

#[tokio::test]
async fn grab_runs_to_completion_and_returns_the_summary() {
    let (app, dir) = test_router(2);

    let response = app
        .oneshot(json_request(
            "/grab",
            serde_json::json!({"playlist_ref": "PLtest"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["report"]["total"], 2);
    assert_eq!(body["report"]["resolved"].as_array().unwrap().len(), 2);

    let output_file = body["output_file"].as_str().unwrap();
    assert!(
        std::path::Path::new(output_file).exists(),
        "summary should point at the written file"
    );
    assert!(output_file.starts_with(dir.path().to_str().unwrap()));
}

#[tokio::test]
async fn resolve_handles_an_explicit_selection() {
    let (app, _dir) = test_router(0);

    let response = app
        .oneshot(json_request(
            "/resolve",
            serde_json::json!({
                "videos": [
                    {"id": "pick1", "title": "Picked One"},
                    {"id": "pick2", "title": "Picked Two"}
                ]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["resolved"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn resolve_with_no_videos_is_unprocessable() {
    let (app, _dir) = test_router(0);

    let response = app
        .oneshot(json_request("/resolve", serde_json::json!({"videos": []})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "empty_playlist");
}

#[tokio::test]
async fn events_endpoint_streams_sse() {
    let (app, _dir) = test_router(1);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/events")
                .header("Accept", "text/event-stream")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(
        content_type.contains("text/event-stream"),
        "Content-Type should be text/event-stream, got: {content_type}"
    );
}

#[tokio::test]
async fn openapi_spec_is_served() {
    let (app, _dir) = test_router(1);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/grab"].is_object());
}
