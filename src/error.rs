//! Error types for playlist-grab
//!
//! This module provides error handling for the library, including:
//! - Fatal run-level errors (playlist fetch, empty input, output write)
//! - A typed per-call resolution error that the retry controller contains
//! - HTTP status code mapping for API integration
//! - Structured error responses with machine-readable error codes

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for playlist-grab operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for playlist-grab
///
/// Only run-fatal conditions surface as `Error`. A single video failing to
/// resolve is never fatal: the retry controller converts the underlying
/// [`ResolveError`] into a terminal per-item outcome instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "concurrency.workers")
        key: Option<String>,
    },

    /// The playlist reference could not be resolved to a list of entries
    #[error("failed to fetch playlist: {0}")]
    PlaylistFetch(String),

    /// The playlist was fetched but contained no usable entries
    #[error("no videos found in playlist")]
    EmptyPlaylist,

    /// A single resolution call failed
    ///
    /// Raised at the resolver boundary; the retry controller treats it as a
    /// failed attempt and never lets it escalate past the per-item outcome.
    #[error("resolution error: {0}")]
    Resolve(#[from] ResolveError),

    /// Writing the link file failed after resolution completed
    #[error("failed to write link file {path}: {source}")]
    OutputWrite {
        /// The path that could not be written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),

    /// External tool missing or unusable (yt-dlp)
    #[error("external tool error: {0}")]
    ExternalTool(String),
}

/// Per-call resolution failures
///
/// Every variant is contained by the retry controller: a `ResolveError` is a
/// failed attempt, and only retry exhaustion produces a terminal per-item
/// failure. The variants exist so the terminal failure's diagnostic string
/// still distinguishes an unexpected error class from a legitimate
/// unavailable-video case.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The resolver binary could not be executed or crashed
    #[error("yt-dlp execution failed: {0}")]
    Tool(String),

    /// The video exists but cannot be resolved (private, deleted, restricted)
    #[error("video {id} unavailable: {reason}")]
    Unavailable {
        /// The video ID that could not be resolved
        id: String,
        /// Diagnostic detail from the resolver
        reason: String,
    },

    /// The resolver returned metadata but no usable direct URL
    #[error("no direct url in resolver output for video {id}")]
    MissingUrl {
        /// The video ID whose output lacked a URL
        id: String,
    },

    /// The resolver's output could not be parsed
    #[error("failed to parse resolver output: {0}")]
    Parse(String),
}

/// API error response format
///
/// Returned by API endpoints when an error occurs: a machine-readable error
/// code, a human-readable message, and optional contextual details.
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "playlist_fetch_error",
///     "message": "failed to fetch playlist: invalid playlist reference"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "empty_playlist", "config_error")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create an API error with additional details
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }

    /// Create a "validation error" error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("validation_error", message)
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client error (invalid input)
            Error::Config { .. } => 400,

            // 422 Unprocessable Entity - the reference resolved to nothing usable
            Error::EmptyPlaylist => 422,

            // 502 Bad Gateway - External service errors
            Error::PlaylistFetch(_) => 502,
            Error::Resolve(_) => 502,

            // 503 Service Unavailable - missing external binary
            Error::ExternalTool(_) => 503,

            // 500 Internal Server Error - Server-side issues
            Error::OutputWrite { .. } => 500,
            Error::Io(_) => 500,
            Error::Serialization(_) => 500,
            Error::ApiServerError(_) => 500,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::PlaylistFetch(_) => "playlist_fetch_error",
            Error::EmptyPlaylist => "empty_playlist",
            Error::Resolve(_) => "resolve_error",
            Error::OutputWrite { .. } => "output_write_error",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
            Error::ApiServerError(_) => "api_server_error",
            Error::ExternalTool(_) => "external_tool_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        // Add contextual details for specific error types
        let details = match &error {
            Error::Config { key: Some(key), .. } => Some(serde_json::json!({
                "key": key,
            })),
            Error::OutputWrite { path, .. } => Some(serde_json::json!({
                "path": path,
            })),
            Error::Resolve(ResolveError::Unavailable { id, .. })
            | Error::Resolve(ResolveError::MissingUrl { id }) => Some(serde_json::json!({
                "video_id": id,
            })),
            _ => None,
        };

        ApiError {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    /// Returns a vec of (Error, expected_status_code, expected_error_code) for
    /// every reachable match arm in ToHttpStatus.
    fn all_error_variants() -> Vec<(Error, u16, &'static str)> {
        vec![
            (
                Error::Config {
                    message: "bad value".into(),
                    key: Some("concurrency.workers".into()),
                },
                400,
                "config_error",
            ),
            (
                Error::PlaylistFetch("invalid playlist reference".into()),
                502,
                "playlist_fetch_error",
            ),
            (Error::EmptyPlaylist, 422, "empty_playlist"),
            (
                Error::Resolve(ResolveError::Unavailable {
                    id: "dQw4w9WgXcQ".into(),
                    reason: "private video".into(),
                }),
                502,
                "resolve_error",
            ),
            (
                Error::OutputWrite {
                    path: PathBuf::from("/out/links.txt"),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                },
                500,
                "output_write_error",
            ),
            (
                Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
                500,
                "io_error",
            ),
            (
                Error::Serialization(serde_json::from_str::<String>("bad json").unwrap_err()),
                500,
                "serialization_error",
            ),
            (
                Error::ApiServerError("bind failed".into()),
                500,
                "api_server_error",
            ),
            (
                Error::ExternalTool("yt-dlp not found".into()),
                503,
                "external_tool_error",
            ),
        ]
    }

    #[test]
    fn every_variant_maps_to_expected_status_code() {
        for (error, expected_status, expected_code) in all_error_variants() {
            let actual_status = error.status_code();
            assert_eq!(
                actual_status, expected_status,
                "Error variant with error_code={expected_code} returned status {actual_status}, expected {expected_status}"
            );
        }
    }

    #[test]
    fn every_variant_maps_to_expected_error_code() {
        for (error, expected_status, expected_code) in all_error_variants() {
            let actual_code = error.error_code();
            assert_eq!(
                actual_code, expected_code,
                "Error variant with expected status={expected_status} returned error_code={actual_code}, expected {expected_code}"
            );
        }
    }

    #[test]
    fn empty_playlist_is_422_not_404() {
        assert_eq!(Error::EmptyPlaylist.status_code(), 422);
    }

    #[test]
    fn playlist_fetch_is_bad_gateway() {
        let err = Error::PlaylistFetch("dns failure".into());
        assert_eq!(err.status_code(), 502);
    }

    #[test]
    fn resolve_error_display_includes_video_id() {
        let err = ResolveError::MissingUrl {
            id: "abc123".into(),
        };
        assert!(
            err.to_string().contains("abc123"),
            "diagnostic should name the video, got: {}",
            err
        );
    }

    #[test]
    fn api_error_from_config_error_includes_key_details() {
        let error = Error::Config {
            message: "workers must be at least 1".into(),
            key: Some("concurrency.workers".into()),
        };
        let api_error: ApiError = error.into();

        assert_eq!(api_error.error.code, "config_error");
        let details = api_error.error.details.expect("should carry details");
        assert_eq!(details["key"], "concurrency.workers");
    }

    #[test]
    fn api_error_from_unavailable_names_the_video() {
        let error = Error::Resolve(ResolveError::Unavailable {
            id: "xyz".into(),
            reason: "deleted".into(),
        });
        let api_error: ApiError = error.into();

        let details = api_error.error.details.expect("should carry details");
        assert_eq!(details["video_id"], "xyz");
    }

    #[test]
    fn api_error_serializes_without_empty_details() {
        let api_error = ApiError::validation("bad input");
        let json = serde_json::to_string(&api_error).unwrap();
        assert!(
            !json.contains("details"),
            "absent details should be skipped, got: {json}"
        );
    }
}
