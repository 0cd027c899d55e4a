//! Configuration types for playlist-grab

use crate::error::{Error, Result};
use crate::types::Quality;
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::PathBuf, time::Duration};
use utoipa::ToSchema;

/// Hard ceiling on bounded-mode workers
///
/// Requests above this are clamped silently to protect the resolution
/// service from abuse.
pub const MAX_WORKERS: usize = 20;

/// Inter-request delays below this threshold trigger a validation warning
pub const MIN_RECOMMENDED_DELAY: Duration = Duration::from_millis(500);

/// Top-level configuration for a resolution run
///
/// Works out of the box with zero configuration: sequential mode, best
/// quality, 1.5s between requests, 3 attempts per video.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Config {
    /// Quality preference for resolved links (default: best)
    #[serde(default)]
    pub quality: Quality,

    /// Delay between successive requests in sequential mode (default: 1.5s)
    ///
    /// In bounded mode no explicit delay is applied; the worker-count
    /// ceiling is the de facto throttle.
    #[serde(default = "default_request_delay", with = "duration_secs_f64")]
    pub request_delay: Duration,

    /// Execution strategy (default: sequential)
    #[serde(default)]
    pub concurrency: ConcurrencyMode,

    /// Per-video retry behavior
    #[serde(default)]
    pub retry: RetryConfig,

    /// Resolver binary settings
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,

    /// REST API settings
    #[serde(default)]
    pub api: ApiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            request_delay: default_request_delay(),
            concurrency: ConcurrencyMode::default(),
            retry: RetryConfig::default(),
            resolver: ResolverConfig::default(),
            output: OutputConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

impl Config {
    /// Validate the configuration
    ///
    /// Returns `Error::Config` for settings the engine cannot run with, and
    /// a list of non-fatal warnings for settings that are legal but
    /// inadvisable (sub-0.5s delays, worker counts that will be clamped).
    pub fn validate(&self) -> Result<Vec<String>> {
        let mut warnings = Vec::new();

        if self.retry.max_attempts == 0 {
            return Err(Error::Config {
                message: "retry.max_attempts must be at least 1".to_string(),
                key: Some("retry.max_attempts".to_string()),
            });
        }

        match self.concurrency {
            ConcurrencyMode::Bounded { workers: 0 } => {
                return Err(Error::Config {
                    message: "bounded mode requires at least 1 worker".to_string(),
                    key: Some("concurrency.workers".to_string()),
                });
            }
            ConcurrencyMode::Bounded { workers } if workers > MAX_WORKERS => {
                warnings.push(format!(
                    "concurrency.workers={} exceeds the ceiling and will be clamped to {}",
                    workers, MAX_WORKERS
                ));
            }
            _ => {}
        }

        if matches!(self.concurrency, ConcurrencyMode::Sequential)
            && self.request_delay < MIN_RECOMMENDED_DELAY
        {
            warnings.push(format!(
                "request_delay={:.1}s is below the recommended minimum of {:.1}s and may trip rate limiting",
                self.request_delay.as_secs_f64(),
                MIN_RECOMMENDED_DELAY.as_secs_f64()
            ));
        }

        Ok(warnings)
    }
}

/// Execution strategy for a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ConcurrencyMode {
    /// One video at a time, in playlist order, rate-governed (default)
    #[default]
    Sequential,
    /// Up to `workers` videos in flight at once
    Bounded {
        /// Worker-count ceiling; clamped to [`MAX_WORKERS`]
        workers: usize,
    },
}

impl ConcurrencyMode {
    /// The worker count the engine will actually run with
    ///
    /// Bounded counts above [`MAX_WORKERS`] are clamped silently; counts of
    /// zero are rejected by [`Config::validate`] before this is consulted.
    pub fn effective_workers(&self) -> usize {
        match self {
            ConcurrencyMode::Sequential => 1,
            ConcurrencyMode::Bounded { workers } => (*workers).clamp(1, MAX_WORKERS),
        }
    }
}

/// Retry configuration for per-video resolution attempts
///
/// Backoff between attempts is constant (half the configured request
/// delay), not exponential: resolution failures are dominated by
/// permanently unavailable videos, so escalating waits buy nothing.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema)]
pub struct RetryConfig {
    /// Total attempt budget per video, including the first call (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Add random jitter to the backoff pause (default: false)
    #[serde(default)]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            jitter: false,
        }
    }
}

/// Resolver binary settings
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ResolverConfig {
    /// Path to the yt-dlp executable (auto-detected from PATH if None)
    #[serde(default)]
    pub ytdlp_path: Option<PathBuf>,
}

/// Output file settings
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct OutputConfig {
    /// Directory for auto-generated link files (default: ".")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Explicit output path; overrides the generated filename when set
    #[serde(default)]
    pub output_file: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            output_file: None,
        }
    }
}

/// REST API settings
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiConfig {
    /// Bind address for the API server (default: 127.0.0.1:6780)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Whether to apply a CORS layer (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins; "*" or an empty list allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Serve interactive Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: Vec::new(),
            swagger_ui: true,
        }
    }
}

fn default_request_delay() -> Duration {
    Duration::from_secs_f64(1.5)
}

fn default_max_attempts() -> u32 {
    3
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 6780))
}

fn default_true() -> bool {
    true
}

/// Serialize a Duration as fractional seconds (matches the CLI's `-d 1.5`)
mod duration_secs_f64 {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() || secs < 0.0 {
            return Err(serde::de::Error::custom(
                "request_delay must be a non-negative number of seconds",
            ));
        }
        Ok(Duration::from_secs_f64(secs))
    }
}
