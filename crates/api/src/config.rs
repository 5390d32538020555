use std::time::Duration;

use crate::auth::jwt::JwtConfig;

/// Default upload size cap (50 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets and bucket names have sensible defaults
/// suitable for local development. In production, override via environment
/// variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Grace period for in-flight requests after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Largest accepted request body in bytes (default: 50 MiB).
    pub max_upload_bytes: usize,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Buckets, default assets and external tool settings.
    pub media: MediaConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default |
    /// |------------------------|---------|
    /// | `HOST`                 | `0.0.0.0` |
    /// | `PORT`                 | `3000`  |
    /// | `CORS_ORIGINS`         | `*`     |
    /// | `REQUEST_TIMEOUT_SECS` | `30`    |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`    |
    /// | `MAX_UPLOAD_BYTES`     | `52428800` |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            max_upload_bytes,
            jwt: JwtConfig::from_env(),
            media: MediaConfig::from_env(),
        }
    }
}

/// Object storage and media tooling configuration.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// AWS region of both buckets (default: `ap-northeast-2`).
    pub region: String,
    /// Shared bucket holding beat audio and jacket images.
    pub beat_bucket: String,
    /// Bucket holding comment audio.
    pub wav_bucket: String,
    /// Location of the shared jacket image used when a beat is uploaded
    /// without one. Never deleted with a beat.
    pub default_jacket_image: String,
    /// Upper bound for a single storage call in seconds (default: `30`).
    pub storage_timeout_secs: u64,
    /// ffprobe binary (default: `ffprobe`).
    pub ffprobe_bin: String,
    /// Upper bound for a single duration probe in seconds (default: `20`).
    pub probe_timeout_secs: u64,
}

impl MediaConfig {
    /// Load media configuration from environment variables.
    ///
    /// | Env Var                | Required | Default |
    /// |------------------------|----------|---------|
    /// | `AWS_REGION`           | no       | `ap-northeast-2` |
    /// | `BEAT_BUCKET`          | **yes**  | --      |
    /// | `WAV_BUCKET`           | **yes**  | --      |
    /// | `DEFAULT_JACKET_IMAGE` | **yes**  | --      |
    /// | `STORAGE_TIMEOUT_SECS` | no       | `30`    |
    /// | `FFPROBE_BIN`          | no       | `ffprobe` |
    /// | `PROBE_TIMEOUT_SECS`   | no       | `20`    |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or a number fails to parse.
    pub fn from_env() -> Self {
        let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "ap-northeast-2".into());
        let beat_bucket = std::env::var("BEAT_BUCKET").expect("BEAT_BUCKET must be set");
        let wav_bucket = std::env::var("WAV_BUCKET").expect("WAV_BUCKET must be set");
        let default_jacket_image =
            std::env::var("DEFAULT_JACKET_IMAGE").expect("DEFAULT_JACKET_IMAGE must be set");

        let storage_timeout_secs: u64 = std::env::var("STORAGE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("STORAGE_TIMEOUT_SECS must be a valid u64");

        let ffprobe_bin = std::env::var("FFPROBE_BIN").unwrap_or_else(|_| "ffprobe".into());

        let probe_timeout_secs: u64 = std::env::var("PROBE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("PROBE_TIMEOUT_SECS must be a valid u64");

        Self {
            region,
            beat_bucket,
            wav_bucket,
            default_jacket_image,
            storage_timeout_secs,
            ffprobe_bin,
            probe_timeout_secs,
        }
    }

    pub fn storage_timeout(&self) -> Duration {
        Duration::from_secs(self.storage_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}
