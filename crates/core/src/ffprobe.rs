//! Audio duration extraction via `ffprobe`.
//!
//! `ffprobe` reads both local paths and http(s) URLs, so stored S3
//! locations can be probed directly without downloading them first.

use std::time::Duration;

use serde::Deserialize;

use crate::error::CoreError;

/// Default binary name, resolved through `PATH`.
pub const DEFAULT_FFPROBE_BIN: &str = "ffprobe";

/// Default upper bound for a single probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(20);

/// Error type for ffprobe operations.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("ffprobe binary not found: {0}")]
    NotFound(std::io::Error),

    #[error("ffprobe execution failed (exit code {exit_code:?}): {stderr}")]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("failed to parse ffprobe output: {0}")]
    ParseError(String),

    #[error("ffprobe timed out after {0:?}")]
    TimedOut(Duration),

    #[error("audio file not found: {0}")]
    AudioNotFound(String),
}

impl From<ProbeError> for CoreError {
    fn from(err: ProbeError) -> Self {
        CoreError::Internal(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// ffprobe JSON output structures
// ---------------------------------------------------------------------------

/// Top-level ffprobe JSON output (`-print_format json -show_format -show_streams`).
#[derive(Debug, Deserialize)]
pub struct FfprobeOutput {
    #[serde(default)]
    pub streams: Vec<FfprobeStream>,
    pub format: FfprobeFormat,
}

/// A single stream from ffprobe output.
#[derive(Debug, Deserialize)]
pub struct FfprobeStream {
    pub codec_type: Option<String>,
    pub duration: Option<String>,
}

/// Format-level metadata from ffprobe.
#[derive(Debug, Deserialize)]
pub struct FfprobeFormat {
    pub duration: Option<String>,
}

/// Parse the playback length in seconds from ffprobe output.
///
/// Uses the container duration when present, otherwise the longest audio
/// stream. Returns `None` when neither carries a usable value.
pub fn parse_duration(probe: &FfprobeOutput) -> Option<f64> {
    let from_format = probe
        .format
        .duration
        .as_deref()
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0);
    if from_format.is_some() {
        return from_format;
    }

    probe
        .streams
        .iter()
        .filter(|s| s.codec_type.as_deref() == Some("audio"))
        .filter_map(|s| s.duration.as_deref()?.parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .fold(None, |max, secs| Some(max.map_or(secs, |m: f64| m.max(secs))))
}

// ---------------------------------------------------------------------------
// Probe seam
// ---------------------------------------------------------------------------

/// Computes the playback length of a stored audio file.
///
/// `location` is whatever was persisted as the file reference: a local path
/// or a fetchable URL.
#[async_trait::async_trait]
pub trait DurationProbe: Send + Sync {
    async fn duration_secs(&self, location: &str) -> Result<f64, ProbeError>;
}

/// [`DurationProbe`] backed by the `ffprobe` binary.
#[derive(Debug, Clone)]
pub struct FfprobeDurationProbe {
    binary: String,
    timeout: Duration,
}

impl FfprobeDurationProbe {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    /// Run ffprobe on `location` and return the parsed JSON output.
    pub async fn probe(&self, location: &str) -> Result<FfprobeOutput, ProbeError> {
        let is_remote = location.starts_with("http://") || location.starts_with("https://");
        if !is_remote && !std::path::Path::new(location).exists() {
            return Err(ProbeError::AudioNotFound(location.to_string()));
        }

        let child = tokio::process::Command::new(&self.binary)
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(location)
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| ProbeError::TimedOut(self.timeout))?
            .map_err(ProbeError::NotFound)?;

        if !output.status.success() {
            return Err(ProbeError::ExecutionFailed {
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str::<FfprobeOutput>(&stdout)
            .map_err(|e| ProbeError::ParseError(format!("{e}: {stdout}")))
    }
}

impl Default for FfprobeDurationProbe {
    fn default() -> Self {
        Self::new(DEFAULT_FFPROBE_BIN, DEFAULT_PROBE_TIMEOUT)
    }
}

#[async_trait::async_trait]
impl DurationProbe for FfprobeDurationProbe {
    async fn duration_secs(&self, location: &str) -> Result<f64, ProbeError> {
        let probe = self.probe(location).await?;
        let secs = parse_duration(&probe).ok_or_else(|| {
            ProbeError::ParseError(format!("no duration reported for {location}"))
        })?;
        tracing::debug!(%location, secs, "Probed audio duration");
        Ok(secs)
    }
}
