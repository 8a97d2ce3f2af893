use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tokio::process::Command;

use crate::constants::FFPROBE_TIMEOUT_SECONDS;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("ffprobe not found. Please install FFmpeg and ensure it's in your PATH.")]
    FfprobeNotFound,
    #[error("failed to run ffprobe: {0}")]
    Io(std::io::Error),
    #[error("ffprobe exited with status {0}")]
    NonZeroExit(std::process::ExitStatus),
    #[error("ffprobe timed out after {0} seconds")]
    Timeout(u64),
    #[error("invalid container metadata: {0}")]
    InvalidMetadata(#[from] serde_json::Error),
    #[error("container metadata has no usable duration")]
    MissingDuration,
}

/// Capability to read a media file's total duration. Kept behind a trait so
/// the pipeline can be exercised with a stub instead of a real ffprobe.
#[async_trait]
pub trait DurationProber: Send + Sync {
    async fn duration_seconds(&self, path: &Path) -> Result<f64, ProbeError>;
}

/// ffprobe-backed prober reading the format-level duration from JSON output.
pub struct FfprobeProber;

#[async_trait]
impl DurationProber for FfprobeProber {
    async fn duration_seconds(&self, path: &Path) -> Result<f64, ProbeError> {
        let mut cmd = Command::new("ffprobe");
        cmd.args(["-v", "quiet", "-print_format", "json", "-show_format"])
            .arg(path)
            .kill_on_drop(true);

        let timeout = Duration::from_secs(FFPROBE_TIMEOUT_SECONDS);
        let output = match tokio::time::timeout(timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ProbeError::FfprobeNotFound)
            }
            Ok(Err(e)) => return Err(ProbeError::Io(e)),
            Err(_) => return Err(ProbeError::Timeout(FFPROBE_TIMEOUT_SECONDS)),
        };

        if !output.status.success() {
            return Err(ProbeError::NonZeroExit(output.status));
        }

        parse_duration_output(&output.stdout)
    }
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    format: Option<FormatSection>,
}

#[derive(Debug, Deserialize)]
struct FormatSection {
    // ffprobe reports the duration as a decimal string, e.g. "11.480000".
    duration: Option<String>,
}

fn parse_duration_output(stdout: &[u8]) -> Result<f64, ProbeError> {
    let parsed: ProbeOutput = serde_json::from_slice(stdout)?;
    parsed
        .format
        .and_then(|f| f.duration)
        .and_then(|d| d.trim().parse::<f64>().ok())
        .ok_or(ProbeError::MissingDuration)
}

/// Duration used for planning and trimming: the probed value clamped to
/// `max_duration`, with `max_duration` substituted outright when probing
/// fails or reports a non-positive or non-finite value. Probe failures are
/// swallowed here; callers never see them.
pub async fn effective_duration(
    prober: &dyn DurationProber,
    path: &Path,
    max_duration: f64,
) -> f64 {
    match prober.duration_seconds(path).await {
        Ok(duration) if duration > 0.0 && duration.is_finite() => duration.min(max_duration),
        Ok(duration) => {
            tracing::warn!(
                "unusable duration {} for {}, assuming {}s",
                duration,
                path.display(),
                max_duration
            );
            max_duration
        }
        Err(e) => {
            tracing::warn!(
                "could not probe {}, assuming {}s: {}",
                path.display(),
                max_duration,
                e
            );
            max_duration
        }
    }
}
