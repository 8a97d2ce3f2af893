use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

use crate::config::ConverterConfig;
use crate::constants::FFMPEG_TIMEOUT_SECONDS;

// Stream metadata ahead of media data so outputs start playing while
// still downloading.
const MOVFLAGS: &str = "+faststart";

#[derive(Error, Debug)]
pub enum TranscodeError {
    #[error("FFmpeg not found. Please install FFmpeg and ensure it's in your PATH.")]
    FfmpegNotFound,
    #[error("failed to run ffmpeg: {0}")]
    Io(std::io::Error),
    #[error("ffmpeg exited with status {status}: {stderr}")]
    Encoder {
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("ffmpeg timed out after {0} seconds")]
    Timeout(u64),
}

/// One encode operation: everything ffmpeg needs beyond the fixed settings.
/// Built per discovered file and consumed once.
#[derive(Debug, Clone)]
pub struct TranscodeJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub duration_seconds: f64,
    pub video_bitrate: u64,
}

/// Capability to run one encode. Kept behind a trait so the pipeline can be
/// exercised with a stub instead of a real ffmpeg.
#[async_trait]
pub trait Transcoder: Send + Sync {
    async fn encode(&self, job: &TranscodeJob) -> Result<(), TranscodeError>;
}

/// ffmpeg-backed transcoder producing size-capped, trimmed, downscaled MP4s.
pub struct FfmpegTranscoder {
    video_codec: String,
    audio_codec: String,
    audio_bitrate: String,
    scale_filter: String,
}

impl FfmpegTranscoder {
    pub fn new(config: &ConverterConfig) -> Self {
        Self {
            video_codec: config.video_codec.clone(),
            audio_codec: config.audio_codec.clone(),
            audio_bitrate: config.audio_bitrate.clone(),
            scale_filter: config.scale_filter.clone(),
        }
    }

    fn build_args(&self, job: &TranscodeJob) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "-nostdin".into(),
            "-y".into(),
            "-hide_banner".into(),
            "-loglevel".into(),
            "error".into(),
            "-i".into(),
            job.input.to_string_lossy().into_owned(),
            "-c:v".into(),
            self.video_codec.clone(),
            "-c:a".into(),
            self.audio_codec.clone(),
            "-b:v".into(),
            job.video_bitrate.to_string(),
            "-b:a".into(),
            self.audio_bitrate.clone(),
            "-vf".into(),
            self.scale_filter.clone(),
            "-t".into(),
            format!("{:.3}", job.duration_seconds),
            "-movflags".into(),
            MOVFLAGS.into(),
        ];
        args.push(job.output.to_string_lossy().into_owned());
        args
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn encode(&self, job: &TranscodeJob) -> Result<(), TranscodeError> {
        let mut cmd = Command::new("ffmpeg");
        cmd.args(self.build_args(job)).kill_on_drop(true);

        let timeout = Duration::from_secs(FFMPEG_TIMEOUT_SECONDS);
        let output = match tokio::time::timeout(timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TranscodeError::FfmpegNotFound)
            }
            Ok(Err(e)) => return Err(TranscodeError::Io(e)),
            Err(_) => return Err(TranscodeError::Timeout(FFMPEG_TIMEOUT_SECONDS)),
        };

        if !output.status.success() {
            return Err(TranscodeError::Encoder {
                status: output.status,
                stderr: stderr_excerpt(&output.stderr),
            });
        }

        Ok(())
    }
}

/// Check that ffmpeg runs at all; per-file errors still handle its absence.
pub async fn ffmpeg_available() -> bool {
    match Command::new("ffmpeg").arg("-version").output().await {
        Ok(output) => output.status.success(),
        Err(_) => false,
    }
}

fn stderr_excerpt(stderr: &[u8]) -> String {
    String::from_utf8_lossy(stderr)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(5)
        .collect::<Vec<_>>()
        .join(" | ")
}
