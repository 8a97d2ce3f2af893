use std::path::PathBuf;

use crate::constants::{
    AUDIO_BITRATE, AUDIO_CODEC, MAX_DURATION_SECONDS, MAX_SIZE_MB, OUTPUT_FOLDER,
    REPORT_FILE_NAME, SCALE_FILTER, SOURCE_FOLDER, VIDEO_CODEC,
};

/// Immutable settings for one batch run. Defaults come from the constants
/// module; tests build variants pointing at temporary directories.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub report_file_name: String,
    pub max_size_mb: f64,
    pub max_duration_seconds: f64,
    pub video_codec: String,
    pub audio_codec: String,
    pub audio_bitrate: String,
    pub scale_filter: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(SOURCE_FOLDER),
            output_dir: PathBuf::from(OUTPUT_FOLDER),
            report_file_name: REPORT_FILE_NAME.to_string(),
            max_size_mb: MAX_SIZE_MB,
            max_duration_seconds: MAX_DURATION_SECONDS,
            video_codec: VIDEO_CODEC.to_string(),
            audio_codec: AUDIO_CODEC.to_string(),
            audio_bitrate: AUDIO_BITRATE.to_string(),
            scale_filter: SCALE_FILTER.to_string(),
        }
    }
}

impl ConverterConfig {
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file_name)
    }
}
