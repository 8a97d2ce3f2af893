// App Constants
pub const APP_NAME: &str = "vidpress";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// Folder layout
pub const SOURCE_FOLDER: &str = "input_videos";
pub const OUTPUT_FOLDER: &str = "converted_videos";
pub const REPORT_FILE_NAME: &str = "converted_videos_info.csv";

// Output ceilings
pub const MAX_SIZE_MB: f64 = 13.0;
pub const MAX_DURATION_SECONDS: f64 = 360.0; // 6 minutes; longer inputs are trimmed

// File handling
pub const VIDEO_EXTENSIONS: &[&str] = &["mov", "avi", "mkv", "flv", "wmv", "webm", "mp4"];

// Encoder parameters
pub const VIDEO_CODEC: &str = "h264_videotoolbox";
pub const AUDIO_CODEC: &str = "aac";
pub const AUDIO_BITRATE: &str = "50k";
pub const SCALE_FILTER: &str = "scale=360:-2"; // width 360, height auto, kept even

// External tool limits
pub const FFMPEG_TIMEOUT_SECONDS: u64 = 3600; // 1 hour max
pub const FFPROBE_TIMEOUT_SECONDS: u64 = 30;
