use std::path::Path;

use anyhow::Context;

use crate::config::ConverterConfig;
use crate::conversion::{self, FfmpegTranscoder, TranscodeJob, Transcoder};
use crate::planner;
use crate::probe::{self, DurationProber, FfprobeProber};
use crate::report::{self, ConversionRecord, ReportWriter};
use crate::scanner;

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub converted: usize,
    pub failed: usize,
    pub total_output_mb: f64,
}

/// Sequential conversion pipeline: scan, then probe, plan, transcode, and
/// report each file to completion before starting the next.
pub struct BatchConverter {
    config: ConverterConfig,
    prober: Box<dyn DurationProber>,
    transcoder: Box<dyn Transcoder>,
}

impl BatchConverter {
    pub fn new(config: ConverterConfig) -> Self {
        let transcoder = FfmpegTranscoder::new(&config);
        Self {
            config,
            prober: Box::new(FfprobeProber),
            transcoder: Box::new(transcoder),
        }
    }

    /// Swap the external collaborators, used by tests to stub out ffmpeg
    /// and ffprobe.
    pub fn with_collaborators(
        config: ConverterConfig,
        prober: Box<dyn DurationProber>,
        transcoder: Box<dyn Transcoder>,
    ) -> Self {
        Self {
            config,
            prober,
            transcoder,
        }
    }

    pub async fn run(&self) -> anyhow::Result<BatchSummary> {
        tokio::fs::create_dir_all(&self.config.output_dir)
            .await
            .with_context(|| {
                format!(
                    "failed to create output directory {}",
                    self.config.output_dir.display()
                )
            })?;

        if !conversion::ffmpeg_available().await {
            tracing::warn!("ffmpeg does not appear to be runnable; conversions will fail");
        }

        let files = scanner::list_video_files(&self.config.source_dir).with_context(|| {
            format!(
                "failed to read source directory {}",
                self.config.source_dir.display()
            )
        })?;
        tracing::info!("found {} convertible files", files.len());

        let report_path = self.config.report_path();
        let mut report = ReportWriter::create(&report_path)
            .with_context(|| format!("failed to create report file {}", report_path.display()))?;

        let mut summary = BatchSummary::default();

        for input in &files {
            let original_name = file_name_of(input);
            let converted_name = output_file_name(input);
            let output_path = self.config.output_dir.join(&converted_name);

            let duration = probe::effective_duration(
                self.prober.as_ref(),
                input,
                self.config.max_duration_seconds,
            )
            .await;
            let bitrate = planner::target_bitrate(self.config.max_size_mb, duration);

            println!("Converting {original_name} -> {}", output_path.display());
            println!(
                "  duration {duration:.1}s, target bitrate {} kbps",
                bitrate / 1000
            );

            let job = TranscodeJob {
                input: input.clone(),
                output: output_path.clone(),
                duration_seconds: duration,
                video_bitrate: bitrate,
            };

            match self.transcoder.encode(&job).await {
                Ok(()) => {
                    let size_mb = report::file_size_mb(&output_path);
                    report
                        .append(&ConversionRecord::new(original_name, converted_name, size_mb))
                        .context("failed to append to report file")?;
                    println!("  done, {size_mb:.2} MB");
                    summary.converted += 1;
                    summary.total_output_mb += size_mb;
                }
                Err(e) => {
                    println!("  failed: {e}");
                    tracing::error!("conversion of {} failed: {e}", input.display());
                    summary.failed += 1;
                }
            }
        }

        report.finish().context("failed to flush report file")?;

        println!(
            "{} converted, {} failed, {:.2} MB written",
            summary.converted, summary.failed, summary.total_output_mb
        );
        println!("Report written to {}", report_path.display());

        Ok(summary)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Converted files keep the input's stem and always land as `.mp4`.
fn output_file_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    format!("{stem}.mp4")
}
