use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Local};

const REPORT_HEADER: &str = "Original Name,Converted Name,Size (MB),Conversion Date";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One line of the report: created after a successful conversion, appended
/// immutably, never updated.
#[derive(Debug, Clone)]
pub struct ConversionRecord {
    pub original_name: String,
    pub converted_name: String,
    pub size_mb: f64,
    pub timestamp: DateTime<Local>,
}

impl ConversionRecord {
    pub fn new(original_name: String, converted_name: String, size_mb: f64) -> Self {
        Self {
            original_name,
            converted_name,
            size_mb,
            timestamp: Local::now(),
        }
    }
}

/// CSV report, created fresh per run (any previous report is truncated).
/// The handle stays open for the whole run; rows are flushed as written so
/// the report is useful even if the run dies mid-batch.
pub struct ReportWriter {
    writer: BufWriter<File>,
}

impl ReportWriter {
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{REPORT_HEADER}")?;
        writer.flush()?;
        Ok(Self { writer })
    }

    pub fn append(&mut self, record: &ConversionRecord) -> io::Result<()> {
        writeln!(
            self.writer,
            "{},{},{:.2},{}",
            csv_field(&record.original_name),
            csv_field(&record.converted_name),
            record.size_mb,
            record.timestamp.format(TIMESTAMP_FORMAT)
        )?;
        self.writer.flush()
    }

    pub fn finish(mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Size of the file at `path` in MB, or 0 when it cannot be stat-ed.
pub fn file_size_mb(path: &Path) -> f64 {
    match std::fs::metadata(path) {
        Ok(metadata) => metadata.len() as f64 / (1024.0 * 1024.0),
        Err(_) => 0.0,
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn record(original: &str, converted: &str, size_mb: f64) -> ConversionRecord {
        ConversionRecord::new(original.to_string(), converted.to_string(), size_mb)
    }

    #[test]
    fn test_header_is_written_on_create() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");
        let writer = ReportWriter::create(&path).unwrap();
        writer.finish().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, format!("{REPORT_HEADER}\n"));
    }

    #[test]
    fn test_rows_carry_two_decimal_sizes_and_timestamps() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");
        let mut writer = ReportWriter::create(&path).unwrap();
        writer.append(&record("a.mov", "a.mp4", 12.3456)).unwrap();
        writer.finish().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let row = content.lines().nth(1).unwrap();
        let fields: Vec<_> = row.split(',').collect();
        assert_eq!(fields[0], "a.mov");
        assert_eq!(fields[1], "a.mp4");
        assert_eq!(fields[2], "12.35");
        // e.g. 2026-08-07 14:03:59
        assert_eq!(fields[3].len(), 19);
        assert_eq!(&fields[3][4..5], "-");
        assert_eq!(&fields[3][10..11], " ");
    }

    #[test]
    fn test_create_truncates_previous_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");

        let mut writer = ReportWriter::create(&path).unwrap();
        writer.append(&record("old.mov", "old.mp4", 1.0)).unwrap();
        writer.finish().unwrap();

        let writer = ReportWriter::create(&path).unwrap();
        writer.finish().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(!content.contains("old.mov"));
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        assert_eq!(csv_field("a, b.mov"), "\"a, b.mov\"");
        assert_eq!(csv_field("say \"hi\".mov"), "\"say \"\"hi\"\".mov\"");
        assert_eq!(csv_field("plain.mov"), "plain.mov");
    }

    #[test]
    fn test_missing_file_sizes_as_zero() {
        let dir = TempDir::new().unwrap();
        assert_eq!(file_size_mb(&dir.path().join("nope.mp4")), 0.0);
    }

    #[test]
    fn test_file_size_uses_binary_megabytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("half.bin");
        fs::write(&path, vec![0u8; 512 * 1024]).unwrap();
        assert_eq!(file_size_mb(&path), 0.5);
    }
}
