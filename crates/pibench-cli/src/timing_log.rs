//! Per-algorithm timing logs.
//!
//! One line per benchmark, `digits,serial_ms,parallel_ms`, appended to
//! `<stem>.txt` in the log directory.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use pibench_core::registry::Algorithm;
use pibench_orchestration::interfaces::BenchmarkReport;

/// One logged benchmark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingRecord {
    /// Requested digits.
    pub digits: u32,
    /// Serial time in milliseconds.
    pub serial_ms: f64,
    /// Parallel time in milliseconds.
    pub parallel_ms: f64,
}

impl TimingRecord {
    /// Record for a finished benchmark.
    #[must_use]
    pub fn from_report(report: &BenchmarkReport) -> Self {
        Self {
            digits: report.digits,
            serial_ms: report.serial.millis(),
            parallel_ms: report.parallel.millis(),
        }
    }

    /// Log line without the trailing newline.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!("{},{:.3},{:.3}", self.digits, self.serial_ms, self.parallel_ms)
    }

    /// Parse a log line; `None` for anything malformed.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut fields = line.trim().split(',');
        let digits = fields.next()?.trim().parse().ok()?;
        let serial_ms = fields.next()?.trim().parse().ok()?;
        let parallel_ms = fields.next()?.trim().parse().ok()?;
        if fields.next().is_some() {
            return None;
        }
        Some(Self {
            digits,
            serial_ms,
            parallel_ms,
        })
    }
}

/// Log file for `algorithm` in `dir`.
#[must_use]
pub fn log_path(dir: &Path, algorithm: Algorithm) -> PathBuf {
    dir.join(format!("{}.txt", algorithm.log_stem()))
}

/// Append `record` to the log of `algorithm`.
///
/// # Errors
///
/// Returns an I/O error if the log cannot be opened or written.
pub fn append_record(dir: &Path, algorithm: Algorithm, record: &TimingRecord) -> io::Result<PathBuf> {
    let path = log_path(dir, algorithm);
    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    writeln!(file, "{}", record.to_line())?;
    tracing::debug!(path = %path.display(), "timing appended");
    Ok(path)
}

/// Read every well-formed record from `path`.
///
/// A missing file yields no records.
///
/// # Errors
///
/// Returns an I/O error if the file exists but cannot be read.
pub fn read_records(path: &Path) -> io::Result<Vec<TimingRecord>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };
    Ok(text.lines().filter_map(TimingRecord::parse_line).collect())
}
