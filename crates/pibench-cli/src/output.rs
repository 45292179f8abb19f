//! CLI output formatting and result files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDateTime;
use serde_json::{json, Value};

use pibench_core::constants::VERIFICATION_PREFIX_LEN;
use pibench_core::registry::Algorithm;
use pibench_orchestration::interfaces::{BenchmarkReport, CalculationResult};

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Format a number with thousand separators.
#[must_use]
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Leading part of a digit string shown on screen.
#[must_use]
pub fn preview(value: &str) -> &str {
    value.get(..VERIFICATION_PREFIX_LEN).unwrap_or(value)
}

/// `<ALGO>_<digits>_result_<YYYYmmdd-HHMMSS>.txt`
#[must_use]
pub fn result_file_name(algorithm: Algorithm, digits: u32, at: &NaiveDateTime) -> String {
    format!(
        "{}_{}_result_{}.txt",
        algorithm.label(),
        digits,
        at.format("%Y%m%d-%H%M%S")
    )
}

/// Default result file path in `dir`, stamped with the local time.
#[must_use]
pub fn default_result_path(dir: &Path, algorithm: Algorithm, digits: u32) -> PathBuf {
    let now = chrono::Local::now().naive_local();
    dir.join(result_file_name(algorithm, digits, &now))
}

/// Full text of a result file.
#[must_use]
pub fn render_result_file(report: &BenchmarkReport) -> String {
    let mut text = format!(
        "Algorithm: {}\nDigits: {}\nSerial: {:.3}s | Result: {}\nParallel: {:.3}s | Result: {}\n",
        report.algorithm,
        report.digits,
        report.serial.duration.as_secs_f64(),
        report.serial.value,
        report.parallel.duration.as_secs_f64(),
        report.parallel.value,
    );
    if report.retried {
        text.push_str("Parallel result recomputed after a mismatch\n");
    }
    text.push_str(&format!("Verdict: {}\n", report.verdict));
    text
}

/// Write a benchmark report to `path`.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_result_file(path: &Path, report: &BenchmarkReport) -> io::Result<()> {
    fs::write(path, render_result_file(report))
}

/// Write a single digit string to `path`.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_to_file(path: &Path, value: &str) -> io::Result<()> {
    fs::write(path, format!("{value}\n"))
}

/// Machine-readable form of a benchmark report.
#[must_use]
pub fn report_json(report: &BenchmarkReport) -> Value {
    json!({
        "algorithm": report.algorithm.label(),
        "digits": report.digits,
        "serial_ms": report.serial.millis(),
        "parallel_ms": report.parallel.millis(),
        "serial": report.serial.value,
        "parallel": report.parallel.value,
        "retried": report.retried,
        "faster": report.verdict.faster.to_string(),
        "percent": report.verdict.percent,
    })
}

/// Machine-readable form of a single calculation.
#[must_use]
pub fn result_json(result: &CalculationResult) -> Value {
    let (value, error) = match &result.outcome {
        Ok(v) => (Some(v.as_str()), None),
        Err(e) => (None, Some(e.to_string())),
    };
    json!({
        "algorithm": result.algorithm,
        "mode": result.mode.to_string(),
        "digits": result.digits,
        "elapsed_ms": result.duration.as_secs_f64() * 1000.0,
        "value": value,
        "error": error,
    })
}
