//! Orchestration interfaces.

use std::fmt;
use std::time::Duration;

use pibench_core::calculator::{ExecutionMode, PiError};
use pibench_core::registry::Algorithm;

/// Stage of a benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Both variants at a tiny digit count.
    WarmUp,
    /// Timing the serial variant.
    Serial,
    /// Timing the parallel variant.
    Parallel,
    /// Comparing serial and parallel results.
    Verifying,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WarmUp => f.write_str("warming up"),
            Self::Serial => f.write_str("serial run"),
            Self::Parallel => f.write_str("parallel run"),
            Self::Verifying => f.write_str("verifying"),
        }
    }
}

/// Trait for reporting progress to the user.
pub trait ProgressReporter: Send + Sync {
    /// A benchmark of `algorithm` entered `phase`.
    fn phase(&self, algorithm: Algorithm, phase: Phase);

    /// Report completion.
    fn complete(&self);
}

/// Trait for presenting results to the user.
pub trait ResultPresenter: Send + Sync {
    /// Present a single calculation.
    fn present_result(&self, result: &CalculationResult, details: bool);

    /// Present a serial/parallel benchmark.
    fn present_report(&self, report: &BenchmarkReport);

    /// Present an error.
    fn present_error(&self, error: &str);
}

/// Result of a single calculation.
#[derive(Debug, Clone)]
pub struct CalculationResult {
    /// Calculator name.
    pub algorithm: String,
    /// Execution mode of the calculator.
    pub mode: ExecutionMode,
    /// Requested digits.
    pub digits: u32,
    /// The digit string or a structured error.
    pub outcome: Result<String, PiError>,
    /// Computation duration.
    pub duration: Duration,
}

/// One timed computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timing {
    /// The digit string.
    pub value: String,
    /// Wall-clock time.
    pub duration: Duration,
}

impl Timing {
    /// Duration in milliseconds.
    #[must_use]
    pub fn millis(&self) -> f64 {
        self.duration.as_secs_f64() * 1000.0
    }
}

/// Which variant won and by how much.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    /// The faster variant; ties go to serial.
    pub faster: ExecutionMode,
    /// `(slow - fast) / slow × 100`.
    pub percent: f64,
}

impl Verdict {
    /// Compare two timings.
    #[must_use]
    pub fn from_durations(serial: Duration, parallel: Duration) -> Self {
        let (faster, fast, slow) = if serial > parallel {
            (ExecutionMode::Parallel, parallel, serial)
        } else {
            (ExecutionMode::Serial, serial, parallel)
        };
        let slow_secs = slow.as_secs_f64();
        let percent = if slow_secs > 0.0 {
            (slow_secs - fast.as_secs_f64()) / slow_secs * 100.0
        } else {
            0.0
        };
        Self { faster, percent }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} faster by {:.0}%", self.faster, self.percent)
    }
}

/// Outcome of a serial/parallel benchmark.
#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    /// Benchmarked algorithm.
    pub algorithm: Algorithm,
    /// Requested digits.
    pub digits: u32,
    /// Serial run.
    pub serial: Timing,
    /// Parallel run (after any retry).
    pub parallel: Timing,
    /// Whether the parallel result was recomputed.
    pub retried: bool,
    /// Comparison of the two timings.
    pub verdict: Verdict,
}

/// Null progress reporter (does nothing).
pub struct NullProgressReporter;

impl ProgressReporter for NullProgressReporter {
    fn phase(&self, _algorithm: Algorithm, _phase: Phase) {}
    fn complete(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_reporter() {
        let reporter = NullProgressReporter;
        reporter.phase(Algorithm::Bbp, Phase::WarmUp);
        reporter.complete();
    }

    #[test]
    fn parallel_wins() {
        let v = Verdict::from_durations(Duration::from_millis(200), Duration::from_millis(50));
        assert_eq!(v.faster, ExecutionMode::Parallel);
        assert!((v.percent - 75.0).abs() < 1e-9);
        assert_eq!(v.to_string(), "parallel faster by 75%");
    }

    #[test]
    fn serial_wins() {
        let v = Verdict::from_durations(Duration::from_millis(30), Duration::from_millis(120));
        assert_eq!(v.faster, ExecutionMode::Serial);
        assert!((v.percent - 75.0).abs() < 1e-9);
        assert_eq!(v.to_string(), "serial faster by 75%");
    }

    #[test]
    fn tie_goes_to_serial() {
        let v = Verdict::from_durations(Duration::from_millis(10), Duration::from_millis(10));
        assert_eq!(v.faster, ExecutionMode::Serial);
        assert!(v.percent.abs() < 1e-9);
    }

    #[test]
    fn zero_durations() {
        let v = Verdict::from_durations(Duration::ZERO, Duration::ZERO);
        assert!(v.percent.abs() < 1e-9);
    }

    #[test]
    fn timing_millis() {
        let t = Timing {
            value: "3.1".into(),
            duration: Duration::from_micros(1_500),
        };
        assert!((t.millis() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn calculation_result() {
        let result = CalculationResult {
            algorithm: "BBP".into(),
            mode: ExecutionMode::Serial,
            digits: 5,
            outcome: Ok("3.14159".into()),
            duration: Duration::from_millis(100),
        };
        assert_eq!(result.algorithm, "BBP");
        assert!(result.outcome.is_ok());
    }
}
