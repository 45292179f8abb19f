//! Calculator trait and the four π calculators.
//!
//! `PiCalculator` is the trait consumed by orchestration. Each implementation
//! pairs one method (digit series or sampling) with one execution mode.

use std::fmt;
use std::time::Instant;

use crate::options::{SamplingOptions, SeriesOptions};
use crate::{sampling, series};

/// Error type for π calculations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PiError {
    /// A calculation error occurred.
    #[error("calculation error: {0}")]
    Calculation(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The request cannot be computed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A parallel work unit failed; the whole call is abandoned.
    #[error("worker for chunk {chunk} failed: {reason}")]
    WorkerFailed {
        /// Index of the failing chunk.
        chunk: usize,
        /// What went wrong.
        reason: String,
    },

    /// Serial and parallel results still disagree after the retry.
    #[error("result mismatch between serial and parallel runs")]
    Mismatch,
}

/// How a calculator schedules its work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionMode {
    /// One control flow.
    Serial,
    /// Chunks on a worker pool.
    Parallel,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serial => f.write_str("serial"),
            Self::Parallel => f.write_str("parallel"),
        }
    }
}

/// Public trait for π calculators, consumed by orchestration.
pub trait PiCalculator: Send + Sync {
    /// π truncated to `digits` fractional digits, as `"3."` followed by the digits.
    fn compute(&self, digits: u32) -> Result<String, PiError>;

    /// Get the name of this calculator.
    fn name(&self) -> &str;

    /// Execution mode of this calculator.
    fn mode(&self) -> ExecutionMode;
}

/// Digit series summed in one control flow.
#[derive(Debug, Clone, Default)]
pub struct SerialSeries {
    opts: SeriesOptions,
}

impl SerialSeries {
    /// Create a calculator with the given options.
    #[must_use]
    pub fn new(opts: SeriesOptions) -> Self {
        Self {
            opts: opts.normalize(),
        }
    }
}

impl PiCalculator for SerialSeries {
    fn compute(&self, digits: u32) -> Result<String, PiError> {
        timed(self, digits, || series::compute_serial(digits, &self.opts))
    }

    fn name(&self) -> &str {
        "BBP"
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Serial
    }
}

/// Digit series summed over chunks on a worker pool.
#[derive(Debug, Clone, Default)]
pub struct ParallelSeries {
    opts: SeriesOptions,
}

impl ParallelSeries {
    /// Create a calculator with the given options.
    #[must_use]
    pub fn new(opts: SeriesOptions) -> Self {
        Self {
            opts: opts.normalize(),
        }
    }

    /// Terms per chunk.
    #[must_use]
    pub fn chunk_size(&self) -> u64 {
        self.opts.chunk_size
    }
}

impl PiCalculator for ParallelSeries {
    fn compute(&self, digits: u32) -> Result<String, PiError> {
        timed(self, digits, || series::compute_parallel(digits, &self.opts))
    }

    fn name(&self) -> &str {
        "BBP"
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}

/// Monte Carlo estimate with one generator.
#[derive(Debug, Clone, Default)]
pub struct SerialSampling {
    opts: SamplingOptions,
}

impl SerialSampling {
    /// Create a calculator with the given options.
    #[must_use]
    pub fn new(opts: SamplingOptions) -> Self {
        Self {
            opts: opts.normalize(),
        }
    }
}

impl PiCalculator for SerialSampling {
    fn compute(&self, digits: u32) -> Result<String, PiError> {
        timed(self, digits, || sampling::compute_serial(digits, &self.opts))
    }

    fn name(&self) -> &str {
        "MonteCarlo"
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Serial
    }
}

/// Monte Carlo estimate with one generator per chunk.
#[derive(Debug, Clone, Default)]
pub struct ParallelSampling {
    opts: SamplingOptions,
}

impl ParallelSampling {
    /// Create a calculator with the given options.
    #[must_use]
    pub fn new(opts: SamplingOptions) -> Self {
        Self {
            opts: opts.normalize(),
        }
    }

    /// Samples per chunk.
    #[must_use]
    pub fn chunk_size(&self) -> u64 {
        self.opts.chunk_size
    }
}

impl PiCalculator for ParallelSampling {
    fn compute(&self, digits: u32) -> Result<String, PiError> {
        timed(self, digits, || sampling::compute_parallel(digits, &self.opts))
    }

    fn name(&self) -> &str {
        "MonteCarlo"
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}

fn timed<C, F>(calc: &C, digits: u32, run: F) -> Result<String, PiError>
where
    C: PiCalculator + ?Sized,
    F: FnOnce() -> Result<String, PiError>,
{
    let start = Instant::now();
    let result = run();
    if result.is_ok() {
        tracing::info!(
            algorithm = calc.name(),
            mode = %calc.mode(),
            digits,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "computation finished"
        );
    }
    result
}
