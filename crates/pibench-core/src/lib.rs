//! # pibench-core
//!
//! Core library for the PiBench π calculator.
//! Implements the BBP digit series and Monte Carlo sampling, each in a serial
//! and a chunked parallel form built on one partitioned-reduction engine.

pub mod aggregate;
pub mod calculator;
pub mod constants;
pub mod format;
pub mod guard;
pub mod options;
pub mod partition;
pub mod precision;
pub mod registry;
pub mod sampling;
pub mod series;
pub mod worker;

// Re-exports
pub use calculator::{ExecutionMode, PiCalculator, PiError};
pub use constants::{
    exit_codes, DEFAULT_GUARD_DIGITS, DEFAULT_SAMPLES_PER_DIGIT, DEFAULT_SAMPLING_CHUNK_SIZE,
    DEFAULT_SERIES_CHUNK_SIZE, MAX_DIGITS, MAX_GUARD_DIGITS, MAX_SAMPLES_PER_DIGIT,
    MAX_TERMS_PER_DIGIT, VERIFICATION_PREFIX_LEN, WARMUP_DIGITS,
};
pub use guard::{ConsistencyGuard, GuardOutcome};
pub use options::{SamplingOptions, SeriesOptions};
pub use precision::{set_precision, PrecisionContext};
pub use registry::{Algorithm, CalculatorFactory, CalculatorPair, DefaultFactory};

/// π to `digits` digits from the BBP series, summed serially.
///
/// # Example
/// ```
/// assert_eq!(pibench_core::compute_digit_series_serial(5).unwrap(), "3.14159");
/// assert_eq!(pibench_core::compute_digit_series_serial(10).unwrap(), "3.1415926535");
/// ```
pub fn compute_digit_series_serial(digits: u32) -> Result<String, PiError> {
    series::compute_serial(digits, &SeriesOptions::default())
}

/// π to `digits` digits from the BBP series, summed over chunks of
/// `chunk_size` terms on all cores.
pub fn compute_digit_series_parallel(digits: u32, chunk_size: u64) -> Result<String, PiError> {
    let opts = SeriesOptions {
        chunk_size,
        ..SeriesOptions::default()
    };
    series::compute_parallel(digits, &opts)
}

/// Monte Carlo estimate of π with `samples_per_digit` samples per digit,
/// drawn from one entropy-seeded generator.
pub fn compute_sampling_serial(digits: u32, samples_per_digit: u64) -> Result<String, PiError> {
    let opts = SamplingOptions {
        samples_per_digit,
        ..SamplingOptions::default()
    };
    sampling::compute_serial(digits, &opts)
}

/// Monte Carlo estimate of π with chunks of `chunk_size` samples on all
/// cores, one entropy-seeded generator per chunk.
pub fn compute_sampling_parallel(
    digits: u32,
    samples_per_digit: u64,
    chunk_size: u64,
) -> Result<String, PiError> {
    let opts = SamplingOptions {
        samples_per_digit,
        chunk_size,
        ..SamplingOptions::default()
    };
    sampling::compute_parallel(digits, &opts)
}
