//! Application configuration from CLI flags and environment.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rand::Rng;

use pibench_calibration::{CalibrationMode, CalibrationProfile};
use pibench_core::calculator::PiError;
use pibench_core::constants::{
    DEFAULT_GUARD_DIGITS, DEFAULT_SAMPLES_PER_DIGIT, DEFAULT_TERMS_PER_DIGIT, MAX_DIGITS,
    MAX_GUARD_DIGITS, MAX_SAMPLES_PER_DIGIT, MAX_TERMS_PER_DIGIT,
};
use pibench_core::options::{SamplingOptions, SeriesOptions};

/// Digit range of a small random task.
pub const SMALL_TASK: RangeInclusive<u32> = 600..=1_000;

/// Digit range of a large random task.
pub const LARGE_TASK: RangeInclusive<u32> = 3_000..=5_000;

/// What to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Serial then parallel, timed and compared.
    Benchmark,
    /// Serial variant only.
    Serial,
    /// Parallel variant only.
    Parallel,
}

/// PiBench: compute π with the BBP series or Monte Carlo sampling and
/// compare serial against parallel execution.
#[derive(Parser, Debug)]
#[command(name = "pibench", version)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Digits of π after the decimal point (1 to 100000).
    #[arg(short = 'n', long, default_value_t = 1_000, env = "PIBENCH_DIGITS")]
    pub digits: u32,

    /// Algorithm: bbp, monte-carlo, or all.
    #[arg(long, default_value = "bbp")]
    pub algo: String,

    /// Run mode.
    #[arg(long, value_enum, default_value_t = RunMode::Benchmark)]
    pub mode: RunMode,

    /// Work items per parallel chunk for every algorithm (0 = calibrated or
    /// built-in default).
    #[arg(long, default_value_t = 0)]
    pub chunk_size: u64,

    /// Series terms per parallel chunk; overrides --chunk-size for BBP.
    #[arg(long, default_value_t = 0)]
    pub series_chunk_size: u64,

    /// Monte Carlo samples per parallel chunk; overrides --chunk-size for
    /// sampling.
    #[arg(long, default_value_t = 0)]
    pub sampling_chunk_size: u64,

    /// Monte Carlo samples per requested digit (at most 10000000).
    #[arg(long, default_value_t = DEFAULT_SAMPLES_PER_DIGIT)]
    pub samples_per_digit: u64,

    /// Extra digits of working precision (at most 1000).
    #[arg(long, default_value_t = DEFAULT_GUARD_DIGITS)]
    pub guard_digits: u32,

    /// Series terms per requested digit (at most 16).
    #[arg(long, default_value_t = DEFAULT_TERMS_PER_DIGIT)]
    pub terms_per_digit: u32,

    /// Seed for reproducible Monte Carlo runs.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads (0 = one per core).
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    /// Skip the warm-up runs before timing.
    #[arg(long)]
    pub no_warmup: bool,

    /// Fail when serial and parallel series results still differ after the retry.
    #[arg(long)]
    pub strict: bool,

    /// Result file path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for timing logs and result files.
    #[arg(long, default_value = ".")]
    pub log_dir: PathBuf,

    /// Do not write timing logs or result files.
    #[arg(long)]
    pub no_log: bool,

    /// Print the timing history instead of computing.
    #[arg(long)]
    pub history: bool,

    /// Random digit count between 600 and 1000.
    #[arg(long, conflicts_with = "random_large")]
    pub random_small: bool,

    /// Random digit count between 3000 and 5000.
    #[arg(long)]
    pub random_large: bool,

    /// Calibrate chunk sizes and save the profile.
    #[arg(long)]
    pub calibrate: bool,

    /// Calibrate with fewer candidates at smaller sizes.
    #[arg(long, conflicts_with = "calibrate")]
    pub calibrate_quick: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,

    /// Quiet mode (only output the digits).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output: full results and info-level logs.
    #[arg(short, long)]
    pub verbose: bool,

    /// Show detailed information.
    #[arg(short, long)]
    pub details: bool,

    /// Machine-readable JSON output.
    #[arg(long)]
    pub json: bool,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Digit count to compute: a random task size if one was requested,
    /// otherwise `--digits`.
    pub fn resolve_digits<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<u32, PiError> {
        let digits = if self.random_small {
            rng.gen_range(SMALL_TASK)
        } else if self.random_large {
            rng.gen_range(LARGE_TASK)
        } else {
            self.digits
        };
        validate_digits(digits)
    }

    /// Calibration requested on the command line, if any.
    #[must_use]
    pub fn calibration_mode(&self) -> Option<CalibrationMode> {
        if self.calibrate {
            Some(CalibrationMode::Full)
        } else if self.calibrate_quick {
            Some(CalibrationMode::Quick)
        } else {
            None
        }
    }

    /// Reject precision and work factors too large to ever finish.
    pub fn validate_tuning(&self) -> Result<(), PiError> {
        if self.guard_digits > MAX_GUARD_DIGITS {
            return Err(PiError::InvalidInput(format!(
                "guard digits must be at most {MAX_GUARD_DIGITS}, got {}",
                self.guard_digits
            )));
        }
        if self.terms_per_digit > MAX_TERMS_PER_DIGIT {
            return Err(PiError::InvalidInput(format!(
                "terms per digit must be at most {MAX_TERMS_PER_DIGIT}, got {}",
                self.terms_per_digit
            )));
        }
        if self.samples_per_digit > MAX_SAMPLES_PER_DIGIT {
            return Err(PiError::InvalidInput(format!(
                "samples per digit must be at most {MAX_SAMPLES_PER_DIGIT}, got {}",
                self.samples_per_digit
            )));
        }
        Ok(())
    }

    /// Whether some chunk size is left for the calibration profile to fill.
    #[must_use]
    pub fn needs_profile(&self) -> bool {
        self.series_chunk() == 0 || self.sampling_chunk() == 0
    }

    fn series_chunk(&self) -> u64 {
        if self.series_chunk_size > 0 {
            self.series_chunk_size
        } else {
            self.chunk_size
        }
    }

    fn sampling_chunk(&self) -> u64 {
        if self.sampling_chunk_size > 0 {
            self.sampling_chunk_size
        } else {
            self.chunk_size
        }
    }

    /// Series options; a zero chunk size takes the profile's value.
    #[must_use]
    pub fn series_options(&self, profile: Option<&CalibrationProfile>) -> SeriesOptions {
        let chunk_size = match (self.series_chunk(), profile) {
            (0, Some(p)) => p.series_chunk_size,
            (chunk, _) => chunk,
        };
        SeriesOptions {
            chunk_size,
            guard_digits: self.guard_digits,
            terms_per_digit: self.terms_per_digit,
            threads: Some(self.threads),
        }
        .normalize()
    }

    /// Sampling options; a zero chunk size takes the profile's value.
    #[must_use]
    pub fn sampling_options(&self, profile: Option<&CalibrationProfile>) -> SamplingOptions {
        let chunk_size = match (self.sampling_chunk(), profile) {
            (0, Some(p)) => p.sampling_chunk_size,
            (chunk, _) => chunk,
        };
        SamplingOptions {
            samples_per_digit: self.samples_per_digit,
            chunk_size,
            guard_digits: self.guard_digits,
            seed: self.seed,
            threads: Some(self.threads),
        }
        .normalize()
    }
}

/// Accept digit counts from 1 to [`MAX_DIGITS`].
pub fn validate_digits(digits: u32) -> Result<u32, PiError> {
    if (1..=MAX_DIGITS).contains(&digits) {
        Ok(digits)
    } else {
        Err(PiError::InvalidInput(format!(
            "digits must be between 1 and {MAX_DIGITS}, got {digits}"
        )))
    }
}
