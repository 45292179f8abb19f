//! Defaults and limits for the π computations.

/// Extra significant digits carried beyond the requested count.
pub const DEFAULT_GUARD_DIGITS: u32 = 10;

/// Smallest guard accepted by a precision context.
pub const MIN_GUARD_DIGITS: u32 = 2;

/// Default number of BBP terms handled by one worker.
pub const DEFAULT_SERIES_CHUNK_SIZE: u64 = 100;

/// Default number of Monte Carlo samples handled by one worker.
pub const DEFAULT_SAMPLING_CHUNK_SIZE: u64 = 250_000;

/// Series terms evaluated per requested digit.
///
/// Empirical: the BBP series gains roughly 1.2 decimal digits per term,
/// so one term per digit converges with margin.
pub const DEFAULT_TERMS_PER_DIGIT: u32 = 1;

/// Monte Carlo samples drawn per requested digit.
pub const DEFAULT_SAMPLES_PER_DIGIT: u64 = 2_000;

/// Leading characters compared by the consistency guard.
pub const VERIFICATION_PREFIX_LEN: usize = 102;

/// Digit count used to warm both variants up before timing.
pub const WARMUP_DIGITS: u32 = 10;

/// Largest digit count accepted by the front end.
pub const MAX_DIGITS: u32 = 100_000;

/// Largest guard accepted by the front end.
pub const MAX_GUARD_DIGITS: u32 = 1_000;

/// Largest series terms-per-digit factor accepted by the front end.
pub const MAX_TERMS_PER_DIGIT: u32 = 16;

/// Largest Monte Carlo samples-per-digit factor accepted by the front end.
pub const MAX_SAMPLES_PER_DIGIT: u64 = 10_000_000;

/// Exit codes for the command-line front end.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Serial and parallel results disagreed.
    pub const ERROR_MISMATCH: i32 = 3;
    /// Invalid configuration or input.
    pub const ERROR_CONFIG: i32 = 4;
    /// A parallel worker failed.
    pub const ERROR_WORKER: i32 = 5;
}
