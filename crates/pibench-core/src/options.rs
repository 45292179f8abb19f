//! Tuning options for the two methods.

use crate::constants::{
    DEFAULT_GUARD_DIGITS, DEFAULT_SAMPLES_PER_DIGIT, DEFAULT_SAMPLING_CHUNK_SIZE,
    DEFAULT_SERIES_CHUNK_SIZE, DEFAULT_TERMS_PER_DIGIT, MIN_GUARD_DIGITS,
};

/// Options for the digit series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesOptions {
    /// Terms per parallel chunk.
    pub chunk_size: u64,
    /// Extra digits carried past the request.
    pub guard_digits: u32,
    /// Terms summed per requested digit.
    pub terms_per_digit: u32,
    /// Worker threads (`None` = all cores).
    pub threads: Option<usize>,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_SERIES_CHUNK_SIZE,
            guard_digits: DEFAULT_GUARD_DIGITS,
            terms_per_digit: DEFAULT_TERMS_PER_DIGIT,
            threads: None,
        }
    }
}

impl SeriesOptions {
    /// Normalize options, applying defaults where values are zero.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.chunk_size == 0 {
            self.chunk_size = DEFAULT_SERIES_CHUNK_SIZE;
        }
        if self.guard_digits == 0 {
            self.guard_digits = DEFAULT_GUARD_DIGITS;
        }
        self.guard_digits = self.guard_digits.max(MIN_GUARD_DIGITS);
        if self.terms_per_digit == 0 {
            self.terms_per_digit = DEFAULT_TERMS_PER_DIGIT;
        }
        if self.threads == Some(0) {
            self.threads = None;
        }
        self
    }
}

/// Options for Monte Carlo sampling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplingOptions {
    /// Samples drawn per requested digit.
    pub samples_per_digit: u64,
    /// Samples per parallel chunk.
    pub chunk_size: u64,
    /// Extra digits carried past the request.
    pub guard_digits: u32,
    /// Base seed; `None` seeds every generator from OS entropy.
    pub seed: Option<u64>,
    /// Worker threads (`None` = all cores).
    pub threads: Option<usize>,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            samples_per_digit: DEFAULT_SAMPLES_PER_DIGIT,
            chunk_size: DEFAULT_SAMPLING_CHUNK_SIZE,
            guard_digits: DEFAULT_GUARD_DIGITS,
            seed: None,
            threads: None,
        }
    }
}

impl SamplingOptions {
    /// Normalize options, applying defaults where values are zero.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.samples_per_digit == 0 {
            self.samples_per_digit = DEFAULT_SAMPLES_PER_DIGIT;
        }
        if self.chunk_size == 0 {
            self.chunk_size = DEFAULT_SAMPLING_CHUNK_SIZE;
        }
        if self.guard_digits == 0 {
            self.guard_digits = DEFAULT_GUARD_DIGITS;
        }
        self.guard_digits = self.guard_digits.max(MIN_GUARD_DIGITS);
        if self.threads == Some(0) {
            self.threads = None;
        }
        self
    }
}
