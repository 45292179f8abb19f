//! Reduction of partial results.
//!
//! Series partials are fixed-point integers sharing one scale, so their sum
//! is exact and independent of traversal order. Sampling partials are plain
//! hit counts.

use num_bigint::{BigInt, BigUint};

use crate::calculator::PiError;
use crate::precision::PrecisionContext;

/// Sum series partials in the order given.
#[must_use]
pub fn sum_partials<I>(partials: I) -> BigInt
where
    I: IntoIterator<Item = BigInt>,
{
    partials.into_iter().sum()
}

/// Sum per-chunk hit counts.
#[must_use]
pub fn total_hits(partials: &[u64]) -> u64 {
    partials.iter().sum()
}

/// `4 × hits / total` under `ctx`, truncated.
pub fn ratio_estimate(hits: u64, total: u64, ctx: &PrecisionContext) -> Result<BigInt, PiError> {
    let numerator = BigUint::from(hits) * 4u32;
    ctx.ratio(&numerator, &BigUint::from(total))
        .ok_or_else(|| PiError::InvalidInput("sample count must be positive".into()))
}
