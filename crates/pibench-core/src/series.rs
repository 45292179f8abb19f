//! BBP digit series.
//!
//! π = Σ 16^-k · (4/(8k+1) − 2/(8k+4) − 1/(8k+5) − 1/(8k+6))
//!
//! Every term is evaluated independently from its index, so any split of the
//! term range into chunks sums to exactly the same fixed-point value as the
//! serial loop.

use std::ops::Range;

use num_bigint::BigInt;
use num_traits::Zero;

use crate::aggregate::sum_partials;
use crate::calculator::PiError;
use crate::format::format_digits;
use crate::options::SeriesOptions;
use crate::partition::{partition, WorkUnit};
use crate::precision::PrecisionContext;
use crate::worker::{ChunkTask, WorkerPool};

/// The k-th summand of the series under `ctx`.
///
/// Each quotient is truncated at the context's last fractional digit.
#[must_use]
pub fn term(k: u64, ctx: &PrecisionContext) -> BigInt {
    let shift = k.saturating_mul(4);
    if shift >= ctx.scale().bits() {
        return BigInt::zero();
    }
    // scale / 16^k
    let base = ctx.scale() >> shift;

    let k8 = k * 8;
    let positive = (&base << 2usize) / (k8 + 1);
    let negative = (&base << 1usize) / (k8 + 4) + &base / (k8 + 5) + &base / (k8 + 6);
    BigInt::from(positive) - BigInt::from(negative)
}

/// Sum of the terms with indices in `range`.
#[must_use]
pub fn sum_terms(range: Range<u64>, ctx: &PrecisionContext) -> BigInt {
    range.map(|k| term(k, ctx)).sum()
}

/// Terms summed for a request of `digits` digits.
#[must_use]
pub fn total_terms(digits: u32, opts: &SeriesOptions) -> u64 {
    u64::from(digits) * u64::from(opts.terms_per_digit)
}

/// Sum the first `terms` terms in one control flow.
#[must_use]
pub fn evaluate_serial(terms: u64, ctx: &PrecisionContext) -> BigInt {
    sum_terms(0..terms, ctx)
}

/// Chunk task for the series: the precision is carried as two integers and
/// rebuilt inside every worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesChunk {
    /// Digits requested by the caller.
    pub requested_digits: u32,
    /// Guard digits on top of the request.
    pub guard_digits: u32,
}

impl SeriesChunk {
    /// Task description matching `ctx`.
    #[must_use]
    pub fn for_context(ctx: &PrecisionContext) -> Self {
        Self {
            requested_digits: ctx.requested_digits(),
            guard_digits: ctx.guard_digits(),
        }
    }
}

impl ChunkTask for SeriesChunk {
    type Partial = BigInt;

    fn run_chunk(&self, unit: WorkUnit) -> Result<BigInt, PiError> {
        let ctx = PrecisionContext::with_guard(self.requested_digits, self.guard_digits);
        Ok(sum_terms(unit.range(), &ctx))
    }
}

/// Sum the first `terms` terms by running `task` over chunks of `chunk_size`.
pub fn evaluate_parallel<T>(
    terms: u64,
    chunk_size: u64,
    pool: &WorkerPool,
    task: &T,
) -> Result<BigInt, PiError>
where
    T: ChunkTask<Partial = BigInt>,
{
    let units = partition(terms, chunk_size)?;
    tracing::debug!(terms, chunks = units.len(), threads = pool.threads(), "series fan-out");
    let partials = pool.execute(&units, task)?;
    Ok(sum_partials(partials))
}

/// π to `digits` digits, summed serially.
pub fn compute_serial(digits: u32, opts: &SeriesOptions) -> Result<String, PiError> {
    check_digits(digits)?;
    let ctx = PrecisionContext::with_guard(digits, opts.guard_digits);
    let value = evaluate_serial(total_terms(digits, opts), &ctx);
    Ok(format_digits(&value, &ctx))
}

/// π to `digits` digits, summed over chunks on a worker pool.
pub fn compute_parallel(digits: u32, opts: &SeriesOptions) -> Result<String, PiError> {
    check_digits(digits)?;
    let ctx = PrecisionContext::with_guard(digits, opts.guard_digits);
    let pool = WorkerPool::new(opts.threads);
    let value = evaluate_parallel(
        total_terms(digits, opts),
        opts.chunk_size,
        &pool,
        &SeriesChunk::for_context(&ctx),
    )?;
    Ok(format_digits(&value, &ctx))
}

pub(crate) fn check_digits(digits: u32) -> Result<(), PiError> {
    if digits == 0 {
        return Err(PiError::InvalidInput("digit count must be positive".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PI_50: &str = "3.14159265358979323846264338327950288419716939937510";

    fn opts(chunk_size: u64) -> SeriesOptions {
        SeriesOptions {
            chunk_size,
            ..SeriesOptions::default()
        }
    }

    #[test]
    fn first_term() {
        // 4 - 1/2 - 1/5 - 1/6, each quotient truncated at 4 places
        let ctx = PrecisionContext::with_guard(2, 2);
        assert_eq!(term(0, &ctx), BigInt::from(31_334));
    }

    #[test]
    fn terms_vanish_below_precision() {
        let ctx = PrecisionContext::with_guard(5, 2);
        assert!(term(10, &ctx).is_zero());
        assert!(term(u64::MAX, &ctx).is_zero());
    }

    #[test]
    fn serial_small_requests() {
        let o = SeriesOptions::default();
        assert_eq!(compute_serial(1, &o).unwrap(), "3.1");
        assert_eq!(compute_serial(5, &o).unwrap(), "3.14159");
        assert_eq!(compute_serial(10, &o).unwrap(), "3.1415926535");
    }

    #[test]
    fn serial_matches_reference_prefix() {
        let o = SeriesOptions::default();
        for digits in 1..=50u32 {
            let got = compute_serial(digits, &o).unwrap();
            assert_eq!(got.len(), digits as usize + 2);
            assert_eq!(got, PI_50[..digits as usize + 2], "digits={digits}");
        }
    }

    #[test]
    fn parallel_equals_serial_for_any_chunk() {
        let o = SeriesOptions::default();
        let serial = compute_serial(40, &o).unwrap();
        for chunk in [1, 3, 40, 80, 1000] {
            assert_eq!(compute_parallel(40, &opts(chunk)).unwrap(), serial, "chunk={chunk}");
        }
    }

    #[test]
    fn chunked_sum_is_exact() {
        let ctx = PrecisionContext::new(60);
        let serial = evaluate_serial(60, &ctx);
        let chunked: BigInt = [0..7, 7..31, 31..60]
            .into_iter()
            .map(|r| sum_terms(r, &ctx))
            .sum();
        assert_eq!(serial, chunked);
    }

    #[test]
    fn zero_digits_rejected() {
        let o = SeriesOptions::default();
        assert!(matches!(compute_serial(0, &o), Err(PiError::InvalidInput(_))));
        assert!(matches!(compute_parallel(0, &o), Err(PiError::InvalidInput(_))));
    }

    #[test]
    fn zero_chunk_rejected() {
        assert!(matches!(compute_parallel(10, &opts(0)), Err(PiError::Config(_))));
    }

    #[test]
    fn chunk_task_rebuilds_context() {
        let ctx = PrecisionContext::with_guard(20, 4);
        let task = SeriesChunk::for_context(&ctx);
        let unit = WorkUnit {
            index: 0,
            start: 0,
            end: 20,
        };
        assert_eq!(task.run_chunk(unit).unwrap(), evaluate_serial(20, &ctx));
    }
}
