//! Monte Carlo estimation of π.
//!
//! Points are drawn uniformly in the unit square; the fraction landing in the
//! quarter circle approaches π/4.

use num_bigint::BigInt;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::aggregate::{ratio_estimate, total_hits};
use crate::calculator::PiError;
use crate::format::format_digits;
use crate::options::SamplingOptions;
use crate::partition::{partition, WorkUnit};
use crate::precision::PrecisionContext;
use crate::series::check_digits;
use crate::worker::{ChunkTask, WorkerPool};

/// Draw one point and report whether it falls inside the unit circle.
pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> bool {
    let x: f64 = rng.gen();
    let y: f64 = rng.gen();
    x * x + y * y <= 1.0
}

/// Draw `samples` points and count the hits.
pub fn count_hits<R: Rng + ?Sized>(samples: u64, rng: &mut R) -> u64 {
    (0..samples).fold(0, |hits, _| hits + u64::from(sample(rng)))
}

/// Generator owned by one execution unit.
///
/// With a seed, stream `stream` gets its own reproducible seed; without one,
/// every generator is seeded from OS entropy.
#[must_use]
pub fn generator(seed: Option<u64>, stream: u64) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(mix_seed(seed, stream)),
        None => SmallRng::from_entropy(),
    }
}

// splitmix64 finalizer over seed and stream
fn mix_seed(seed: u64, stream: u64) -> u64 {
    let mut z = seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Samples drawn for a request of `digits` digits.
pub fn total_samples(digits: u32, opts: &SamplingOptions) -> Result<u64, PiError> {
    let total = u64::from(digits)
        .checked_mul(opts.samples_per_digit)
        .ok_or_else(|| PiError::InvalidInput(format!("sample count overflows for {digits} digits")))?;
    if total == 0 {
        return Err(PiError::InvalidInput("sample count must be positive".into()));
    }
    Ok(total)
}

/// Count hits over `total` samples in one control flow.
#[must_use]
pub fn evaluate_serial(total: u64, seed: Option<u64>) -> u64 {
    let mut rng = generator(seed, 0);
    count_hits(total, &mut rng)
}

/// Chunk task for sampling: each worker builds its own generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamplingChunk {
    /// Base seed; `None` for entropy.
    pub seed: Option<u64>,
}

impl ChunkTask for SamplingChunk {
    type Partial = u64;

    fn run_chunk(&self, unit: WorkUnit) -> Result<u64, PiError> {
        let mut rng = generator(self.seed, unit.index as u64);
        Ok(count_hits(unit.len(), &mut rng))
    }
}

/// Count hits over `total` samples by running `task` over chunks of `chunk_size`.
pub fn evaluate_parallel<T>(
    total: u64,
    chunk_size: u64,
    pool: &WorkerPool,
    task: &T,
) -> Result<u64, PiError>
where
    T: ChunkTask<Partial = u64>,
{
    let units = partition(total, chunk_size)?;
    tracing::debug!(samples = total, chunks = units.len(), threads = pool.threads(), "sampling fan-out");
    let partials = pool.execute(&units, task)?;
    Ok(total_hits(&partials))
}

/// Estimate π to `digits` digits with one generator.
pub fn compute_serial(digits: u32, opts: &SamplingOptions) -> Result<String, PiError> {
    check_digits(digits)?;
    let total = total_samples(digits, opts)?;
    let hits = evaluate_serial(total, opts.seed);
    render(digits, hits, total, opts)
}

/// Estimate π to `digits` digits with one generator per chunk.
pub fn compute_parallel(digits: u32, opts: &SamplingOptions) -> Result<String, PiError> {
    check_digits(digits)?;
    let total = total_samples(digits, opts)?;
    let pool = WorkerPool::new(opts.threads);
    let hits = evaluate_parallel(total, opts.chunk_size, &pool, &SamplingChunk { seed: opts.seed })?;
    render(digits, hits, total, opts)
}

fn render(digits: u32, hits: u64, total: u64, opts: &SamplingOptions) -> Result<String, PiError> {
    let ctx = PrecisionContext::with_guard(digits, opts.guard_digits);
    let value: BigInt = ratio_estimate(hits, total, &ctx)?;
    Ok(format_digits(&value, &ctx))
}
