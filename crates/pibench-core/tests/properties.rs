//! Property-based tests for the partitioned-reduction engine.

use num_bigint::BigInt;
use proptest::prelude::*;

use pibench_core::aggregate::sum_partials;
use pibench_core::options::{SamplingOptions, SeriesOptions};
use pibench_core::partition::{partition, unit_count, WorkUnit};
use pibench_core::precision::PrecisionContext;
use pibench_core::worker::{ChunkTask, WorkerPool};
use pibench_core::{sampling, series, PiError};

const PI_100: &str = "3.1415926535897932384626433832795028841971693993751058209749445923078164062862089986280348253421170679";

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Units cover [0, total) in order, without gaps or overlap.
    #[test]
    fn partition_covers_range_once(total in 0u64..5_000, chunk in 1u64..700) {
        let units = partition(total, chunk).unwrap();
        prop_assert_eq!(units.len() as u64, unit_count(total, chunk));
        prop_assert_eq!(units.len() as u64, total.div_ceil(chunk));

        let mut next = 0;
        for (i, unit) in units.iter().enumerate() {
            prop_assert_eq!(unit.index, i);
            prop_assert_eq!(unit.start, next);
            prop_assert!(unit.end > unit.start);
            if i + 1 < units.len() {
                prop_assert_eq!(unit.len(), chunk);
            }
            next = unit.end;
        }
        prop_assert_eq!(next, total);
    }

    /// Parallel equals serial for chunk sizes 1, d, and 2d.
    #[test]
    fn series_parallel_matches_serial(digits in 1u32..=100, pick in 0usize..3) {
        let chunk = [1, u64::from(digits), 2 * u64::from(digits)][pick];
        let serial = series::compute_serial(digits, &SeriesOptions::default()).unwrap();
        let opts = SeriesOptions { chunk_size: chunk, threads: Some(3), ..SeriesOptions::default() };
        let parallel = series::compute_parallel(digits, &opts).unwrap();
        prop_assert_eq!(&parallel, &serial, "digits={} chunk={}", digits, chunk);
        prop_assert_eq!(serial.len(), digits as usize + 2);
        prop_assert_eq!(&serial[..], &PI_100[..digits as usize + 2]);
    }

    /// Arbitrary chunk sizes never change the series sum.
    #[test]
    fn series_sum_independent_of_chunking(digits in 1u32..=80, chunk in 1u64..120) {
        let ctx = PrecisionContext::new(digits);
        let serial = series::evaluate_serial(u64::from(digits), &ctx);
        let units = partition(u64::from(digits), chunk).unwrap();
        let chunked = sum_partials(units.iter().map(|u| series::sum_terms(u.range(), &ctx)));
        prop_assert_eq!(serial, chunked);
    }

    /// Shuffled partials aggregate to the same value.
    #[test]
    fn shuffled_aggregation_is_identical(digits in 5u32..=60, chunk in 1u64..20, seed in any::<u64>()) {
        let ctx = PrecisionContext::new(digits);
        let units = partition(u64::from(digits), chunk).unwrap();
        let partials: Vec<BigInt> = units.iter().map(|u| series::sum_terms(u.range(), &ctx)).collect();

        let mut shuffled = partials.clone();
        // Fisher-Yates driven by a simple LCG
        let mut state = seed | 1;
        for i in (1..shuffled.len()).rev() {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            let j = (state >> 33) as usize % (i + 1);
            shuffled.swap(i, j);
        }

        prop_assert_eq!(sum_partials(partials), sum_partials(shuffled));
    }
}

struct FailingAt {
    chunk: usize,
}

impl ChunkTask for FailingAt {
    type Partial = BigInt;

    fn run_chunk(&self, unit: WorkUnit) -> Result<BigInt, PiError> {
        if unit.index == self.chunk {
            return Err(PiError::Calculation("injected".into()));
        }
        let ctx = PrecisionContext::new(40);
        Ok(series::sum_terms(unit.range(), &ctx))
    }
}

#[test]
fn single_failing_chunk_fails_series_call() {
    let pool = WorkerPool::new(Some(4));
    let result = series::evaluate_parallel(40, 5, &pool, &FailingAt { chunk: 3 });
    match result {
        Err(PiError::WorkerFailed { chunk, reason }) => {
            assert_eq!(chunk, 3);
            assert!(reason.contains("injected"), "{reason}");
        }
        other => panic!("expected worker failure, got {other:?}"),
    }
}

struct PanicsAt {
    chunk: usize,
}

impl ChunkTask for PanicsAt {
    type Partial = u64;

    fn run_chunk(&self, unit: WorkUnit) -> Result<u64, PiError> {
        assert!(unit.index != self.chunk, "generator exploded");
        Ok(unit.len())
    }
}

#[test]
fn panicking_chunk_fails_sampling_call() {
    let pool = WorkerPool::new(Some(2));
    let result = sampling::evaluate_parallel(10_000, 1_000, &pool, &PanicsAt { chunk: 7 });
    assert!(matches!(result, Err(PiError::WorkerFailed { chunk: 7, .. })));
}

fn estimate(s: &str) -> f64 {
    s.parse().unwrap()
}

#[test]
fn sampling_converges_at_hundred_digits() {
    // 200 000 samples per run: standard error about 0.0037
    let within = (0..20u64)
        .filter(|&seed| {
            let opts = SamplingOptions {
                seed: Some(seed),
                ..SamplingOptions::default()
            };
            let s = if seed % 2 == 0 {
                sampling::compute_serial(100, &opts).unwrap()
            } else {
                sampling::compute_parallel(100, &opts).unwrap()
            };
            assert_eq!(s.len(), 102);
            (estimate(&s) - std::f64::consts::PI).abs() <= 0.01
        })
        .count();
    assert!(within >= 18, "only {within}/20 runs within 0.01");
}

#[test]
fn sampling_mean_approaches_pi() {
    let runs = 50u64;
    let total: f64 = (0..runs)
        .map(|seed| {
            let opts = SamplingOptions {
                seed: Some(1_000 + seed),
                ..SamplingOptions::default()
            };
            let s = sampling::compute_serial(5, &opts).unwrap();
            assert_eq!(s.len(), 7);
            assert!(s.starts_with("3."), "{s}");
            estimate(&s)
        })
        .sum();
    let mean = total / runs as f64;
    assert!((mean - 3.14159).abs() < 0.01, "mean {mean}");
}

#[test]
fn unseeded_sampling_has_expected_shape() {
    let s = pibench_core::compute_sampling_serial(5, 2_000).unwrap();
    assert_eq!(s.len(), 7);
    assert!(s.starts_with("3."));

    let s = pibench_core::compute_sampling_parallel(5, 2_000, 1_000).unwrap();
    assert_eq!(s.len(), 7);
    assert!(s.starts_with("3."));
}

#[test]
fn entry_points_reject_degenerate_input() {
    assert!(matches!(
        pibench_core::compute_digit_series_serial(0),
        Err(PiError::InvalidInput(_))
    ));
    assert!(matches!(
        pibench_core::compute_digit_series_parallel(10, 0),
        Err(PiError::Config(_))
    ));
    assert!(matches!(
        pibench_core::compute_sampling_serial(10, 0),
        Err(PiError::InvalidInput(_))
    ));
    assert!(matches!(
        pibench_core::compute_sampling_parallel(10, 2_000, 0),
        Err(PiError::Config(_))
    ));
}
