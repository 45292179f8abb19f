//! Serial-versus-parallel benchmark of one algorithm.

use std::sync::Arc;
use std::time::Instant;

use pibench_core::calculator::{PiCalculator, PiError};
use pibench_core::constants::WARMUP_DIGITS;
use pibench_core::guard::ConsistencyGuard;
use pibench_core::registry::CalculatorPair;

use crate::interfaces::{BenchmarkReport, Phase, ProgressReporter, Timing, Verdict};

/// Settings for one benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkConfig {
    /// Requested digits.
    pub digits: u32,
    /// Run both variants at a tiny size before timing.
    pub warmup: bool,
    /// Serial/parallel comparison for deterministic algorithms.
    pub guard: ConsistencyGuard,
}

impl BenchmarkConfig {
    /// Benchmark of `digits` digits with warm-up and the default guard.
    #[must_use]
    pub fn new(digits: u32) -> Self {
        Self {
            digits,
            warmup: true,
            guard: ConsistencyGuard::default(),
        }
    }
}

/// Warm up, time the serial variant, time the parallel variant, then check
/// that they agree.
///
/// The check only applies to deterministic algorithms; sampling runs are
/// accepted as computed.
pub fn run_benchmark(
    pair: &CalculatorPair,
    config: &BenchmarkConfig,
    reporter: &dyn ProgressReporter,
) -> Result<BenchmarkReport, PiError> {
    let algorithm = pair.algorithm;
    let digits = config.digits;

    if config.warmup {
        reporter.phase(algorithm, Phase::WarmUp);
        let warm = WARMUP_DIGITS.min(digits);
        pair.serial.compute(warm)?;
        pair.parallel.compute(warm)?;
    }

    reporter.phase(algorithm, Phase::Serial);
    let serial = timed(&pair.serial, digits)?;

    reporter.phase(algorithm, Phase::Parallel);
    let mut parallel = timed(&pair.parallel, digits)?;

    let mut retried = false;
    if algorithm.is_deterministic() {
        reporter.phase(algorithm, Phase::Verifying);
        let outcome = config
            .guard
            .reconcile(&serial.value, parallel.value, || pair.parallel.compute(digits))?;
        parallel.value = outcome.value;
        retried = outcome.retried;
    }

    let verdict = Verdict::from_durations(serial.duration, parallel.duration);
    tracing::info!(
        %algorithm,
        digits,
        serial_ms = serial.millis(),
        parallel_ms = parallel.millis(),
        retried,
        %verdict,
        "benchmark finished"
    );

    Ok(BenchmarkReport {
        algorithm,
        digits,
        serial,
        parallel,
        retried,
        verdict,
    })
}

fn timed(calc: &Arc<dyn PiCalculator>, digits: u32) -> Result<Timing, PiError> {
    let start = Instant::now();
    let value = calc.compute(digits)?;
    Ok(Timing {
        value,
        duration: start.elapsed(),
    })
}
