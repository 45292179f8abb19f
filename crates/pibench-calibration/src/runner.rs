//! Timing loop for calibration.

use std::time::{Duration, Instant};

use pibench_core::calculator::PiError;

/// Timings of repeated runs of one closure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    pub mean: Duration,
    pub median: Duration,
    pub min: Duration,
    pub max: Duration,
    pub iterations: u32,
}

/// Run `f` `warmup_iters` times untimed, then `measure_iters` times timed.
///
/// The first error aborts the measurement.
pub fn measure<F>(warmup_iters: u32, measure_iters: u32, mut f: F) -> Result<Measurement, PiError>
where
    F: FnMut() -> Result<(), PiError>,
{
    if measure_iters == 0 {
        return Err(PiError::Config("at least one measured iteration is required".into()));
    }

    for _ in 0..warmup_iters {
        f()?;
    }

    let mut durations = Vec::with_capacity(measure_iters as usize);
    for _ in 0..measure_iters {
        let start = Instant::now();
        f()?;
        durations.push(start.elapsed());
    }

    durations.sort();
    let mid = durations.len() / 2;
    let median = if durations.len() % 2 == 1 {
        durations[mid]
    } else {
        (durations[mid - 1] + durations[mid]) / 2
    };
    let total: Duration = durations.iter().sum();

    Ok(Measurement {
        mean: total / measure_iters,
        median,
        min: durations[0],
        max: durations[durations.len() - 1],
        iterations: measure_iters,
    })
}
