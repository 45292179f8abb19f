//! Calibration engine: find the fastest chunk size for each algorithm.

use std::time::Duration;

use pibench_core::calculator::{ParallelSampling, ParallelSeries, PiCalculator, PiError};
use pibench_core::options::{SamplingOptions, SeriesOptions};
use pibench_core::worker::available_cores;

use crate::profile::{self, CalibrationProfile};
use crate::runner::measure;

/// Mode of calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationMode {
    /// Every candidate at a realistic size.
    Full,
    /// Fewer candidates at a small size.
    Quick,
}

/// Sizes and candidates timed by a calibration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalibrationPlan {
    /// Digits requested from the series.
    pub series_digits: u32,
    /// Digits requested from the sampler.
    pub sampling_digits: u32,
    /// Series chunk sizes to try.
    pub series_candidates: Vec<u64>,
    /// Sampling chunk sizes to try.
    pub sampling_candidates: Vec<u64>,
    /// Untimed runs per candidate.
    pub warmup_iters: u32,
    /// Timed runs per candidate.
    pub measure_iters: u32,
}

impl CalibrationPlan {
    /// Plan for [`CalibrationMode::Full`].
    #[must_use]
    pub fn full() -> Self {
        Self {
            series_digits: 3_000,
            sampling_digits: 1_000,
            series_candidates: vec![25, 50, 100, 200, 400, 800],
            sampling_candidates: vec![50_000, 125_000, 250_000, 500_000, 1_000_000],
            warmup_iters: 1,
            measure_iters: 5,
        }
    }

    /// Plan for [`CalibrationMode::Quick`].
    #[must_use]
    pub fn quick() -> Self {
        Self {
            series_digits: 800,
            sampling_digits: 200,
            series_candidates: vec![50, 100, 200],
            sampling_candidates: vec![100_000, 250_000],
            warmup_iters: 1,
            measure_iters: 3,
        }
    }
}

/// Progress callback for calibration.
pub type ProgressCallback = Box<dyn Fn(CalibrationProgress) + Send>;

/// Progress information during calibration.
#[derive(Debug, Clone)]
pub struct CalibrationProgress {
    /// Current step name.
    pub step: String,
    /// Current step number (1-based).
    pub current: usize,
    /// Total number of steps.
    pub total: usize,
}

/// Calibration engine that determines the fastest chunk sizes.
pub struct CalibrationEngine {
    mode: CalibrationMode,
    plan: CalibrationPlan,
    progress_cb: Option<ProgressCallback>,
}

impl CalibrationEngine {
    /// Create a new calibration engine.
    #[must_use]
    pub fn new(mode: CalibrationMode) -> Self {
        let plan = match mode {
            CalibrationMode::Quick => CalibrationPlan::quick(),
            CalibrationMode::Full => CalibrationPlan::full(),
        };
        Self {
            mode,
            plan,
            progress_cb: None,
        }
    }

    /// Replace the plan.
    #[must_use]
    pub fn with_plan(mut self, plan: CalibrationPlan) -> Self {
        self.plan = plan;
        self
    }

    /// Set a progress callback.
    #[must_use]
    pub fn with_progress(mut self, cb: ProgressCallback) -> Self {
        self.progress_cb = Some(cb);
        self
    }

    /// Mode this engine was built for.
    #[must_use]
    pub fn mode(&self) -> CalibrationMode {
        self.mode
    }

    /// Run calibration and produce a profile.
    pub fn calibrate(&self) -> Result<CalibrationProfile, PiError> {
        self.run_plan()
    }

    fn report_progress(&self, step: &str, current: usize, total: usize) {
        if let Some(cb) = &self.progress_cb {
            cb(CalibrationProgress {
                step: step.to_string(),
                current,
                total,
            });
        }
    }

    fn run_plan(&self) -> Result<CalibrationProfile, PiError> {
        let plan = &self.plan;
        let total_steps = 3;

        self.report_progress("Timing series chunk sizes", 1, total_steps);
        let series_chunk_size = fastest_chunk(&plan.series_candidates, |chunk_size| {
            let calc = ParallelSeries::new(SeriesOptions {
                chunk_size,
                ..SeriesOptions::default()
            });
            self.time(&calc, plan.series_digits)
        })?;

        self.report_progress("Timing sampling chunk sizes", 2, total_steps);
        let sampling_chunk_size = fastest_chunk(&plan.sampling_candidates, |chunk_size| {
            let calc = ParallelSampling::new(SamplingOptions {
                chunk_size,
                seed: Some(0x5EED),
                ..SamplingOptions::default()
            });
            self.time(&calc, plan.sampling_digits)
        })?;

        self.report_progress("Building profile", 3, total_steps);
        let profile = CalibrationProfile {
            version: profile::PROFILE_VERSION,
            series_chunk_size,
            sampling_chunk_size,
            cpu_model: profile::cpu_model(),
            num_cores: available_cores(),
            cpu_fingerprint: profile::cpu_fingerprint(),
            timestamp: profile::current_timestamp(),
        };
        tracing::info!(series_chunk_size, sampling_chunk_size, "calibration finished");
        Ok(profile)
    }

    fn time(&self, calc: &dyn PiCalculator, digits: u32) -> Result<Duration, PiError> {
        let m = measure(self.plan.warmup_iters, self.plan.measure_iters, || {
            calc.compute(digits).map(drop)
        })?;
        Ok(m.median)
    }
}

/// Candidate with the smallest time; earlier candidates win ties.
pub fn fastest_chunk<F>(candidates: &[u64], mut time: F) -> Result<u64, PiError>
where
    F: FnMut(u64) -> Result<Duration, PiError>,
{
    let mut best: Option<(u64, Duration)> = None;
    for &chunk in candidates.iter().filter(|&&c| c > 0) {
        let elapsed = time(chunk)?;
        tracing::debug!(chunk, elapsed_ms = elapsed.as_secs_f64() * 1000.0, "candidate timed");
        if best.map_or(true, |(_, b)| elapsed < b) {
            best = Some((chunk, elapsed));
        }
    }
    best.map(|(chunk, _)| chunk)
        .ok_or_else(|| PiError::Config("no positive chunk size to calibrate".into()))
}
