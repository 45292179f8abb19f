//! Calculator factory and registry.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::calculator::{
    ExecutionMode, ParallelSampling, ParallelSeries, PiCalculator, PiError, SerialSampling,
    SerialSeries,
};
use crate::options::{SamplingOptions, SeriesOptions};

/// The two numeric methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Bailey–Borwein–Plouffe digit series.
    Bbp,
    /// Monte Carlo sampling.
    MonteCarlo,
}

impl Algorithm {
    /// Every algorithm, in display order.
    pub const ALL: [Algorithm; 2] = [Algorithm::Bbp, Algorithm::MonteCarlo];

    /// Registry key prefix.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Bbp => "bbp",
            Self::MonteCarlo => "montecarlo",
        }
    }

    /// Label used in result file names.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Bbp => "BBP",
            Self::MonteCarlo => "MonteCarlo",
        }
    }

    /// Stem of the per-algorithm timing log.
    #[must_use]
    pub fn log_stem(self) -> &'static str {
        match self {
            Self::Bbp => "bbpCompare",
            Self::MonteCarlo => "montecarloCompare",
        }
    }

    /// Whether serial and parallel results must agree.
    #[must_use]
    pub fn is_deterministic(self) -> bool {
        matches!(self, Self::Bbp)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Algorithm {
    type Err = PiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bbp" | "series" => Ok(Self::Bbp),
            "montecarlo" | "monte-carlo" | "mc" => Ok(Self::MonteCarlo),
            _ => Err(PiError::Config(format!("unknown algorithm: {s}"))),
        }
    }
}

/// Serial and parallel calculators for one algorithm.
#[derive(Clone)]
pub struct CalculatorPair {
    /// Algorithm both calculators implement.
    pub algorithm: Algorithm,
    /// Single control flow.
    pub serial: Arc<dyn PiCalculator>,
    /// Worker pool.
    pub parallel: Arc<dyn PiCalculator>,
}

impl CalculatorPair {
    /// Calculator for `mode`.
    #[must_use]
    pub fn for_mode(&self, mode: ExecutionMode) -> &Arc<dyn PiCalculator> {
        match mode {
            ExecutionMode::Serial => &self.serial,
            ExecutionMode::Parallel => &self.parallel,
        }
    }
}

impl fmt::Debug for CalculatorPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculatorPair")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

/// Factory trait for creating calculators.
pub trait CalculatorFactory: Send + Sync {
    /// Get or create a calculator by name, e.g. `bbp-parallel`.
    fn get(&self, name: &str) -> Result<Arc<dyn PiCalculator>, PiError>;

    /// Both calculators for `algorithm`.
    fn pair(&self, algorithm: Algorithm) -> Result<CalculatorPair, PiError> {
        Ok(CalculatorPair {
            algorithm,
            serial: self.get(&format!("{}-serial", algorithm.key()))?,
            parallel: self.get(&format!("{}-parallel", algorithm.key()))?,
        })
    }
}

/// Default factory with lazy creation and cache.
pub struct DefaultFactory {
    series: SeriesOptions,
    sampling: SamplingOptions,
    cache: RwLock<HashMap<String, Arc<dyn PiCalculator>>>,
}

impl DefaultFactory {
    /// Create a factory with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(SeriesOptions::default(), SamplingOptions::default())
    }

    /// Create a factory whose calculators use the given options.
    #[must_use]
    pub fn with_options(series: SeriesOptions, sampling: SamplingOptions) -> Self {
        Self {
            series: series.normalize(),
            sampling: sampling.normalize(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn create_calculator(&self, name: &str) -> Result<Arc<dyn PiCalculator>, PiError> {
        match name {
            "bbp-serial" => Ok(Arc::new(SerialSeries::new(self.series.clone()))),
            "bbp-parallel" => Ok(Arc::new(ParallelSeries::new(self.series.clone()))),
            "montecarlo-serial" => Ok(Arc::new(SerialSampling::new(self.sampling.clone()))),
            "montecarlo-parallel" => Ok(Arc::new(ParallelSampling::new(self.sampling.clone()))),
            _ => Err(PiError::Config(format!("unknown calculator: {name}"))),
        }
    }
}

impl Default for DefaultFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorFactory for DefaultFactory {
    fn get(&self, name: &str) -> Result<Arc<dyn PiCalculator>, PiError> {
        if let Some(calc) = self.cache.read().get(name) {
            return Ok(Arc::clone(calc));
        }

        let calc = self.create_calculator(name)?;
        self.cache
            .write()
            .insert(name.to_string(), Arc::clone(&calc));
        Ok(calc)
    }
}
