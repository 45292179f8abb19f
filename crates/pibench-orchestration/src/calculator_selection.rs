//! Calculator selection logic.

use std::str::FromStr;
use std::sync::Arc;

use pibench_core::calculator::{ExecutionMode, PiCalculator, PiError};
use pibench_core::registry::{Algorithm, CalculatorFactory, CalculatorPair};

/// One algorithm or all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmChoice {
    /// A single algorithm.
    Single(Algorithm),
    /// Every algorithm in turn.
    All,
}

impl AlgorithmChoice {
    /// Algorithms covered by this choice.
    #[must_use]
    pub fn algorithms(self) -> Vec<Algorithm> {
        match self {
            Self::Single(algorithm) => vec![algorithm],
            Self::All => Algorithm::ALL.to_vec(),
        }
    }
}

impl FromStr for AlgorithmChoice {
    type Err = PiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Single)
    }
}

/// Serial/parallel pairs to benchmark.
pub fn get_pairs_to_run(
    choice: AlgorithmChoice,
    factory: &dyn CalculatorFactory,
) -> Result<Vec<CalculatorPair>, PiError> {
    choice
        .algorithms()
        .into_iter()
        .map(|algorithm| factory.pair(algorithm))
        .collect()
}

/// Calculators to run in a single execution mode.
pub fn get_calculators_to_run(
    choice: AlgorithmChoice,
    mode: ExecutionMode,
    factory: &dyn CalculatorFactory,
) -> Result<Vec<Arc<dyn PiCalculator>>, PiError> {
    get_pairs_to_run(choice, factory)
        .map(|pairs| pairs.iter().map(|p| Arc::clone(p.for_mode(mode))).collect())
}
