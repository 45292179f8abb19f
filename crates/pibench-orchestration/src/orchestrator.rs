//! Single-mode execution: run each calculator once and time it.

use std::sync::Arc;
use std::time::Instant;

use pibench_core::calculator::PiCalculator;

use crate::interfaces::CalculationResult;

/// Execute calculations with all given calculators.
///
/// Calculators run one after another so their timings do not compete for
/// the worker pool.
pub fn execute_calculations(
    calculators: &[Arc<dyn PiCalculator>],
    digits: u32,
) -> Vec<CalculationResult> {
    calculators
        .iter()
        .map(|calc| {
            let start = Instant::now();
            let outcome = calc.compute(digits);
            let duration = start.elapsed();
            if let Err(e) = &outcome {
                tracing::warn!(algorithm = calc.name(), mode = %calc.mode(), "calculation failed: {e}");
            }
            CalculationResult {
                algorithm: calc.name().to_string(),
                mode: calc.mode(),
                digits,
                outcome,
                duration,
            }
        })
        .collect()
}
