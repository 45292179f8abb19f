//! # pibench-orchestration
//!
//! Benchmark runs, calculator selection, and the background benchmark thread.

pub mod benchmark;
pub mod calculator_selection;
pub mod interfaces;
pub mod orchestrator;
pub mod runner;

pub use benchmark::{run_benchmark, BenchmarkConfig};
pub use interfaces::{
    BenchmarkReport, CalculationResult, Phase, ProgressReporter, ResultPresenter, Timing, Verdict,
};
pub use orchestrator::execute_calculations;
pub use runner::{spawn_benchmark, BenchmarkEvent, BenchmarkHandle};
