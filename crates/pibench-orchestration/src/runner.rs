//! Background benchmark thread.
//!
//! Benchmarks run on their own thread so the front end stays responsive; the
//! thread reports phases and outcomes over a channel.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};

use pibench_core::calculator::PiError;
use pibench_core::registry::{Algorithm, CalculatorPair};

use crate::benchmark::{run_benchmark, BenchmarkConfig};
use crate::interfaces::{BenchmarkReport, Phase, ProgressReporter};

/// Message sent by the benchmark thread.
#[derive(Debug, Clone)]
pub enum BenchmarkEvent {
    /// A benchmark entered a new phase.
    Phase {
        /// Algorithm being benchmarked.
        algorithm: Algorithm,
        /// The new phase.
        phase: Phase,
    },
    /// A benchmark finished.
    Finished(Box<Result<BenchmarkReport, PiError>>),
    /// Every benchmark has finished.
    Done,
}

/// Reporter that forwards phases to the event channel.
struct ChannelReporter {
    tx: Sender<BenchmarkEvent>,
}

impl ProgressReporter for ChannelReporter {
    fn phase(&self, algorithm: Algorithm, phase: Phase) {
        // receiver gone means nobody is listening
        let _ = self.tx.send(BenchmarkEvent::Phase { algorithm, phase });
    }

    fn complete(&self) {
        let _ = self.tx.send(BenchmarkEvent::Done);
    }
}

/// Handle to a running benchmark thread.
pub struct BenchmarkHandle {
    events: Receiver<BenchmarkEvent>,
    thread: JoinHandle<()>,
}

impl BenchmarkHandle {
    /// Drain events until the thread is done, passing phases to `on_phase`,
    /// and return every outcome in run order.
    pub fn wait<F>(self, mut on_phase: F) -> Result<Vec<Result<BenchmarkReport, PiError>>, PiError>
    where
        F: FnMut(Algorithm, Phase),
    {
        let mut outcomes = Vec::new();
        for event in &self.events {
            match event {
                BenchmarkEvent::Phase { algorithm, phase } => on_phase(algorithm, phase),
                BenchmarkEvent::Finished(outcome) => outcomes.push(*outcome),
                BenchmarkEvent::Done => break,
            }
        }
        self.thread
            .join()
            .map_err(|_| PiError::Calculation("benchmark thread panicked".into()))?;
        Ok(outcomes)
    }
}

/// Run `pairs` one after another on a dedicated thread.
pub fn spawn_benchmark(
    pairs: Vec<CalculatorPair>,
    config: BenchmarkConfig,
) -> Result<BenchmarkHandle, PiError> {
    let (tx, rx) = crossbeam_channel::unbounded();
    let thread = thread::Builder::new()
        .name("pi-benchmark".into())
        .spawn(move || {
            let reporter = ChannelReporter { tx };
            for pair in &pairs {
                let outcome = run_benchmark(pair, &config, &reporter);
                if let Err(e) = &outcome {
                    tracing::warn!(algorithm = %pair.algorithm, "benchmark failed: {e}");
                }
                if reporter
                    .tx
                    .send(BenchmarkEvent::Finished(Box::new(outcome)))
                    .is_err()
                {
                    return;
                }
            }
            reporter.complete();
        })
        .map_err(|e| PiError::Calculation(format!("failed to spawn benchmark thread: {e}")))?;

    Ok(BenchmarkHandle { events: rx, thread })
}
