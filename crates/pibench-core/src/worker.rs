//! Worker execution: run every work unit in isolation, then join.
//!
//! Each unit runs as its own task on a bounded rayon pool. A task receives
//! only its `WorkUnit` and the immutable task description, and hands back one
//! partial result. Results land in an index-addressed vector that is only
//! read after every task has finished.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use rayon::ThreadPoolBuilder;

use crate::calculator::PiError;
use crate::partition::WorkUnit;

/// Algorithm-specific work for one unit.
///
/// Implementations must not share mutable state between calls: every call
/// sets up its own precision context and generator.
pub trait ChunkTask: Sync {
    /// Partial result produced by one unit.
    type Partial: Send;

    /// Evaluate the unit.
    fn run_chunk(&self, unit: WorkUnit) -> Result<Self::Partial, PiError>;
}

/// Fixed-size pool that runs chunk tasks behind a join barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerPool {
    threads: usize,
}

impl WorkerPool {
    /// Pool with `requested` threads, or one per core when `None` or zero.
    #[must_use]
    pub fn new(requested: Option<usize>) -> Self {
        Self {
            threads: worker_count(requested),
        }
    }

    /// Number of worker threads.
    #[must_use]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Run every unit and return the partial results in unit order.
    ///
    /// Blocks until all units have completed. If any unit fails or panics the
    /// whole call fails with the lowest failing chunk index; results of the
    /// surviving units are discarded.
    pub fn execute<T: ChunkTask>(
        &self,
        units: &[WorkUnit],
        task: &T,
    ) -> Result<Vec<T::Partial>, PiError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .thread_name(|i| format!("pi-worker-{i}"))
            .build()
            .map_err(|e| PiError::Calculation(format!("failed to create thread pool: {e}")))?;

        let slots: Vec<Result<T::Partial, PiError>> =
            pool.install(|| units.par_iter().map(|unit| run_isolated(task, *unit)).collect());

        slots.into_iter().collect()
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(None)
    }
}

fn run_isolated<T: ChunkTask>(task: &T, unit: WorkUnit) -> Result<T::Partial, PiError> {
    tracing::debug!(chunk = unit.index, start = unit.start, end = unit.end, "chunk started");

    match panic::catch_unwind(AssertUnwindSafe(|| task.run_chunk(unit))) {
        Ok(Ok(partial)) => {
            tracing::debug!(chunk = unit.index, "chunk finished");
            Ok(partial)
        }
        Ok(Err(err @ PiError::WorkerFailed { .. })) => Err(err),
        Ok(Err(err)) => Err(PiError::WorkerFailed {
            chunk: unit.index,
            reason: err.to_string(),
        }),
        Err(payload) => Err(PiError::WorkerFailed {
            chunk: unit.index,
            reason: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("worker panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("worker panicked: {msg}")
    } else {
        "worker panicked".to_string()
    }
}

/// Get the number of available cores.
#[must_use]
pub fn available_cores() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZero::get)
        .unwrap_or(4)
}

/// Resolve a requested thread count, capped at twice the core count.
#[must_use]
pub fn worker_count(requested: Option<usize>) -> usize {
    let cores = available_cores();
    match requested {
        Some(n) if n > 0 => n.min(cores * 2),
        _ => cores,
    }
}
