//! Task partitioning into contiguous work units.

use std::ops::Range;

use crate::calculator::PiError;

/// A half-open index range `[start, end)` assigned to one worker.
///
/// This pair of integers (plus its chunk index) is the only thing that
/// crosses a worker boundary on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkUnit {
    /// Position of this unit in the partition, and of its result slot.
    pub index: usize,
    /// First index covered.
    pub start: u64,
    /// One past the last index covered.
    pub end: u64,
}

impl WorkUnit {
    /// Number of indices covered.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Whether the unit covers nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The covered indices as a range.
    #[must_use]
    pub fn range(&self) -> Range<u64> {
        self.start..self.end
    }
}

/// Number of units `partition` produces for the given inputs.
#[must_use]
pub fn unit_count(total_work: u64, chunk_size: u64) -> u64 {
    if chunk_size == 0 {
        return 0;
    }
    total_work.div_ceil(chunk_size)
}

/// Split `[0, total_work)` into contiguous units of `chunk_size`.
///
/// The last unit may be shorter. Units are returned in index order.
#[allow(clippy::cast_possible_truncation)]
pub fn partition(total_work: u64, chunk_size: u64) -> Result<Vec<WorkUnit>, PiError> {
    if chunk_size == 0 {
        return Err(PiError::Config("chunk size must be positive".into()));
    }

    let units = (0..unit_count(total_work, chunk_size))
        .map(|i| {
            let start = i * chunk_size;
            WorkUnit {
                index: i as usize,
                start,
                end: start.saturating_add(chunk_size).min(total_work),
            }
        })
        .collect();

    Ok(units)
}
