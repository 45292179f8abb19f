//! Serial/parallel consistency check for the digit series.
//!
//! Chunked summation is exact in this implementation, so a disagreement
//! should never happen; the check still runs and retries the parallel
//! result once when the leading characters differ.

use crate::calculator::PiError;
use crate::constants::VERIFICATION_PREFIX_LEN;

/// Outcome of a consistency check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardOutcome {
    /// The parallel result that was accepted.
    pub value: String,
    /// Whether the parallel result was recomputed.
    pub retried: bool,
}

/// Prefix comparison with a single retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsistencyGuard {
    prefix_len: usize,
    strict: bool,
}

impl ConsistencyGuard {
    /// Guard comparing the first `prefix_len` characters.
    #[must_use]
    pub fn new(prefix_len: usize) -> Self {
        Self {
            prefix_len,
            strict: false,
        }
    }

    /// Fail with [`PiError::Mismatch`] when the retried result still disagrees,
    /// instead of accepting it.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Characters compared.
    #[must_use]
    pub fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    /// Whether both strings agree on the compared prefix.
    #[must_use]
    pub fn agrees(&self, serial: &str, parallel: &str) -> bool {
        prefix(serial, self.prefix_len) == prefix(parallel, self.prefix_len)
    }

    /// Accept `parallel` if it agrees with `serial`; otherwise call `recompute`
    /// once and accept its result.
    pub fn reconcile<F>(
        &self,
        serial: &str,
        parallel: String,
        recompute: F,
    ) -> Result<GuardOutcome, PiError>
    where
        F: FnOnce() -> Result<String, PiError>,
    {
        if self.agrees(serial, &parallel) {
            return Ok(GuardOutcome {
                value: parallel,
                retried: false,
            });
        }

        tracing::warn!(
            prefix = self.prefix_len,
            "serial and parallel results disagree, recomputing parallel result"
        );
        let value = recompute()?;

        if !self.agrees(serial, &value) {
            if self.strict {
                return Err(PiError::Mismatch);
            }
            tracing::warn!("recomputed parallel result still disagrees, accepting it");
        }

        Ok(GuardOutcome {
            value,
            retried: true,
        })
    }
}

impl Default for ConsistencyGuard {
    fn default() -> Self {
        Self::new(VERIFICATION_PREFIX_LEN)
    }
}

fn prefix(s: &str, len: usize) -> &str {
    s.get(..len).unwrap_or(s)
}
