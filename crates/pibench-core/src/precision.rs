//! Decimal precision for one execution unit.
//!
//! A `PrecisionContext` is an immutable value: every worker builds its own
//! from the two integers it receives (`requested_digits`, `guard_digits`),
//! so no precision state is ever shared across workers.
//!
//! High-precision values are fixed-point integers counted in units of
//! `10^-fractional_digits`. Addition of such values is exact.

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::constants::{DEFAULT_GUARD_DIGITS, MIN_GUARD_DIGITS};

/// Precision settings plus the fixed-point scale they imply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecisionContext {
    requested_digits: u32,
    guard_digits: u32,
    scale: BigUint,
}

impl PrecisionContext {
    /// Context for `requested_digits` with the default guard.
    #[must_use]
    pub fn new(requested_digits: u32) -> Self {
        Self::with_guard(requested_digits, DEFAULT_GUARD_DIGITS)
    }

    /// Context with an explicit guard. Guards below [`MIN_GUARD_DIGITS`] are raised to it.
    #[must_use]
    pub fn with_guard(requested_digits: u32, guard_digits: u32) -> Self {
        let guard_digits = guard_digits.max(MIN_GUARD_DIGITS);
        let scale = BigUint::from(10u32).pow(requested_digits.saturating_add(guard_digits));
        Self {
            requested_digits,
            guard_digits,
            scale,
        }
    }

    /// Digits the caller asked for.
    #[must_use]
    pub fn requested_digits(&self) -> u32 {
        self.requested_digits
    }

    /// Extra digits carried to absorb rounding error.
    #[must_use]
    pub fn guard_digits(&self) -> u32 {
        self.guard_digits
    }

    /// Fractional digits held by every value under this context.
    #[must_use]
    pub fn fractional_digits(&self) -> u32 {
        self.requested_digits.saturating_add(self.guard_digits)
    }

    /// `10^fractional_digits`, the fixed-point representation of 1.
    #[must_use]
    pub fn scale(&self) -> &BigUint {
        &self.scale
    }

    /// Fixed-point value of `numerator / denominator`, truncated toward zero.
    ///
    /// Returns `None` when `denominator` is zero.
    #[must_use]
    pub fn ratio(&self, numerator: &BigUint, denominator: &BigUint) -> Option<BigInt> {
        if denominator.is_zero() {
            return None;
        }
        Some(BigInt::from(&self.scale * numerator / denominator))
    }
}

/// Establish the precision for `requested_digits` in the calling execution unit.
#[must_use]
pub fn set_precision(requested_digits: u32) -> PrecisionContext {
    PrecisionContext::new(requested_digits)
}
