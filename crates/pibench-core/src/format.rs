//! Rendering of fixed-point values as truncated digit strings.

use num_bigint::{BigInt, Sign};
use num_integer::Integer;

use crate::precision::PrecisionContext;

/// Render `value` at full context precision and cut it to
/// `requested_digits + 2` characters.
///
/// Digits past the cut are dropped, never rounded.
#[must_use]
pub fn format_digits(value: &BigInt, ctx: &PrecisionContext) -> String {
    let (whole, fraction) = value.magnitude().div_rem(ctx.scale());
    let sign = if value.sign() == Sign::Minus { "-" } else { "" };
    let width = ctx.fractional_digits() as usize;

    let mut rendered = format!("{sign}{whole}.{:0>width$}", fraction.to_string());
    rendered.truncate(ctx.requested_digits() as usize + 2);
    rendered
}
