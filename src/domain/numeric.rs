//! Shared numeric helpers for replay arithmetic.
//!
//! Every component performing zero-crossing detection or ratio math goes
//! through this module so the epsilon tolerance lives in exactly one place.

use crate::domain::Decimal;
use rust_decimal::Decimal as RustDecimal;

/// Tolerance for treating a net size or denominator as zero (1e-9).
///
/// Decimal division rounds, so long replay sequences can leave residue on a
/// position that has in fact been fully closed.
pub fn epsilon() -> Decimal {
    Decimal::new(RustDecimal::new(1, 9))
}

/// True if `value` is within epsilon of zero.
pub fn is_effectively_zero(value: Decimal) -> bool {
    value.abs() < epsilon()
}

/// Weighted average of two values, weighting by absolute weight.
///
/// Returns 0 when both weights are zero, so the first opening trade of a
/// lifecycle takes its own price exactly.
pub fn weighted_average(
    current_value: Decimal,
    current_weight: Decimal,
    new_value: Decimal,
    new_weight: Decimal,
) -> Decimal {
    let total_weight = current_weight.abs() + new_weight.abs();
    if total_weight.is_zero() {
        return Decimal::zero();
    }
    (current_weight.abs() * current_value + new_weight.abs() * new_value) / total_weight
}

/// Division that yields 0 instead of failing on an epsilon-zero denominator.
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if is_effectively_zero(denominator) {
        return Decimal::zero();
    }
    numerator / denominator
}
