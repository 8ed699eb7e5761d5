//! Discounts

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// Upper bound for any displayed discount.
const MAX_PERCENT: u8 = 100;

/// Percentage saved going from `original` down to `current`, in whole points.
///
/// Degenerate pairs yield `0`: a non-positive or zero `original`, a zero
/// `current`, or a `current` that is not below `original`.
pub fn discount_percent(original: Decimal, current: Decimal) -> u8 {
    if original <= Decimal::ZERO || current.is_zero() || original <= current {
        return 0;
    }

    let Some(fraction) = (original - current).checked_div(original) else {
        return 0;
    };

    fraction
        .checked_mul(Decimal::ONE_HUNDRED)
        .map_or(0, percent_points)
}

/// Round a percentage to whole points and clamp it to `0..=100`.
///
/// Halves round away from zero, so `37.5` becomes `38`.
pub fn percent_points(percent: Decimal) -> u8 {
    let rounded = percent.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    if rounded <= Decimal::ZERO {
        return 0;
    }

    rounded
        .to_u8()
        .map_or(MAX_PERCENT, |points| points.min(MAX_PERCENT))
}
