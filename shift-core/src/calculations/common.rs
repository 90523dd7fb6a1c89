//! Rounding and clamping helpers shared by the pay calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary value to cents using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Arguments
///
/// * `value` - The amount to round
///
/// # Returns
///
/// The amount rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use shift_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(1361.405)), dec!(1361.41));
/// assert_eq!(round_half_up(dec!(1361.404)), dec!(1361.40));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a ratio (such as an effective tax rate) to four decimal places.
///
/// ```
/// use rust_decimal_macros::dec;
/// use shift_core::calculations::common::round_rate;
///
/// assert_eq!(round_rate(dec!(0.156087)), dec!(0.1561));
/// ```
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps a value at zero from below.
///
/// # Arguments
///
/// * `value` - The decimal value to clamp
///
/// # Returns
///
/// `value` itself when it is zero or positive, otherwise zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use shift_core::calculations::common::floor_at_zero;
///
/// assert_eq!(floor_at_zero(dec!(56500)), dec!(56500));
/// assert_eq!(floor_at_zero(dec!(-1500)), dec!(0));
/// ```
pub fn floor_at_zero(value: Decimal) -> Decimal {
    if value < Decimal::ZERO {
        Decimal::ZERO
    } else {
        value
    }
}

/// Formats a rate as a percentage without trailing zeros.
///
/// # Arguments
///
/// * `rate` - A fractional rate, normally in [0, 1]
///
/// # Returns
///
/// The rate times 100 followed by `%`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use shift_core::calculations::common::format_percent;
///
/// assert_eq!(format_percent(dec!(0.205)), "20.5%");
/// assert_eq!(format_percent(dec!(0.1500)), "15%");
/// assert_eq!(format_percent(dec!(0.0505)), "5.05%");
/// ```
pub fn format_percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
