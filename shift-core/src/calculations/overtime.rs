//! Overtime pay.
//!
//! Overtime hours are paid at the base hourly rate times a policy multiplier,
//! which is either time-and-a-half or double time.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use shift_core::calculations::overtime::{OvertimeMultiplier, overtime_pay};
//!
//! let pay = overtime_pay(dec!(40), dec!(8), dec!(25), OvertimeMultiplier::TimeAndAHalf).unwrap();
//!
//! assert_eq!(pay.regular_pay, dec!(1000.00));
//! assert_eq!(pay.overtime_pay, dec!(300.00));
//! assert_eq!(pay.total_pay, dec!(1300.00));
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::PayError;
use crate::calculations::common::round_half_up;

/// The closed set of overtime multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OvertimeMultiplier {
    /// 1.5×
    #[default]
    TimeAndAHalf,
    /// 2×
    DoubleTime,
}

impl OvertimeMultiplier {
    pub fn value(&self) -> Decimal {
        match self {
            Self::TimeAndAHalf => Decimal::new(15, 1),
            Self::DoubleTime => Decimal::TWO,
        }
    }
}

impl TryFrom<Decimal> for OvertimeMultiplier {
    type Error = PayError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value == Decimal::new(15, 1) {
            Ok(Self::TimeAndAHalf)
        } else if value == Decimal::TWO {
            Ok(Self::DoubleTime)
        } else {
            Err(PayError::UnsupportedMultiplier(value))
        }
    }
}

impl From<OvertimeMultiplier> for Decimal {
    fn from(multiplier: OvertimeMultiplier) -> Self {
        multiplier.value()
    }
}

impl FromStr for OvertimeMultiplier {
    type Err = PayError;

    /// Accepts `1.5`, `2`, `2.0`, optionally suffixed with `x`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed
            .strip_suffix(['x', 'X'])
            .unwrap_or(trimmed)
            .trim();
        let value = number
            .parse::<Decimal>()
            .map_err(|_| PayError::UnparsableMultiplier(s.to_string()))?;
        Self::try_from(value)
    }
}

impl fmt::Display for OvertimeMultiplier {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}x", self.value())
    }
}

/// Regular, overtime and total pay for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimePay {
    pub regular_pay: Decimal,
    pub overtime_pay: Decimal,

    /// Always exactly `regular_pay + overtime_pay`.
    pub total_pay: Decimal,
}

/// Computes regular and overtime pay.
///
/// Each component is rounded to cents before they are added, so the total is
/// exactly the sum of the two displayed components.
///
/// # Errors
///
/// - [`PayError::NegativeHours`] if either hour count is negative.
/// - [`PayError::NegativeHourlyRate`] if the hourly rate is negative.
/// - [`PayError::AmountOverflow`] if any amount does not fit in a [`Decimal`].
pub fn overtime_pay(
    regular_hours: Decimal,
    overtime_hours: Decimal,
    hourly_rate: Decimal,
    multiplier: OvertimeMultiplier,
) -> Result<OvertimePay, PayError> {
    if regular_hours < Decimal::ZERO {
        return Err(PayError::NegativeHours(regular_hours));
    }
    if overtime_hours < Decimal::ZERO {
        return Err(PayError::NegativeHours(overtime_hours));
    }
    if hourly_rate < Decimal::ZERO {
        return Err(PayError::NegativeHourlyRate(hourly_rate));
    }

    let regular_pay = regular_hours
        .checked_mul(hourly_rate)
        .map(round_half_up)
        .ok_or(PayError::AmountOverflow("regular pay"))?;
    let overtime_pay = hourly_rate
        .checked_mul(multiplier.value())
        .and_then(|rate| overtime_hours.checked_mul(rate))
        .map(round_half_up)
        .ok_or(PayError::AmountOverflow("overtime pay"))?;
    let total_pay = regular_pay
        .checked_add(overtime_pay)
        .ok_or(PayError::AmountOverflow("total pay"))?;

    Ok(OvertimePay {
        regular_pay,
        overtime_pay,
        total_pay,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // overtime_pay tests
    // =========================================================================

    #[test]
    fn overtime_pay_time_and_a_half() {
        let result =
            overtime_pay(dec!(40), dec!(8), dec!(25), OvertimeMultiplier::TimeAndAHalf).unwrap();

        assert_eq!(
            result,
            OvertimePay {
                regular_pay: dec!(1000.00),
                overtime_pay: dec!(300.00),
                total_pay: dec!(1300.00),
            }
        );
    }

    #[test]
    fn overtime_pay_double_time() {
        let result =
            overtime_pay(dec!(40), dec!(8), dec!(25), OvertimeMultiplier::DoubleTime).unwrap();

        assert_eq!(result.overtime_pay, dec!(400.00));
        assert_eq!(result.total_pay, dec!(1400.00));
    }

    #[test]
    fn overtime_pay_rounds_each_component() {
        let result =
            overtime_pay(dec!(37.5), dec!(3.25), dec!(31.27), OvertimeMultiplier::TimeAndAHalf)
                .unwrap();

        // 37.5 × 31.27 = 1172.625; 3.25 × 31.27 × 1.5 = 152.44125
        assert_eq!(result.regular_pay, dec!(1172.63));
        assert_eq!(result.overtime_pay, dec!(152.44));
        assert_eq!(result.total_pay, result.regular_pay + result.overtime_pay);
    }

    #[test]
    fn overtime_pay_without_overtime_hours() {
        let result =
            overtime_pay(dec!(80), dec!(0), dec!(30), OvertimeMultiplier::DoubleTime).unwrap();

        assert_eq!(result.overtime_pay, dec!(0));
        assert_eq!(result.total_pay, dec!(2400));
    }

    #[test]
    fn overtime_pay_rejects_negative_regular_hours() {
        let result = overtime_pay(dec!(-1), dec!(0), dec!(25), OvertimeMultiplier::TimeAndAHalf);

        assert_eq!(result, Err(PayError::NegativeHours(dec!(-1))));
    }

    #[test]
    fn overtime_pay_rejects_negative_overtime_hours() {
        let result = overtime_pay(dec!(40), dec!(-8), dec!(25), OvertimeMultiplier::TimeAndAHalf);

        assert_eq!(result, Err(PayError::NegativeHours(dec!(-8))));
    }

    #[test]
    fn overtime_pay_rejects_negative_rate() {
        let result = overtime_pay(dec!(40), dec!(8), dec!(-25), OvertimeMultiplier::TimeAndAHalf);

        assert_eq!(result, Err(PayError::NegativeHourlyRate(dec!(-25))));
    }

    #[test]
    fn overtime_pay_reports_overflowing_regular_pay() {
        let result =
            overtime_pay(Decimal::MAX, dec!(0), dec!(2), OvertimeMultiplier::TimeAndAHalf);

        assert_eq!(result, Err(PayError::AmountOverflow("regular pay")));
    }

    #[test]
    fn overtime_pay_reports_overflowing_overtime_pay() {
        let result =
            overtime_pay(dec!(0), Decimal::MAX, dec!(1), OvertimeMultiplier::DoubleTime);

        assert_eq!(result, Err(PayError::AmountOverflow("overtime pay")));
    }

    #[test]
    fn overtime_pay_reports_overflowing_total() {
        let result =
            overtime_pay(Decimal::MAX, dec!(1), dec!(1), OvertimeMultiplier::DoubleTime);

        assert_eq!(result, Err(PayError::AmountOverflow("total pay")));
    }

    // =========================================================================
    // OvertimeMultiplier tests
    // =========================================================================

    #[test]
    fn multiplier_accepts_allowed_values() {
        assert_eq!(
            OvertimeMultiplier::try_from(dec!(1.5)),
            Ok(OvertimeMultiplier::TimeAndAHalf)
        );
        assert_eq!(OvertimeMultiplier::try_from(dec!(2)), Ok(OvertimeMultiplier::DoubleTime));
        assert_eq!(
            OvertimeMultiplier::try_from(dec!(2.00)),
            Ok(OvertimeMultiplier::DoubleTime)
        );
    }

    #[test]
    fn multiplier_rejects_other_values() {
        for value in [dec!(1), dec!(1.25), dec!(1.75), dec!(3), dec!(-1.5)] {
            assert_eq!(
                OvertimeMultiplier::try_from(value),
                Err(PayError::UnsupportedMultiplier(value))
            );
        }
    }

    #[test]
    fn multiplier_parses_from_text() {
        assert_eq!("1.5".parse::<OvertimeMultiplier>(), Ok(OvertimeMultiplier::TimeAndAHalf));
        assert_eq!(" 2x ".parse::<OvertimeMultiplier>(), Ok(OvertimeMultiplier::DoubleTime));
        assert_eq!("2.0".parse::<OvertimeMultiplier>(), Ok(OvertimeMultiplier::DoubleTime));
    }

    #[test]
    fn multiplier_rejects_garbage_text() {
        assert_eq!(
            "double".parse::<OvertimeMultiplier>(),
            Err(PayError::UnparsableMultiplier("double".to_string()))
        );
        assert_eq!(
            "1.75".parse::<OvertimeMultiplier>(),
            Err(PayError::UnsupportedMultiplier(dec!(1.75)))
        );
    }

    #[test]
    fn multiplier_display() {
        assert_eq!(OvertimeMultiplier::TimeAndAHalf.to_string(), "1.5x");
        assert_eq!(OvertimeMultiplier::DoubleTime.to_string(), "2x");
    }
}
