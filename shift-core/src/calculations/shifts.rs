//! Aggregation of worked shifts into hour totals and pay.
//!
//! Shifts are selected by date over a half-open window `[start, end)`, the
//! same convention calendar months and pay periods use.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::overtime::{OvertimeMultiplier, OvertimePay, overtime_pay};
use crate::calculations::recurrence::next_occurrence;
use crate::calculations::{PayError, RecurrenceError};
use crate::models::{RecurringEvent, Shift};

/// Errors that can occur while summarizing shifts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShiftSummaryError {
    #[error("shift on {date} has negative hours ({hours})")]
    NegativeHours { date: NaiveDate, hours: Decimal },

    #[error(transparent)]
    Pay(#[from] PayError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursSummary {
    pub shift_count: usize,
    pub regular_hours: Decimal,
    pub overtime_hours: Decimal,
    pub total_hours: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftPaySummary {
    pub hours: HoursSummary,
    pub pay: OvertimePay,
}

/// A pay period: the days from `start` up to, but not including, `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PayPeriod {
    pub fn contains(
        &self,
        date: NaiveDate,
    ) -> bool {
        date >= self.start && date < self.end
    }
}

/// Totals regular and overtime hours for shifts dated in
/// `[range_start, range_end)`.
///
/// # Errors
///
/// - [`ShiftSummaryError::NegativeHours`] for the first selected shift with
///   negative hours.
/// - [`PayError::AmountOverflow`], wrapped in [`ShiftSummaryError::Pay`], if
///   the hour totals do not fit in a [`Decimal`].
pub fn summarize_hours(
    shifts: &[Shift],
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Result<HoursSummary, ShiftSummaryError> {
    let mut summary = HoursSummary::default();

    for shift in shifts
        .iter()
        .filter(|s| s.date >= range_start && s.date < range_end)
    {
        if shift.hours < Decimal::ZERO {
            return Err(ShiftSummaryError::NegativeHours {
                date: shift.date,
                hours: shift.hours,
            });
        }
        let (bucket, label) = if shift.overtime {
            (&mut summary.overtime_hours, "overtime hours")
        } else {
            (&mut summary.regular_hours, "regular hours")
        };
        *bucket = bucket
            .checked_add(shift.hours)
            .ok_or(PayError::AmountOverflow(label))?;
        summary.shift_count += 1;
    }
    summary.total_hours = summary
        .regular_hours
        .checked_add(summary.overtime_hours)
        .ok_or(PayError::AmountOverflow("total hours"))?;

    debug!(
        %range_start,
        %range_end,
        shifts = summary.shift_count,
        total_hours = %summary.total_hours,
        "summarized shifts"
    );
    Ok(summary)
}

/// Hours and pay for shifts dated in `[range_start, range_end)`.
///
/// # Errors
///
/// Propagates [`summarize_hours`] and [`overtime_pay`] failures.
pub fn summarize_pay(
    shifts: &[Shift],
    range_start: NaiveDate,
    range_end: NaiveDate,
    hourly_rate: Decimal,
    multiplier: OvertimeMultiplier,
) -> Result<ShiftPaySummary, ShiftSummaryError> {
    let hours = summarize_hours(shifts, range_start, range_end)?;
    let pay = overtime_pay(
        hours.regular_hours,
        hours.overtime_hours,
        hourly_rate,
        multiplier,
    )?;
    Ok(ShiftPaySummary { hours, pay })
}

/// The pay period ending at the payday on or after `reference_date`.
///
/// The period covers the `interval_weeks × 7` days before that payday; the
/// payday itself belongs to the following period.
///
/// # Errors
///
/// Propagates [`next_occurrence`] failures, and reports
/// [`RecurrenceError::DateOutOfRange`] if the period start cannot be
/// represented.
pub fn pay_period_for(
    payday: &RecurringEvent,
    reference_date: NaiveDate,
) -> Result<PayPeriod, RecurrenceError> {
    let end = next_occurrence(payday, reference_date)?;
    let length = u64::from(payday.interval_weeks) * 7;
    let start = end
        .checked_sub_days(Days::new(length))
        .ok_or_else(|| RecurrenceError::DateOutOfRange {
            event_id: payday.id.clone(),
        })?;

    Ok(PayPeriod { start, end })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::EventKind;

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn two_weeks_of_shifts() -> Vec<Shift> {
        vec![
            Shift::regular(date(2025, 4, 30), dec!(12)),
            Shift::regular(date(2025, 5, 1), dec!(12)),
            Shift::regular(date(2025, 5, 2), dec!(12)),
            Shift::overtime(date(2025, 5, 3), dec!(8)),
            Shift::regular(date(2025, 5, 8), dec!(12)),
            Shift::regular(date(2025, 5, 9), dec!(12)),
            Shift::overtime(date(2025, 5, 10), dec!(4.5)),
            Shift::regular(date(2025, 5, 16), dec!(12)),
        ]
    }

    // =========================================================================
    // summarize_hours tests
    // =========================================================================

    #[test]
    fn summarize_hours_splits_regular_and_overtime() {
        let result =
            summarize_hours(&two_weeks_of_shifts(), date(2025, 5, 2), date(2025, 5, 16)).unwrap();

        assert_eq!(
            result,
            HoursSummary {
                shift_count: 5,
                regular_hours: dec!(36),
                overtime_hours: dec!(12.5),
                total_hours: dec!(48.5),
            }
        );
    }

    #[test]
    fn summarize_hours_empty_window() {
        let result =
            summarize_hours(&two_weeks_of_shifts(), date(2025, 6, 1), date(2025, 7, 1)).unwrap();

        assert_eq!(result, HoursSummary::default());
    }

    #[test]
    fn summarize_hours_rejects_negative_hours() {
        let shifts = vec![Shift::regular(date(2025, 5, 5), dec!(-4))];

        assert_eq!(
            summarize_hours(&shifts, date(2025, 5, 1), date(2025, 6, 1)),
            Err(ShiftSummaryError::NegativeHours {
                date: date(2025, 5, 5),
                hours: dec!(-4),
            })
        );
    }

    #[test]
    fn summarize_hours_ignores_negative_hours_outside_window() {
        let shifts = vec![
            Shift::regular(date(2025, 4, 5), dec!(-4)),
            Shift::regular(date(2025, 5, 5), dec!(8)),
        ];

        let result = summarize_hours(&shifts, date(2025, 5, 1), date(2025, 6, 1)).unwrap();

        assert_eq!(result.total_hours, dec!(8));
    }

    #[test]
    fn summarize_hours_reports_overflowing_totals() {
        let shifts = vec![
            Shift::regular(date(2025, 5, 5), Decimal::MAX),
            Shift::regular(date(2025, 5, 6), dec!(8)),
        ];

        assert_eq!(
            summarize_hours(&shifts, date(2025, 5, 1), date(2025, 6, 1)),
            Err(ShiftSummaryError::Pay(PayError::AmountOverflow("regular hours")))
        );
    }

    #[test]
    fn summarize_hours_reports_overflowing_grand_total() {
        let shifts = vec![
            Shift::regular(date(2025, 5, 5), Decimal::MAX),
            Shift::overtime(date(2025, 5, 6), dec!(8)),
        ];

        assert_eq!(
            summarize_hours(&shifts, date(2025, 5, 1), date(2025, 6, 1)),
            Err(ShiftSummaryError::Pay(PayError::AmountOverflow("total hours")))
        );
    }

    // =========================================================================
    // summarize_pay tests
    // =========================================================================

    #[test]
    fn summarize_pay_combines_hours_and_overtime_pay() {
        let result = summarize_pay(
            &two_weeks_of_shifts(),
            date(2025, 5, 2),
            date(2025, 5, 16),
            dec!(40),
            OvertimeMultiplier::TimeAndAHalf,
        )
        .unwrap();

        assert_eq!(result.pay.regular_pay, dec!(1440.00));
        assert_eq!(result.pay.overtime_pay, dec!(750.00));
        assert_eq!(result.pay.total_pay, dec!(2190.00));
    }

    #[test]
    fn summarize_pay_rejects_negative_rate() {
        let result = summarize_pay(
            &two_weeks_of_shifts(),
            date(2025, 5, 2),
            date(2025, 5, 16),
            dec!(-1),
            OvertimeMultiplier::DoubleTime,
        );

        assert_eq!(
            result,
            Err(ShiftSummaryError::Pay(PayError::NegativeHourlyRate(dec!(-1))))
        );
    }

    #[test]
    fn summarize_pay_reports_overflowing_pay() {
        let result = summarize_pay(
            &two_weeks_of_shifts(),
            date(2025, 5, 2),
            date(2025, 5, 16),
            Decimal::MAX,
            OvertimeMultiplier::TimeAndAHalf,
        );

        assert_eq!(
            result,
            Err(ShiftSummaryError::Pay(PayError::AmountOverflow("regular pay")))
        );
    }

    // =========================================================================
    // pay_period_for tests
    // =========================================================================

    #[test]
    fn pay_period_ends_at_next_payday() {
        let payday = RecurringEvent::new("pay", "Payday", EventKind::Payday, date(2025, 4, 18), 2);

        let period = pay_period_for(&payday, date(2025, 5, 10)).unwrap();

        assert_eq!(
            period,
            PayPeriod {
                start: date(2025, 5, 2),
                end: date(2025, 5, 16),
            }
        );
        assert!(period.contains(date(2025, 5, 2)));
        assert!(!period.contains(date(2025, 5, 16)));
    }

    #[test]
    fn pay_period_on_payday_ends_that_day() {
        let payday = RecurringEvent::new("pay", "Payday", EventKind::Payday, date(2025, 4, 18), 2);

        let period = pay_period_for(&payday, date(2025, 5, 2)).unwrap();

        assert_eq!(period.start, date(2025, 4, 18));
        assert_eq!(period.end, date(2025, 5, 2));
    }

    #[test]
    fn pay_period_rejects_zero_interval() {
        let payday = RecurringEvent::new("pay", "Payday", EventKind::Payday, date(2025, 4, 18), 0);

        assert!(matches!(
            pay_period_for(&payday, date(2025, 5, 2)),
            Err(RecurrenceError::InvalidInterval { .. })
        ));
    }
}
