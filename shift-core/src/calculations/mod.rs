//! Scheduling and pay calculations.
//!
//! - [`recurrence`]: occurrence dates of week-interval recurring events.
//! - [`pay`]: marginal income tax, statutory contributions and net pay.
//! - [`overtime`]: regular and overtime pay.
//! - [`shifts`]: hour and pay totals over worked shifts.

pub mod common;
pub mod overtime;
pub mod pay;
pub mod recurrence;
pub mod shifts;

pub use overtime::{OvertimeMultiplier, OvertimePay, overtime_pay};
pub use pay::{PayBreakdown, PayCalculator, PayError, compute_breakdown, contribution, progressive_tax};
pub use recurrence::{
    DEFAULT_MAX_OCCURRENCES, Occurrence, RecurrenceError, describe, describe_from_today,
    describe_occurrence, next_occurrence, next_occurrence_from_today, occurrences_in_range,
    upcoming,
};
pub use shifts::{
    HoursSummary, PayPeriod, ShiftPaySummary, ShiftSummaryError, pay_period_for, summarize_hours,
    summarize_pay,
};
