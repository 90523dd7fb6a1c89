//! Occurrence projection for week-interval recurring events.
//!
//! An event repeats every `interval_weeks × 7` days starting from its anchor
//! date. All arithmetic is done on [`NaiveDate`], which is a plain day count
//! with no time-of-day or time zone, so stepping by a week is always exactly
//! seven calendar days.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use shift_core::calculations::recurrence::{next_occurrence, occurrences_in_range};
//! use shift_core::{EventKind, RecurringEvent};
//!
//! let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
//! let payday = RecurringEvent::new("pay", "Payday", EventKind::Payday, date(2025, 4, 18), 2);
//!
//! assert_eq!(next_occurrence(&payday, date(2025, 4, 20)).unwrap(), date(2025, 5, 2));
//! assert_eq!(
//!     occurrences_in_range(&payday, date(2025, 5, 1), date(2025, 6, 1), 10).unwrap(),
//!     vec![date(2025, 5, 2), date(2025, 5, 16), date(2025, 5, 30)],
//! );
//! ```

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::round_half_up;
use crate::models::{EventKind, RecurringEvent};

/// Cap applied by calendar views when they do not ask for a specific one.
pub const DEFAULT_MAX_OCCURRENCES: usize = 10;

/// Errors that can occur while projecting a recurring event.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecurrenceError {
    /// The event repeats every zero weeks.
    #[error("event '{event_id}' repeats every {interval_weeks} weeks; the interval must be at least 1")]
    InvalidInterval {
        event_id: String,
        interval_weeks: u32,
    },

    /// The requested occurrence lies past the last representable date.
    #[error("next occurrence of event '{event_id}' is outside the supported date range")]
    DateOutOfRange { event_id: String },
}

/// One projected occurrence, detached from the event it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub event_id: String,
    pub title: String,
    pub kind: EventKind,
    pub date: NaiveDate,

    /// [`describe_occurrence`] text for this date.
    pub description: String,
}

/// Index `k` of the first occurrence on or after `date`.
fn first_index_on_or_after(
    event: &RecurringEvent,
    date: NaiveDate,
) -> i64 {
    let elapsed = (date - event.anchor_date).num_days();
    if elapsed <= 0 {
        return 0;
    }
    let step = event.interval_days();
    (elapsed + step - 1) / step
}

/// The `k`-th occurrence, or `None` past chrono's maximum date.
fn occurrence_at(
    event: &RecurringEvent,
    k: i64,
) -> Option<NaiveDate> {
    let offset = k.checked_mul(event.interval_days())?;
    let offset = u64::try_from(offset).ok()?;
    event.anchor_date.checked_add_days(Days::new(offset))
}

/// Returns the first occurrence on or after `reference_date`.
///
/// A reference date on or before the anchor yields the anchor itself; the
/// result is never earlier than the anchor.
///
/// # Errors
///
/// - [`RecurrenceError::InvalidInterval`] if the event's interval is 0.
/// - [`RecurrenceError::DateOutOfRange`] if the occurrence cannot be
///   represented.
pub fn next_occurrence(
    event: &RecurringEvent,
    reference_date: NaiveDate,
) -> Result<NaiveDate, RecurrenceError> {
    event.validate()?;

    let k = first_index_on_or_after(event, reference_date);
    let next = occurrence_at(event, k).ok_or_else(|| RecurrenceError::DateOutOfRange {
        event_id: event.id.clone(),
    })?;

    debug!(event_id = %event.id, %reference_date, k, %next, "next occurrence");
    Ok(next)
}

/// [`next_occurrence`] relative to the local current date.
pub fn next_occurrence_from_today(event: &RecurringEvent) -> Result<NaiveDate, RecurrenceError> {
    next_occurrence(event, Local::now().date_naive())
}

/// Returns the occurrences in `[range_start, range_end)` in ascending order,
/// at most `max_count` of them.
///
/// An empty or inverted range, a zero cap, or an anchor at or after
/// `range_end` all yield an empty list.
///
/// # Errors
///
/// Returns [`RecurrenceError::InvalidInterval`] if the event's interval is 0.
pub fn occurrences_in_range(
    event: &RecurringEvent,
    range_start: NaiveDate,
    range_end: NaiveDate,
    max_count: usize,
) -> Result<Vec<NaiveDate>, RecurrenceError> {
    event.validate()?;

    let mut dates = Vec::new();
    if range_start >= range_end || max_count == 0 || event.anchor_date >= range_end {
        return Ok(dates);
    }

    let mut k = first_index_on_or_after(event, range_start);
    while let Some(date) = occurrence_at(event, k) {
        if date >= range_end {
            break;
        }
        if dates.len() == max_count {
            warn!(
                event_id = %event.id,
                %range_start,
                %range_end,
                max_count,
                "occurrence list truncated at the cap"
            );
            break;
        }
        dates.push(date);
        k += 1;
    }

    Ok(dates)
}

/// Short sentence announcing the next occurrence on or after `reference_date`.
///
/// | Kind      | Text |
/// |-----------|------|
/// | `payday`  | `Payday on Fri, May 2, 2025 - $1500.00` |
/// | `paycard` | `Submit pay card on Fri, May 2, 2025 to Payroll office` |
/// | `other`   | `<title> on Fri, May 2, 2025` |
///
/// The amount and destination parts are omitted when the event has none.
///
/// # Errors
///
/// Propagates the errors of [`next_occurrence`].
pub fn describe(
    event: &RecurringEvent,
    reference_date: NaiveDate,
) -> Result<String, RecurrenceError> {
    let date = next_occurrence(event, reference_date)?;
    Ok(describe_occurrence(event, date))
}

/// The [`describe`] sentence for an already projected occurrence `date`.
pub fn describe_occurrence(
    event: &RecurringEvent,
    date: NaiveDate,
) -> String {
    let when = date.format("%a, %b %-d, %Y");

    match event.kind {
        EventKind::Payday => match event.amount {
            Some(amount) => format!("Payday on {when} - ${:.2}", round_half_up(amount)),
            None => format!("Payday on {when}"),
        },
        EventKind::Paycard => match event.destination.as_deref() {
            Some(destination) if !destination.trim().is_empty() => {
                format!("Submit pay card on {when} to {}", destination.trim())
            }
            _ => format!("Submit pay card on {when}"),
        },
        EventKind::Other => format!("{} on {when}", event.title),
    }
}

/// [`describe`] relative to the local current date.
pub fn describe_from_today(event: &RecurringEvent) -> Result<String, RecurrenceError> {
    describe(event, Local::now().date_naive())
}

/// The next occurrence of every event, soonest first, limited to `limit`
/// entries. Ties on date are ordered by title.
///
/// # Errors
///
/// Fails on the first event that cannot be projected.
pub fn upcoming(
    events: &[RecurringEvent],
    reference_date: NaiveDate,
    limit: usize,
) -> Result<Vec<Occurrence>, RecurrenceError> {
    let mut occurrences = events
        .iter()
        .map(|event| {
            next_occurrence(event, reference_date).map(|date| Occurrence {
                event_id: event.id.clone(),
                title: event.title.clone(),
                kind: event.kind,
                date,
                description: describe_occurrence(event, date),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    occurrences.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.title.cmp(&b.title)));
    occurrences.truncate(limit);

    Ok(occurrences)
}
