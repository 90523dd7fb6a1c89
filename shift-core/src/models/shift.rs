use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single worked shift as entered on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub date: NaiveDate,
    pub hours: Decimal,

    /// Whether the whole shift was worked as overtime.
    #[serde(default)]
    pub overtime: bool,

    #[serde(default)]
    pub notes: Option<String>,
}

impl Shift {
    pub fn regular(
        date: NaiveDate,
        hours: Decimal,
    ) -> Self {
        Self {
            date,
            hours,
            overtime: false,
            notes: None,
        }
    }

    pub fn overtime(
        date: NaiveDate,
        hours: Decimal,
    ) -> Self {
        Self {
            date,
            hours,
            overtime: true,
            notes: None,
        }
    }
}
