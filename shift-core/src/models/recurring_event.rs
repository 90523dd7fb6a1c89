use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::RecurrenceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Payday,
    Paycard,
    Other,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payday => "payday",
            Self::Paycard => "paycard",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "payday" => Some(Self::Payday),
            "paycard" => Some(Self::Paycard),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// A schedule item repeating every `interval_weeks` weeks from `anchor_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringEvent {
    pub id: String,
    pub title: String,
    pub kind: EventKind,
    pub anchor_date: NaiveDate,
    pub interval_weeks: u32,

    // Payday only
    #[serde(default)]
    pub amount: Option<Decimal>,

    // Paycard only
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl RecurringEvent {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        kind: EventKind,
        anchor_date: NaiveDate,
        interval_weeks: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            anchor_date,
            interval_weeks,
            amount: None,
            destination: None,
            notes: None,
        }
    }

    pub fn with_amount(
        mut self,
        amount: Decimal,
    ) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_destination(
        mut self,
        destination: impl Into<String>,
    ) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Checks that the event can be projected.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::InvalidInterval`] when `interval_weeks` is 0.
    pub fn validate(&self) -> Result<(), RecurrenceError> {
        if self.interval_weeks < 1 {
            return Err(RecurrenceError::InvalidInterval {
                event_id: self.id.clone(),
                interval_weeks: self.interval_weeks,
            });
        }
        Ok(())
    }

    /// Length of one interval in days.
    pub fn interval_days(&self) -> i64 {
        i64::from(self.interval_weeks) * 7
    }
}
