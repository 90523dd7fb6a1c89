use std::collections::HashSet;
use std::io::Read;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use shift_core::{EventKind, RecurrenceError, RecurringEvent};
use thiserror::Error;
use tracing::debug;

use crate::fields::{deserialize_optional_decimal, deserialize_optional_text};

/// Errors that can occur when loading recurring events.
#[derive(Debug, Error)]
pub enum EventLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("unknown event kind '{kind}' on row {row}")]
    UnknownKind { kind: String, row: usize },

    #[error("invalid event on row {row}: {source}")]
    InvalidEvent {
        row: usize,
        #[source]
        source: RecurrenceError,
    },

    #[error("duplicate event id '{id}' on row {row}")]
    DuplicateId { id: String, row: usize },
}

impl From<csv::Error> for EventLoaderError {
    fn from(err: csv::Error) -> Self {
        EventLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a recurring events CSV file.
///
/// - `id`: unique identifier
/// - `title`: display label
/// - `kind`: `payday`, `paycard` or `other` (case-insensitive)
/// - `anchor_date`: first occurrence, `YYYY-MM-DD`
/// - `interval_weeks`: weeks between occurrences, at least 1
/// - `amount`: pay amount (payday only, may be empty)
/// - `destination`, `notes`: free text (paycard only, may be empty)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    pub kind: String,
    pub anchor_date: NaiveDate,
    pub interval_weeks: u32,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub amount: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub notes: Option<String>,
}

/// Loader for recurring events stored as CSV.
pub struct EventLoader;

impl EventLoader {
    /// Parse and validate events from a CSV reader.
    ///
    /// Rows are returned in file order. Row numbers in errors are 1-based
    /// and do not count the header.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<RecurringEvent>, EventLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut seen = HashSet::new();
        let mut events = Vec::new();

        for (idx, result) in csv_reader.deserialize().enumerate() {
            let record: EventRecord = result?;
            let row = idx + 1;

            if !seen.insert(record.id.clone()) {
                return Err(EventLoaderError::DuplicateId { id: record.id, row });
            }
            events.push(Self::convert(record, row)?);
        }

        debug!(count = events.len(), "parsed recurring events");
        Ok(events)
    }

    fn convert(
        record: EventRecord,
        row: usize,
    ) -> Result<RecurringEvent, EventLoaderError> {
        let kind = EventKind::parse(&record.kind).ok_or_else(|| EventLoaderError::UnknownKind {
            kind: record.kind.clone(),
            row,
        })?;

        let event = RecurringEvent {
            id: record.id,
            title: record.title,
            kind,
            anchor_date: record.anchor_date,
            interval_weeks: record.interval_weeks,
            amount: record.amount,
            destination: record.destination,
            notes: record.notes,
        };
        event
            .validate()
            .map_err(|source| EventLoaderError::InvalidEvent { row, source })?;

        Ok(event)
    }
}
