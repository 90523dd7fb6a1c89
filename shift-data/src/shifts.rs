//! CSV loader for worked shifts.
//!
//! | Column     | Required | Notes                                        |
//! |------------|----------|----------------------------------------------|
//! | `date`     | yes      | `YYYY-MM-DD`                                 |
//! | `hours`    | yes      | decimal, non-negative                        |
//! | `overtime` | no       | `true/false`, `yes/no`, `1/0`; empty = false |
//! | `notes`    | no       | free text                                    |
//!
//! ```csv
//! date,hours,overtime,notes
//! 2025-05-02,12,,
//! 2025-05-03,8,yes,covered night shift
//! ```

use std::io::Read;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use shift_core::Shift;
use thiserror::Error;
use tracing::debug;

use crate::fields::{deserialize_optional_text, parse_flag};

/// Errors that can occur while loading shifts.
#[derive(Debug, Error)]
pub enum ShiftLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("unrecognised overtime flag '{value}' on row {row}")]
    InvalidFlag { value: String, row: usize },

    #[error("negative hours ({hours}) on row {row}")]
    NegativeHours { hours: Decimal, row: usize },
}

impl From<csv::Error> for ShiftLoaderError {
    fn from(err: csv::Error) -> Self {
        ShiftLoaderError::CsvParse(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ShiftRow {
    date: NaiveDate,
    hours: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    overtime: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    notes: Option<String>,
}

fn convert_row(
    row: ShiftRow,
    row_number: usize,
) -> Result<Shift, ShiftLoaderError> {
    if row.hours < Decimal::ZERO {
        return Err(ShiftLoaderError::NegativeHours {
            hours: row.hours,
            row: row_number,
        });
    }

    let overtime =
        parse_flag(row.overtime.as_deref()).ok_or_else(|| ShiftLoaderError::InvalidFlag {
            value: row.overtime.clone().unwrap_or_default(),
            row: row_number,
        })?;

    Ok(Shift {
        date: row.date,
        hours: row.hours,
        overtime,
        notes: row.notes,
    })
}

pub struct ShiftLoader;

impl ShiftLoader {
    /// Parse shifts from a CSV reader, in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<Shift>, ShiftLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let shifts = csv_reader
            .deserialize::<ShiftRow>()
            .enumerate()
            .map(|(idx, result)| convert_row(result?, idx + 1))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = shifts.len(), "parsed shifts");
        Ok(shifts)
    }
}
