//! File loaders for recurring events, worked shifts and jurisdiction tables.

mod events;
mod fields;
mod jurisdiction;
mod month;
mod shifts;

pub use events::{EventLoader, EventLoaderError, EventRecord};
pub use jurisdiction::{JurisdictionLoadError, load_jurisdiction_table, parse_jurisdiction_table};
pub use month::{MonthParseError, month_range};
pub use shifts::{ShiftLoader, ShiftLoaderError};
