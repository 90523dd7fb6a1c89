pub mod calculations;
pub mod models;

pub use calculations::{PayError, RecurrenceError, ShiftSummaryError};
pub use models::*;
