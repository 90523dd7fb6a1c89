mod contribution_schedule;
mod jurisdiction_table;
mod recurring_event;
mod shift;
mod tax_bracket;

pub use contribution_schedule::ContributionSchedule;
pub use jurisdiction_table::JurisdictionTable;
pub use recurring_event::{EventKind, RecurringEvent};
pub use shift::Shift;
pub use tax_bracket::TaxBracket;
