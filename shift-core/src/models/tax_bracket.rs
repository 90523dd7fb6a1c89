use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::format_percent;

/// One marginal bracket: income above `threshold` (up to the next bracket's
/// threshold) is taxed at `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub threshold: Decimal,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        threshold: Decimal,
        rate: Decimal,
    ) -> Self {
        Self { threshold, rate }
    }
}

/// Renders the bracket as its marginal rate, e.g. `20.5%`.
impl fmt::Display for TaxBracket {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&format_percent(self.rate))
    }
}
