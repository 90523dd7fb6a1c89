use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fixed-rate statutory deduction such as a pension plan or employment
/// insurance premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionSchedule {
    pub rate: Decimal,

    /// Income below this amount is not subject to the contribution.
    #[serde(default)]
    pub exemption: Decimal,

    /// Ceiling on the yearly contribution. `None` means unbounded.
    #[serde(default)]
    pub annual_maximum: Option<Decimal>,
}

impl ContributionSchedule {
    pub fn new(rate: Decimal) -> Self {
        Self {
            rate,
            exemption: Decimal::ZERO,
            annual_maximum: None,
        }
    }

    pub fn with_exemption(
        mut self,
        exemption: Decimal,
    ) -> Self {
        self.exemption = exemption;
        self
    }

    pub fn with_annual_maximum(
        mut self,
        annual_maximum: Decimal,
    ) -> Self {
        self.annual_maximum = Some(annual_maximum);
        self
    }
}
