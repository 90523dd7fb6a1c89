use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::PayError;
use crate::calculations::pay::{validate_brackets, validate_schedule};
use crate::models::{ContributionSchedule, TaxBracket};

/// Tax brackets and statutory deduction schedules for one jurisdiction and
/// tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionTable {
    pub jurisdiction: String,
    pub tax_year: i32,
    pub federal: Vec<TaxBracket>,
    pub provincial: Vec<TaxBracket>,
    pub pension: ContributionSchedule,
    pub insurance: ContributionSchedule,
}

impl JurisdictionTable {
    /// Canada (federal) and Ontario (provincial) rates for 2023, with CPP as
    /// the pension schedule and EI as the insurance schedule.
    pub fn ontario_2023() -> Self {
        Self {
            jurisdiction: "Ontario".to_string(),
            tax_year: 2023,
            federal: vec![
                TaxBracket::new(Decimal::ZERO, Decimal::new(15, 2)),
                TaxBracket::new(Decimal::from(53_359), Decimal::new(205, 3)),
                TaxBracket::new(Decimal::from(106_717), Decimal::new(26, 2)),
                TaxBracket::new(Decimal::from(165_430), Decimal::new(29, 2)),
                TaxBracket::new(Decimal::from(235_675), Decimal::new(33, 2)),
            ],
            provincial: vec![
                TaxBracket::new(Decimal::ZERO, Decimal::new(505, 4)),
                TaxBracket::new(Decimal::from(49_231), Decimal::new(915, 4)),
                TaxBracket::new(Decimal::from(98_463), Decimal::new(1116, 4)),
                TaxBracket::new(Decimal::from(150_000), Decimal::new(1216, 4)),
                TaxBracket::new(Decimal::from(220_000), Decimal::new(1316, 4)),
            ],
            pension: ContributionSchedule::new(Decimal::new(595, 4))
                .with_exemption(Decimal::from(3_500))
                .with_annual_maximum(Decimal::new(375_445, 2)),
            insurance: ContributionSchedule::new(Decimal::new(163, 4))
                .with_annual_maximum(Decimal::new(100_245, 2)),
        }
    }

    /// Validates every bracket list and contribution schedule.
    ///
    /// # Errors
    ///
    /// Returns the first [`PayError`] found, checking federal brackets,
    /// provincial brackets, then the pension and insurance schedules.
    pub fn validate(&self) -> Result<(), PayError> {
        validate_brackets(&self.federal)?;
        validate_brackets(&self.provincial)?;
        validate_schedule(&self.pension)?;
        validate_schedule(&self.insurance)?;
        Ok(())
    }
}
