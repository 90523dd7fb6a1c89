//! Income tax and statutory deduction calculations.
//!
//! Taxes are marginal: each slice of income is taxed only at the rate of the
//! bracket it falls into. Statutory contributions (pension, insurance) are a
//! flat rate on income above an exemption, capped at an annual maximum.
//!
//! All amounts are [`Decimal`] and rounded half-up to cents.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use shift_core::calculations::pay::{compute_breakdown, progressive_tax};
//! use shift_core::{JurisdictionTable, TaxBracket};
//!
//! let federal = vec![
//!     TaxBracket::new(dec!(0), dec!(0.15)),
//!     TaxBracket::new(dec!(53359), dec!(0.205)),
//! ];
//! assert_eq!(progressive_tax(dec!(60000), &federal).unwrap(), dec!(9365.26));
//!
//! let breakdown = compute_breakdown(dec!(60000), &JurisdictionTable::ontario_2023()).unwrap();
//! assert_eq!(breakdown.net_income + breakdown.total_deductions, breakdown.gross_income);
//! assert_eq!(breakdown.federal_bracket.to_string(), "20.5%");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::{floor_at_zero, round_half_up, round_rate};
use crate::models::{ContributionSchedule, JurisdictionTable, TaxBracket};

/// Errors that can occur during pay calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayError {
    #[error("income must be non-negative, got {0}")]
    NegativeIncome(Decimal),

    #[error("hours must be non-negative, got {0}")]
    NegativeHours(Decimal),

    #[error("hourly rate must be non-negative, got {0}")]
    NegativeHourlyRate(Decimal),

    #[error("no tax brackets provided")]
    NoBrackets,

    #[error("first bracket threshold must be 0, got {0}")]
    FirstThresholdNotZero(Decimal),

    /// Thresholds must be strictly increasing. `index` is the offending bracket.
    #[error("bracket {index} threshold {threshold} does not exceed the previous threshold")]
    NonIncreasingThreshold { index: usize, threshold: Decimal },

    #[error("rate must be between 0 and 1, got {0}")]
    RateOutOfRange(Decimal),

    #[error("contribution exemption must be non-negative, got {0}")]
    NegativeExemption(Decimal),

    #[error("contribution annual maximum must be non-negative, got {0}")]
    NegativeAnnualMaximum(Decimal),

    #[error("overtime multiplier must be 1.5 or 2, got {0}")]
    UnsupportedMultiplier(Decimal),

    #[error("overtime multiplier '{0}' is not a number")]
    UnparsableMultiplier(String),

    /// An intermediate amount exceeded the range of [`Decimal`].
    #[error("{0} is too large to represent")]
    AmountOverflow(&'static str),
}

fn validate_rate(rate: Decimal) -> Result<(), PayError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(PayError::RateOutOfRange(rate));
    }
    Ok(())
}

/// Checks that a bracket list starts at 0, has strictly increasing
/// thresholds and rates within [0, 1].
///
/// # Errors
///
/// Returns the first violation found, scanning in order.
pub fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), PayError> {
    let first = brackets.first().ok_or(PayError::NoBrackets)?;
    if !first.threshold.is_zero() {
        return Err(PayError::FirstThresholdNotZero(first.threshold));
    }

    for (index, bracket) in brackets.iter().enumerate() {
        validate_rate(bracket.rate)?;
        if index > 0 && bracket.threshold <= brackets[index - 1].threshold {
            return Err(PayError::NonIncreasingThreshold {
                index,
                threshold: bracket.threshold,
            });
        }
    }

    Ok(())
}

/// Checks a contribution schedule's rate, exemption and maximum.
pub fn validate_schedule(schedule: &ContributionSchedule) -> Result<(), PayError> {
    validate_rate(schedule.rate)?;
    if schedule.exemption < Decimal::ZERO {
        return Err(PayError::NegativeExemption(schedule.exemption));
    }
    if let Some(maximum) = schedule.annual_maximum.filter(|m| *m < Decimal::ZERO) {
        return Err(PayError::NegativeAnnualMaximum(maximum));
    }
    Ok(())
}

/// Total marginal tax on `income`.
///
/// Each bracket taxes only the part of income between its threshold and the
/// next bracket's threshold; the last bracket is unbounded.
///
/// # Errors
///
/// - [`PayError::NegativeIncome`] for negative income.
/// - Any bracket validation error from [`validate_brackets`].
/// - [`PayError::AmountOverflow`] if the tax does not fit in a [`Decimal`].
pub fn progressive_tax(
    income: Decimal,
    brackets: &[TaxBracket],
) -> Result<Decimal, PayError> {
    if income < Decimal::ZERO {
        return Err(PayError::NegativeIncome(income));
    }
    validate_brackets(brackets)?;

    let mut tax = Decimal::ZERO;
    for (index, bracket) in brackets.iter().enumerate() {
        if income <= bracket.threshold {
            break;
        }
        let upper = match brackets.get(index + 1) {
            Some(next) => income.min(next.threshold),
            None => income,
        };
        tax = (upper - bracket.threshold)
            .checked_mul(bracket.rate)
            .and_then(|slice| tax.checked_add(slice))
            .ok_or(PayError::AmountOverflow("income tax"))?;
    }

    Ok(round_half_up(tax))
}

/// Statutory contribution on `income`:
/// `min(max(income - exemption, 0) × rate, annual_maximum)`.
///
/// # Errors
///
/// - [`PayError::NegativeIncome`] for negative income.
/// - Any schedule validation error from [`validate_schedule`].
pub fn contribution(
    income: Decimal,
    schedule: &ContributionSchedule,
) -> Result<Decimal, PayError> {
    if income < Decimal::ZERO {
        return Err(PayError::NegativeIncome(income));
    }
    validate_schedule(schedule)?;

    let amount = floor_at_zero(income - schedule.exemption)
        .checked_mul(schedule.rate)
        .map(round_half_up)
        .ok_or(PayError::AmountOverflow("contribution"))?;

    match schedule.annual_maximum {
        Some(maximum) if amount > maximum => {
            debug!(%income, %amount, %maximum, "contribution capped at annual maximum");
            Ok(round_half_up(maximum))
        }
        _ => Ok(amount),
    }
}

/// The bracket with the highest threshold not exceeding `income`.
fn marginal_bracket(
    income: Decimal,
    brackets: &[TaxBracket],
) -> Result<TaxBracket, PayError> {
    brackets
        .iter()
        .rev()
        .find(|b| b.threshold <= income)
        .copied()
        .ok_or(PayError::NoBrackets)
}

/// Full deduction breakdown for a gross income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBreakdown {
    pub gross_income: Decimal,
    pub federal_tax: Decimal,
    pub provincial_tax: Decimal,
    pub pension_contribution: Decimal,
    pub insurance_contribution: Decimal,

    /// Sum of both taxes and both contributions.
    pub total_deductions: Decimal,

    /// `gross_income - total_deductions`.
    pub net_income: Decimal,

    /// `total_deductions / gross_income`, to four decimal places. Zero when
    /// gross income is zero.
    pub effective_rate: Decimal,

    /// Federal bracket the gross income currently falls into.
    pub federal_bracket: TaxBracket,

    /// Provincial bracket the gross income currently falls into.
    pub provincial_bracket: TaxBracket,
}

/// Calculator bound to one jurisdiction's table.
#[derive(Debug, Clone)]
pub struct PayCalculator<'a> {
    table: &'a JurisdictionTable,
}

impl<'a> PayCalculator<'a> {
    pub fn new(table: &'a JurisdictionTable) -> Self {
        Self { table }
    }

    /// Computes taxes, contributions and net income for `gross_income`.
    ///
    /// # Errors
    ///
    /// - [`PayError::NegativeIncome`] for negative gross income.
    /// - Any validation error from [`JurisdictionTable::validate`].
    /// - [`PayError::AmountOverflow`] if the deductions do not fit in a
    ///   [`Decimal`].
    pub fn compute_breakdown(
        &self,
        gross_income: Decimal,
    ) -> Result<PayBreakdown, PayError> {
        if gross_income < Decimal::ZERO {
            return Err(PayError::NegativeIncome(gross_income));
        }
        self.table.validate()?;

        let federal_tax = progressive_tax(gross_income, &self.table.federal)?;
        let provincial_tax = progressive_tax(gross_income, &self.table.provincial)?;
        let pension_contribution = contribution(gross_income, &self.table.pension)?;
        let insurance_contribution = contribution(gross_income, &self.table.insurance)?;

        let total_deductions = [provincial_tax, pension_contribution, insurance_contribution]
            .into_iter()
            .try_fold(federal_tax, Decimal::checked_add)
            .ok_or(PayError::AmountOverflow("total deductions"))?;
        let net_income = gross_income
            .checked_sub(total_deductions)
            .ok_or(PayError::AmountOverflow("net income"))?;

        let effective_rate = if gross_income.is_zero() {
            warn!(
                jurisdiction = %self.table.jurisdiction,
                "gross income is zero; effective rate reported as 0"
            );
            Decimal::ZERO
        } else {
            round_rate(total_deductions / gross_income)
        };

        debug!(
            %gross_income,
            %federal_tax,
            %provincial_tax,
            %pension_contribution,
            %insurance_contribution,
            %net_income,
            "computed pay breakdown"
        );

        Ok(PayBreakdown {
            gross_income,
            federal_tax,
            provincial_tax,
            pension_contribution,
            insurance_contribution,
            total_deductions,
            net_income,
            effective_rate,
            federal_bracket: marginal_bracket(gross_income, &self.table.federal)?,
            provincial_bracket: marginal_bracket(gross_income, &self.table.provincial)?,
        })
    }
}

/// Shorthand for `PayCalculator::new(table).compute_breakdown(gross_income)`.
pub fn compute_breakdown(
    gross_income: Decimal,
    table: &JurisdictionTable,
) -> Result<PayBreakdown, PayError> {
    PayCalculator::new(table).compute_breakdown(gross_income)
}
