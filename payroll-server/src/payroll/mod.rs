//! Payroll calculation using rust_decimal for precision
//!
//! All pay figures are computed with `Decimal` fixed-point arithmetic;
//! floating point never touches money. The calculator is a pure function
//! with no storage or I/O dependencies.

#[cfg(test)]
mod tests;

use rust_decimal::prelude::*;
use thiserror::Error;

/// Rounding for monetary values (2 decimal places, half-up away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Fixed monthly-hours divisor used to derive the hourly rate
pub const MONTHLY_HOURS: Decimal = Decimal::from_parts(160, 0, 0, false, 0);

/// Maximum allowed monetary input (1,000,000.00)
const MAX_AMOUNT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 2);

/// Maximum allowed hours per pay period
const MAX_HOURS: Decimal = Decimal::from_parts(744, 0, 0, false, 0);

/// Calculation error for invalid payroll figures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalcError {
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: Decimal },

    #[error("{field} exceeds maximum allowed ({max}), got {value}")]
    TooLarge {
        field: &'static str,
        value: Decimal,
        max: Decimal,
    },
}

/// Computed pay figures for a single payroll run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayBreakdown {
    pub hourly_rate: Decimal,
    pub gross_pay: Decimal,
    pub net_pay: Decimal,
}

#[inline]
fn require_non_negative(value: Decimal, field: &'static str) -> Result<(), CalcError> {
    if value.is_sign_negative() {
        return Err(CalcError::Negative { field, value });
    }
    Ok(())
}

#[inline]
fn require_in_range(value: Decimal, field: &'static str, max: Decimal) -> Result<(), CalcError> {
    require_non_negative(value, field)?;
    if value > max {
        return Err(CalcError::TooLarge { field, value, max });
    }
    Ok(())
}

/// Round a monetary value to 2 decimal places, half-up.
///
/// The result always carries exactly 2 decimal places so stored and
/// serialized figures read as currency ("1600.00", never "1600").
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DECIMAL_PLACES);
    rounded
}

/// Compute gross and net pay from a salary snapshot and period figures.
///
/// ```text
/// hourly_rate = base_salary / 160
/// gross_pay   = hourly_rate * hours_worked + bonus
/// net_pay     = gross_pay - deductions
/// ```
///
/// The hourly rate is kept at full precision internally; gross and net are
/// rounded to 2dp at the boundary. Deductions may exceed gross (net pay can
/// be negative for a valid record); the inputs themselves must not be.
pub fn calculate_pay(
    base_salary: Decimal,
    hours_worked: Decimal,
    bonus: Decimal,
    deductions: Decimal,
) -> Result<PayBreakdown, CalcError> {
    require_in_range(base_salary, "base_salary", MAX_AMOUNT)?;
    require_in_range(hours_worked, "hours_worked", MAX_HOURS)?;
    require_in_range(bonus, "bonus", MAX_AMOUNT)?;
    require_in_range(deductions, "deductions", MAX_AMOUNT)?;

    let hourly_rate = base_salary / MONTHLY_HOURS;
    let gross_pay = round_money(hourly_rate * hours_worked + bonus);
    let net_pay = round_money(gross_pay - deductions);

    Ok(PayBreakdown {
        hourly_rate: round_money(hourly_rate),
        gross_pay,
        net_pay,
    })
}
