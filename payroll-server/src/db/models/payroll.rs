//! Payroll Model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payroll record. Written once by payroll generation, never updated.
///
/// `base_salary_at_pay` is a point-in-time snapshot of the employee's salary:
/// later salary edits (or deleting the employee entirely, which nulls
/// `employee_id`) must not change what a historical record says was paid.
#[derive(Debug, Clone, Serialize)]
pub struct Payroll {
    pub id: i64,
    pub employee_id: Option<i64>,
    pub pay_date: NaiveDate,
    pub hours_worked: Decimal,
    pub base_salary_at_pay: Decimal,
    pub bonus: Decimal,
    pub deductions: Decimal,
    pub gross_pay: Decimal,
    pub net_pay: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Payroll generation payload
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollGenerate {
    pub employee_id: i64,
    pub pay_date: String,
    pub hours_worked: Decimal,
    #[serde(default)]
    pub bonus: Decimal,
    #[serde(default)]
    pub deductions: Decimal,
}
