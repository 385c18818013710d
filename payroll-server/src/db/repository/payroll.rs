//! Payroll Repository
//!
//! The ledger is append-mostly: rows are written once by [`PayrollRepository::generate`]
//! and never updated or deleted through this API.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use super::{BaseRepository, RepoError, RepoResult, parse_stored_decimal};
use crate::db::models::Payroll;
use crate::payroll::calculate_pay;

#[derive(Debug, sqlx::FromRow)]
struct PayrollRow {
    id: i64,
    employee_id: Option<i64>,
    pay_date: NaiveDate,
    hours_worked: String,
    base_salary_at_pay: String,
    bonus: String,
    deductions: String,
    gross_pay: String,
    net_pay: String,
    created_at: DateTime<Utc>,
}

impl PayrollRow {
    fn into_payroll(self) -> RepoResult<Payroll> {
        Ok(Payroll {
            id: self.id,
            employee_id: self.employee_id,
            pay_date: self.pay_date,
            hours_worked: parse_stored_decimal(&self.hours_worked, "hours_worked")?,
            base_salary_at_pay: parse_stored_decimal(
                &self.base_salary_at_pay,
                "base_salary_at_pay",
            )?,
            bonus: parse_stored_decimal(&self.bonus, "bonus")?,
            deductions: parse_stored_decimal(&self.deductions, "deductions")?,
            gross_pay: parse_stored_decimal(&self.gross_pay, "gross_pay")?,
            net_pay: parse_stored_decimal(&self.net_pay, "net_pay")?,
            created_at: self.created_at,
        })
    }
}

const PAYROLL_COLUMNS: &str = "id, employee_id, pay_date, hours_worked, base_salary_at_pay, \
     bonus, deductions, gross_pay, net_pay, created_at";

#[derive(Clone)]
pub struct PayrollRepository {
    base: BaseRepository,
}

impl PayrollRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Generate one payroll record for an employee.
    ///
    /// Runs in a single transaction: employee lookup, pay calculation and
    /// insert either all take effect or none do. The employee's current
    /// base salary is copied into `base_salary_at_pay` so the record stays
    /// auditable regardless of later salary edits.
    pub async fn generate(
        &self,
        employee_id: i64,
        pay_date: NaiveDate,
        hours_worked: Decimal,
        bonus: Decimal,
        deductions: Decimal,
    ) -> RepoResult<Payroll> {
        let mut tx = self.base.pool().begin().await?;

        let base_salary: Option<String> =
            sqlx::query_scalar("SELECT base_salary FROM employees WHERE id = ?")
                .bind(employee_id)
                .fetch_optional(&mut *tx)
                .await?;

        let base_salary = match base_salary {
            Some(s) => parse_stored_decimal(&s, "base_salary")?,
            None => return Err(RepoError::NotFound(format!("Employee {employee_id} not found"))),
        };

        let pay = calculate_pay(base_salary, hours_worked, bonus, deductions)
            .map_err(|e| RepoError::Validation(e.to_string()))?;

        let row: PayrollRow = sqlx::query_as(&format!(
            r#"INSERT INTO payrolls
                   (employee_id, pay_date, hours_worked, base_salary_at_pay,
                    bonus, deductions, gross_pay, net_pay, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING {PAYROLL_COLUMNS}"#
        ))
        .bind(employee_id)
        .bind(pay_date)
        .bind(hours_worked.to_string())
        .bind(base_salary.to_string())
        .bind(bonus.to_string())
        .bind(deductions.to_string())
        .bind(pay.gross_pay.to_string())
        .bind(pay.net_pay.to_string())
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        row.into_payroll()
    }

    /// Full payroll history, newest pay date first
    pub async fn find_all(&self) -> RepoResult<Vec<Payroll>> {
        let rows: Vec<PayrollRow> = sqlx::query_as(&format!(
            "SELECT {PAYROLL_COLUMNS} FROM payrolls ORDER BY pay_date DESC, id DESC"
        ))
        .fetch_all(self.base.pool())
        .await?;
        rows.into_iter().map(PayrollRow::into_payroll).collect()
    }

    /// Payroll history for one employee, newest pay date first
    pub async fn find_by_employee(&self, employee_id: i64) -> RepoResult<Vec<Payroll>> {
        let rows: Vec<PayrollRow> = sqlx::query_as(&format!(
            "SELECT {PAYROLL_COLUMNS} FROM payrolls WHERE employee_id = ? ORDER BY pay_date DESC, id DESC"
        ))
        .bind(employee_id)
        .fetch_all(self.base.pool())
        .await?;
        rows.into_iter().map(PayrollRow::into_payroll).collect()
    }
}
