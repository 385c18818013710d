//! Employee Model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::AppError;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, parse_iso_date, validate_money, validate_optional_text,
    validate_required_text,
};

/// Employee record. Owns zero or more payroll records.
#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: Option<String>,
    pub hire_date: Option<NaiveDate>,
    /// Monthly base salary, 2 decimal places
    pub base_salary: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create / full-update payload
///
/// Updates replace all mutable fields, so the same payload serves both
/// operations. `hire_date` arrives as a string and is parsed strictly
/// (ISO-8601 calendar date) at the validation boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub hire_date: Option<String>,
    pub base_salary: Decimal,
}

/// Validated employee fields, ready for persistence
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub base_salary: Decimal,
}

impl EmployeeInput {
    /// Validate the payload and parse the hire date.
    pub fn validate(self) -> Result<NewEmployee, AppError> {
        validate_required_text(&self.first_name, "first_name", MAX_NAME_LEN)?;
        validate_required_text(&self.last_name, "last_name", MAX_NAME_LEN)?;
        validate_required_text(&self.email, "email", MAX_EMAIL_LEN)?;
        if !self.email.contains('@') {
            return Err(AppError::validation(format!(
                "email is not a valid address: '{}'",
                self.email
            )));
        }
        validate_optional_text(&self.position, "position", MAX_NAME_LEN)?;
        validate_money(self.base_salary, "base_salary")?;

        let hire_date = match self.hire_date.as_deref().map(str::trim) {
            Some("") | None => None,
            Some(raw) => Some(parse_iso_date(raw, "hire_date")?),
        };

        Ok(NewEmployee {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            position: self.position.filter(|p| !p.trim().is_empty()),
            hire_date,
            base_salary: self.base_salary,
        })
    }
}
