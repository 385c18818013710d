//! Employee Repository

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use super::{BaseRepository, RepoError, RepoResult, map_unique_violation, parse_stored_decimal};
use crate::db::models::{Employee, NewEmployee};

#[derive(Debug, sqlx::FromRow)]
struct EmployeeRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    position: Option<String>,
    hire_date: Option<NaiveDate>,
    base_salary: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl EmployeeRow {
    fn into_employee(self) -> RepoResult<Employee> {
        let base_salary: Decimal = parse_stored_decimal(&self.base_salary, "base_salary")?;
        Ok(Employee {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            position: self.position,
            hire_date: self.hire_date,
            base_salary,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const EMPLOYEE_COLUMNS: &str =
    "id, first_name, last_name, email, position, hire_date, base_salary, created_at, updated_at";

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Find all employees in insertion order
    pub async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let rows: Vec<EmployeeRow> = sqlx::query_as(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY id"
        ))
        .fetch_all(self.base.pool())
        .await?;
        rows.into_iter().map(EmployeeRow::into_employee).collect()
    }

    /// Find employee by id
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Employee>> {
        let row: Option<EmployeeRow> = sqlx::query_as(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.base.pool())
        .await?;
        row.map(EmployeeRow::into_employee).transpose()
    }

    /// Create a new employee
    pub async fn create(&self, data: NewEmployee) -> RepoResult<Employee> {
        let now = Utc::now();
        let row: EmployeeRow = sqlx::query_as(&format!(
            r#"INSERT INTO employees
                   (first_name, last_name, email, position, hire_date, base_salary, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING {EMPLOYEE_COLUMNS}"#
        ))
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.position)
        .bind(data.hire_date)
        .bind(data.base_salary.to_string())
        .bind(now)
        .bind(now)
        .fetch_one(self.base.pool())
        .await
        .map_err(|e| map_unique_violation(e, format!("Email '{}' already exists", data.email)))?;

        row.into_employee()
    }

    /// Full replace of an employee's mutable fields
    pub async fn update(&self, id: i64, data: NewEmployee) -> RepoResult<Employee> {
        let row: Option<EmployeeRow> = sqlx::query_as(&format!(
            r#"UPDATE employees SET
                   first_name = ?, last_name = ?, email = ?, position = ?,
                   hire_date = ?, base_salary = ?, updated_at = ?
               WHERE id = ?
               RETURNING {EMPLOYEE_COLUMNS}"#
        ))
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.position)
        .bind(data.hire_date)
        .bind(data.base_salary.to_string())
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.base.pool())
        .await
        .map_err(|e| map_unique_violation(e, format!("Email '{}' already exists", data.email)))?;

        match row {
            Some(row) => row.into_employee(),
            None => Err(RepoError::NotFound(format!("Employee {id} not found"))),
        }
    }

    /// Hard delete an employee.
    ///
    /// Payroll history is orphaned, not destroyed: the FK nulls out
    /// `employee_id` while the rows keep their snapshot figures.
    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(self.base.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Employee {id} not found")));
        }
        Ok(true)
    }
}
