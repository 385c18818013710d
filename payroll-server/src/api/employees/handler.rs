//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::core::ServerState;
use crate::db::models::{Employee, EmployeeInput, Payroll};
use crate::db::repository::{EmployeeRepository, PayrollRepository};
use crate::utils::{AppError, AppResult, ok, ok_with_message};

/// List all employees
pub async fn list(State(state): State<ServerState>) -> AppResult<impl IntoResponse> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employees: Vec<Employee> = repo.find_all().await?;
    Ok(ok(employees))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))?;
    Ok(ok(employee))
}

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeInput>,
) -> AppResult<impl IntoResponse> {
    let data = payload.validate()?;
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo.create(data).await?;

    tracing::info!(employee_id = employee.id, email = %employee.email, "Employee created");
    Ok(ok_with_message(employee, "Employee added successfully"))
}

/// Update an employee (full replace of mutable fields)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeeInput>,
) -> AppResult<impl IntoResponse> {
    let data = payload.validate()?;
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo.update(id, data).await?;

    tracing::info!(employee_id = id, "Employee updated");
    Ok(ok_with_message(employee, "Employee updated successfully"))
}

/// Delete an employee
///
/// Existing payroll records are kept, detached from the deleted employee.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let repo = EmployeeRepository::new(state.db.clone());
    let result = repo.delete(id).await?;

    tracing::info!(employee_id = id, "Employee deleted");
    Ok(ok_with_message(result, "Employee deleted successfully"))
}

/// Payroll history for one employee, newest first
pub async fn payroll_history(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let employees = EmployeeRepository::new(state.db.clone());
    employees
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))?;

    let payrolls = PayrollRepository::new(state.db.clone());
    let history: Vec<Payroll> = payrolls.find_by_employee(id).await?;
    Ok(ok(history))
}
