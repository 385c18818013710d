//! Payroll API Handlers

use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};

use crate::core::ServerState;
use crate::db::models::{Payroll, PayrollGenerate};
use crate::db::repository::PayrollRepository;
use crate::utils::validation::parse_iso_date;
use crate::utils::{AppResult, ok, ok_with_message};

/// List the full payroll ledger, newest pay date first
pub async fn list(State(state): State<ServerState>) -> AppResult<impl IntoResponse> {
    let repo = PayrollRepository::new(state.db.clone());
    let payrolls: Vec<Payroll> = repo.find_all().await?;
    Ok(ok(payrolls))
}

/// Generate one payroll record
///
/// Looks up the employee, snapshots their current base salary, runs the pay
/// calculation and persists the result — all inside one transaction.
pub async fn generate(
    State(state): State<ServerState>,
    Json(payload): Json<PayrollGenerate>,
) -> AppResult<impl IntoResponse> {
    let pay_date = parse_iso_date(&payload.pay_date, "pay_date")?;

    let repo = PayrollRepository::new(state.db.clone());
    let payroll = repo
        .generate(
            payload.employee_id,
            pay_date,
            payload.hours_worked,
            payload.bonus,
            payload.deductions,
        )
        .await?;

    tracing::info!(
        payroll_id = payroll.id,
        employee_id = payload.employee_id,
        pay_date = %pay_date,
        "Payroll generated"
    );
    Ok(ok_with_message(payroll, "Payroll generated successfully"))
}
