//! Database Models
//!
//! Domain structs and request payloads for the three tables:
//! users, employees, payrolls.

pub mod employee;
pub mod payroll;
pub mod user;

pub use employee::{Employee, EmployeeInput, NewEmployee};
pub use payroll::{Payroll, PayrollGenerate};
pub use user::{Credentials, User};
