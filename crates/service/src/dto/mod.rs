//! Request inputs and response projections.
//!
//! Inputs deserialize from camelCase JSON and carry an explicit `validate`
//! that reports every failing field at once. Projections are read-only
//! shapes built by the services, never persisted.

pub mod department;
pub mod position;
pub mod employee;
pub mod records;

pub use department::{DepartmentInput, DepartmentResponse};
pub use employee::{EmployeeInput, EmployeeResponse};
pub use position::{PositionInput, PositionResponse};
pub use records::{
    AttendanceInput, AttendanceResponse, LeaveBalanceInput, LeaveBalanceResponse, LeaveBalanceUpdate,
    UserAccountInput, UserResponse,
};
