//! Service layer providing business-oriented CRUD operations on top of models.
//! - Validates every input before touching the store.
//! - Runs each mutation in its own transaction.
//! - Returns response projections with derived counts and denormalized names.

pub mod errors;
pub mod validation;
pub mod pagination;
pub mod dto;
pub mod department_service;
pub mod position_service;
pub mod employee_service;
pub mod attendance_service;
pub mod leave_balance_service;
pub mod user_service;
#[cfg(test)]
pub mod test_support;
