//! SeaORM entities for the employee records store.
//!
//! Relationships are one-directional foreign keys (child -> parent). Reverse
//! lookups such as "employees of a department" are explicit queries.

pub mod errors;
pub mod db;
pub mod department;
pub mod position;
pub mod employee;
pub mod attendance;
pub mod leave_balance;
pub mod user;
