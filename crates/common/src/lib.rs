//! Shared building blocks for the employee records workspace.

pub mod types;
pub mod utils;
