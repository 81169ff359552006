use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    /// Classify a driver error. Constraint violations are the storage-level
    /// arbiter for check-then-write races, so they surface as conflicts.
    pub fn from_db(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                ModelError::Conflict(format!("unique constraint violated: {detail}"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                ModelError::Conflict(format!("foreign key constraint violated: {detail}"))
            }
            _ => ModelError::Db(err.to_string()),
        }
    }
}

impl From<DbErr> for ModelError {
    fn from(err: DbErr) -> Self {
        ModelError::from_db(err)
    }
}
