use models::errors::ModelError;
use sea_orm::DbErr;
use thiserror::Error;

use crate::validation::ValidationErrors;

/// Every failure is terminal for the request that triggered it.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(ValidationErrors),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{} not found with ID: {}", entity, id))
    }

    pub fn conflict(msg: impl Into<String>) -> Self { Self::Conflict(msg.into()) }

    /// Single-field validation failure.
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        let mut errs = ValidationErrors::new();
        errs.add(field, message);
        Self::Validation(errs)
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errs: ValidationErrors) -> Self { Self::Validation(errs) }
}

impl From<ModelError> for ServiceError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(msg) => Self::invalid("request", msg),
            ModelError::Conflict(msg) => Self::Conflict(msg),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self { ModelError::from_db(err).into() }
}
