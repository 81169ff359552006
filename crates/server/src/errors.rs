use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::ServiceError;
use service::validation::FieldError;
use thiserror::Error;
use tracing::{error, warn};

/// JSON error body: `{"error": title, "message": ..., "details": [...]}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &str, message: Option<String>) -> Self {
        Self { status, body: ErrorBody { error: title.to_string(), message, details: Vec::new() } }
    }

    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.body.details = details;
        self
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(errs) => {
                warn!(errors = %errs, "request_validation_failed");
                JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(errs.to_string()))
                    .with_details(errs.errors().to_vec())
            }
            ServiceError::NotFound(msg) => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            ServiceError::Conflict(msg) => JsonApiError::new(StatusCode::CONFLICT, "Conflict", Some(msg)),
            ServiceError::Db(msg) | ServiceError::Internal(msg) => {
                error!(error = %msg, "request_failed");
                JsonApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    Some("An unexpected error occurred".to_string()),
                )
            }
        }
    }
}

/// Malformed JSON bodies get the same error shape as everything else.
impl From<JsonRejection> for JsonApiError {
    fn from(rej: JsonRejection) -> Self {
        JsonApiError::new(StatusCode::BAD_REQUEST, "Malformed Request", Some(rej.body_text()))
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(rej: QueryRejection) -> Self {
        JsonApiError::new(StatusCode::BAD_REQUEST, "Malformed Request", Some(rej.body_text()))
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(rej: PathRejection) -> Self {
        JsonApiError::new(StatusCode::BAD_REQUEST, "Malformed Request", Some(rej.body_text()))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
