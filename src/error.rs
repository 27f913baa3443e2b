//! Error types for the library administration backend

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Application error codes exposed in error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    StoreFailure = 3,
    NoSuchItem = 5,
    ItemNotAvailable = 7,
    Duplicate = 8,
    BadValue = 18,
}

/// A single local validation failure of a lending candidate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{field} ({date}) cannot be before borrow_date ({borrow_date})")]
    DateOrder {
        field: &'static str,
        date: NaiveDate,
        borrow_date: NaiveDate,
    },

    #[error("Book {book_id} is already lent (lending {active_lending_id})")]
    BookUnavailable { book_id: i32, active_lending_id: i32 },

    #[error("{field} is not a valid date: {value:?}")]
    InvalidDate { field: &'static str, value: String },
}

impl ValidationError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingField { .. } => "missing_field",
            ValidationError::DateOrder { .. } => "date_order",
            ValidationError::BookUnavailable { .. } => "book_unavailable",
            ValidationError::InvalidDate { .. } => "invalid_date",
        }
    }

    /// Field the failure is attached to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::DateOrder { field, .. }
            | ValidationError::InvalidDate { field, .. } => *field,
            ValidationError::BookUnavailable { .. } => "book_id",
        }
    }
}

/// Every failure found while validating one lending candidate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|e| e.code() == code)
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        ValidationErrors(vec![error])
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store rejected request ({status}): {message}")]
    Store { status: u16, message: String },

    #[error("Store unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Store sent an unreadable {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(errors.to_string())
    }
}

/// Error detail entry for validation failures
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorDetail {
    #[schema(value_type = String)]
    pub code: &'static str,
    #[schema(value_type = String)]
    pub field: &'static str,
    pub message: String,
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetail>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut details = Vec::new();
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchItem, msg.clone()),
            AppError::Validation(errors) => {
                details = errors
                    .errors()
                    .iter()
                    .map(|e| ErrorDetail {
                        code: e.code(),
                        field: e.field(),
                        message: e.to_string(),
                    })
                    .collect();
                let only_unavailable = errors
                    .errors()
                    .iter()
                    .all(|e| matches!(e, ValidationError::BookUnavailable { .. }));
                if only_unavailable && !errors.errors().is_empty() {
                    (StatusCode::CONFLICT, ErrorCode::ItemNotAvailable, errors.to_string())
                } else {
                    (StatusCode::BAD_REQUEST, ErrorCode::BadValue, errors.to_string())
                }
            }
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone()),
            AppError::Store { status, message } => {
                tracing::error!("Store rejected request ({}): {}", status, message);
                (StatusCode::BAD_GATEWAY, ErrorCode::StoreFailure, message.clone())
            }
            AppError::Transport(e) => {
                tracing::error!("Store transport error: {:?}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorCode::StoreFailure,
                    "Store unreachable".to_string(),
                )
            }
            AppError::Decode { what, source } => {
                tracing::error!("Store sent an unreadable {}: {}", what, source);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorCode::StoreFailure,
                    format!("Store returned an unreadable {}", what),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
