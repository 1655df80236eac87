//! API error handling.
//!
//! Lifecycle errors are translated to HTTP status codes here and nowhere
//! else. Store failures are logged and answered with a generic message.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::task::{domain::TaskDomainError, ports::TaskRepositoryError, services::TaskLifecycleError};

/// API error structure for JSON responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Wire name of the offending field, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
        }
    }

    /// Attaches the offending field name.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// API error response containing status code and error details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Error details.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a new API error response.
    #[must_use]
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// Creates a 400 Bad Request response.
    #[must_use]
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::new(code, message))
    }

    /// Creates a 404 Not Found response.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message))
    }

    /// Creates a 500 Internal Server Error response.
    #[must_use]
    pub fn internal_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("INTERNAL_ERROR", "An internal error occurred"),
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<TaskDomainError> for ApiErrorResponse {
    fn from(error: TaskDomainError) -> Self {
        let message = error.to_string();
        let (code, field) = match &error {
            TaskDomainError::MissingField(field) => ("MISSING_FIELD", Some(*field)),
            TaskDomainError::FieldTooLong { field, .. } => ("FIELD_TOO_LONG", Some(*field)),
            TaskDomainError::InvalidDate { field, .. } => ("INVALID_DATE", Some(*field)),
            TaskDomainError::DateOrderViolation { .. } => ("DATE_ORDER_VIOLATION", None),
            TaskDomainError::NoFields => ("NO_FIELDS", None),
            TaskDomainError::UnknownSortField(_) => ("UNKNOWN_SORT_FIELD", None),
            TaskDomainError::InvalidStatusFilter(_) => ("INVALID_STATUS_FILTER", None),
            TaskDomainError::UnsupportedTransition => ("UNSUPPORTED_TRANSITION", None),
            TaskDomainError::AlreadyComplete(_) => ("ALREADY_COMPLETE", None),
            // No task can carry an identifier that does not parse.
            TaskDomainError::InvalidTaskId(_) => return Self::not_found(message),
        };
        let api_error = ApiError::new(code, message);
        let api_error = match field {
            Some(field) => api_error.with_field(field.as_str()),
            None => api_error,
        };
        Self::new(StatusCode::BAD_REQUEST, api_error)
    }
}

impl From<TaskLifecycleError> for ApiErrorResponse {
    fn from(error: TaskLifecycleError) -> Self {
        match error {
            TaskLifecycleError::Domain(domain) => Self::from(domain),
            TaskLifecycleError::NotFound(id) => Self::not_found(format!("task {id} not found")),
            TaskLifecycleError::Repository(TaskRepositoryError::NotFound(id)) => {
                Self::not_found(format!("task {id} not found"))
            }
            TaskLifecycleError::Repository(repository) => {
                tracing::error!(error = %repository, "task store operation failed");
                Self::internal_error()
            }
        }
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("INVALID_BODY", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiErrorResponse {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request("INVALID_QUERY", rejection.body_text())
    }
}
