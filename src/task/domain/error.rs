//! Error types for task domain validation and transitions.

use super::{TaskDate, TaskField, TaskId};
use thiserror::Error;

/// Errors returned while validating task input or applying transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A required field is absent or blank.
    #[error("missing required field '{0}'")]
    MissingField(TaskField),

    /// A text field exceeds its maximum length.
    #[error("field '{field}' is too long: {actual} characters, maximum is {max}")]
    FieldTooLong {
        /// Offending field.
        field: TaskField,
        /// Maximum accepted length in characters.
        max: usize,
        /// Supplied length in characters.
        actual: usize,
    },

    /// A date field could not be parsed as a calendar date.
    #[error("field '{field}' is not a valid date: '{value}'")]
    InvalidDate {
        /// Offending field.
        field: TaskField,
        /// Raw value supplied by the caller.
        value: String,
    },

    /// The due date falls before the start date.
    #[error("due-date {due_date} must not be earlier than start-date {start_date}")]
    DateOrderViolation {
        /// Start date of the task.
        start_date: TaskDate,
        /// Rejected due date.
        due_date: TaskDate,
    },

    /// An update request carried none of the updatable fields.
    #[error("no updatable fields supplied, expected at least one of name, status, due-date")]
    NoFields,

    /// A list request asked to sort by an unsupported field.
    #[error(transparent)]
    UnknownSortField(#[from] ParseSortFieldError),

    /// A list request carried a status filter that is not a boolean.
    #[error("invalid status filter '{0}', expected true or false")]
    InvalidStatusFilter(String),

    /// A task identifier could not be parsed.
    #[error("invalid task identifier '{0}'")]
    InvalidTaskId(String),

    /// The caller tried to mark a task complete outside the complete operation.
    #[error("status can only be set to true through the complete operation")]
    UnsupportedTransition,

    /// The task is already complete.
    #[error("task {0} is already complete")]
    AlreadyComplete(TaskId),
}

/// Error returned while parsing a sort field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort field '{0}', expected one of start-date, due-date, done-date")]
pub struct ParseSortFieldError(pub String);
