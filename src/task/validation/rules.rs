//! Individual validation rule implementations.
//!
//! Each rule is a pure function over a raw request. Rules return the typed
//! value on success or the first [`TaskDomainError`] encountered.

use super::{CreateTaskRequest, ListTasksRequest, NewTask, TaskChanges, UpdateTaskRequest};
use crate::task::domain::{
    NameFilter, SortField, TaskDate, TaskDomainError, TaskField, TaskId, TaskName, TaskQuery,
};

/// Validates a creation request.
///
/// `today` is the default start date when the request omits one.
///
/// # Errors
///
/// Returns, in order of precedence:
/// - [`TaskDomainError::MissingField`] when `name` is absent or blank, or
///   `due-date` is absent;
/// - [`TaskDomainError::FieldTooLong`] when `name` exceeds 64 characters;
/// - [`TaskDomainError::InvalidDate`] when a date does not parse;
/// - [`TaskDomainError::UnsupportedTransition`] when `status` is `true`;
/// - [`TaskDomainError::DateOrderViolation`] when `due-date` precedes the
///   effective start date.
pub fn validate_create(
    request: &CreateTaskRequest,
    today: TaskDate,
) -> Result<NewTask, TaskDomainError> {
    let raw_name = request
        .name()
        .filter(|name| !name.trim().is_empty())
        .ok_or(TaskDomainError::MissingField(TaskField::Name))?;
    let raw_due_date = request
        .due_date()
        .ok_or(TaskDomainError::MissingField(TaskField::DueDate))?;

    let name = TaskName::new(raw_name)?;
    let due_date = TaskDate::parse(TaskField::DueDate, raw_due_date)?;
    let start_date = request
        .start_date()
        .map(|value| TaskDate::parse(TaskField::StartDate, value))
        .transpose()?
        .unwrap_or(today);
    ensure_not_completing(request.status())?;

    if due_date < start_date {
        return Err(TaskDomainError::DateOrderViolation {
            start_date,
            due_date,
        });
    }

    Ok(NewTask {
        name,
        start_date,
        due_date,
    })
}

/// Validates a partial update request.
///
/// # Errors
///
/// Returns [`TaskDomainError::NoFields`] when nothing updatable was supplied,
/// [`TaskDomainError::MissingField`] or [`TaskDomainError::FieldTooLong`]
/// for a bad name, [`TaskDomainError::UnsupportedTransition`] for
/// `status: true`, and [`TaskDomainError::InvalidDate`] for an unparseable
/// due date.
pub fn validate_update(request: &UpdateTaskRequest) -> Result<TaskChanges, TaskDomainError> {
    if request.name().is_none() && request.status().is_none() && request.due_date().is_none() {
        return Err(TaskDomainError::NoFields);
    }

    let name = request.name().map(TaskName::new).transpose()?;
    ensure_not_completing(request.status())?;
    let due_date = request
        .due_date()
        .map(|value| TaskDate::parse(TaskField::DueDate, value))
        .transpose()?;

    Ok(TaskChanges {
        name,
        due_date,
        reopen: request.status() == Some(false),
    })
}

/// Validates listing parameters into a [`TaskQuery`].
///
/// # Errors
///
/// Returns [`TaskDomainError::FieldTooLong`] for an oversized name filter,
/// [`TaskDomainError::InvalidStatusFilter`] for a status that is not
/// `true`/`false`, and [`TaskDomainError::UnknownSortField`] for a sort key
/// other than the three date fields.
pub fn validate_list_query(request: &ListTasksRequest) -> Result<TaskQuery, TaskDomainError> {
    let mut query = TaskQuery::new();

    if let Some(name) = non_empty(request.name()) {
        query = query.with_name(NameFilter::new(name)?);
    }
    if let Some(status) = non_empty(request.status()) {
        query = query.with_status(parse_status_filter(status)?);
    }
    if let Some(sort) = non_empty(request.sort()) {
        query = query.sorted_by(SortField::try_from(sort)?);
    }

    Ok(query)
}

/// Parses a task identifier from a path segment.
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidTaskId`] when `raw` is not a UUID.
pub fn parse_task_id(raw: &str) -> Result<TaskId, TaskDomainError> {
    raw.parse()
}

/// Empty query values such as `?sort=` count as absent.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.is_empty())
}

fn parse_status_filter(raw: &str) -> Result<bool, TaskDomainError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(TaskDomainError::InvalidStatusFilter(raw.to_owned())),
    }
}

const fn ensure_not_completing(status: Option<bool>) -> Result<(), TaskDomainError> {
    if matches!(status, Some(true)) {
        return Err(TaskDomainError::UnsupportedTransition);
    }
    Ok(())
}
