//! Raw request payloads and their validated counterparts.

use crate::task::domain::{TaskDate, TaskName};
use serde::Deserialize;

/// Request payload for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CreateTaskRequest {
    name: Option<String>,
    status: Option<bool>,
    start_date: Option<String>,
    due_date: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            due_date: Some(due_date.into()),
            ..Self::default()
        }
    }

    /// Sets an explicit start date.
    #[must_use]
    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: bool) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the supplied name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the supplied status.
    #[must_use]
    pub const fn status(&self) -> Option<bool> {
        self.status
    }

    /// Returns the supplied start date.
    #[must_use]
    pub fn start_date(&self) -> Option<&str> {
        self.start_date.as_deref()
    }

    /// Returns the supplied due date.
    #[must_use]
    pub fn due_date(&self) -> Option<&str> {
        self.due_date.as_deref()
    }
}

/// Request payload for a partial task update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateTaskRequest {
    name: Option<String>,
    status: Option<bool>,
    due_date: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an empty update request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a new status.
    #[must_use]
    pub const fn with_status(mut self, status: bool) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets a new due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Returns the supplied name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the supplied status.
    #[must_use]
    pub const fn status(&self) -> Option<bool> {
        self.status
    }

    /// Returns the supplied due date.
    #[must_use]
    pub fn due_date(&self) -> Option<&str> {
        self.due_date.as_deref()
    }
}

/// Query parameters for listing tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListTasksRequest {
    name: Option<String>,
    status: Option<String>,
    sort: Option<String>,
}

impl ListTasksRequest {
    /// Creates a request with no filters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by name substring.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Filters by status (`true` or `false`).
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sorts by the named date field.
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Returns the name filter.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the raw status filter.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Returns the raw sort field.
    #[must_use]
    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }
}

/// Validated creation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task name.
    pub name: TaskName,
    /// Start date, defaulted to today when omitted.
    pub start_date: TaskDate,
    /// Due date, not earlier than `start_date`.
    pub due_date: TaskDate,
}

/// Validated partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// New name, if supplied.
    pub name: Option<TaskName>,
    /// New due date, if supplied.
    pub due_date: Option<TaskDate>,
    /// Whether the caller asked for `status: false`.
    pub reopen: bool,
}
