//! Filter and sort criteria for task listings.

use super::{ParseSortFieldError, Task, TaskDate, TaskDomainError, TaskField, name::check_length};

/// Date field a listing can be sorted by, always ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    /// Sort by start date.
    StartDate,
    /// Sort by due date.
    DueDate,
    /// Sort by completion date; open tasks are excluded.
    DoneDate,
}

impl SortField {
    /// Returns the task field this sort key reads.
    #[must_use]
    pub const fn field(self) -> TaskField {
        match self {
            Self::StartDate => TaskField::StartDate,
            Self::DueDate => TaskField::DueDate,
            Self::DoneDate => TaskField::DoneDate,
        }
    }

    /// Extracts the sort key from `task`, or `None` when the task lacks it.
    #[must_use]
    pub const fn key(self, task: &Task) -> Option<TaskDate> {
        match self {
            Self::StartDate => Some(task.start_date()),
            Self::DueDate => Some(task.due_date()),
            Self::DoneDate => task.done_date(),
        }
    }
}

impl TryFrom<&str> for SortField {
    type Error = ParseSortFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "start-date" => Ok(Self::StartDate),
            "due-date" => Ok(Self::DueDate),
            "done-date" => Ok(Self::DoneDate),
            _ => Err(ParseSortFieldError(value.to_owned())),
        }
    }
}

/// Case-insensitive substring filter on task names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFilter {
    needle: String,
}

impl NameFilter {
    /// Creates a name filter.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::FieldTooLong`] when the filter is longer
    /// than a task name may be.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let needle = value.into();
        check_length(TaskField::Name, &needle)?;
        Ok(Self { needle })
    }

    /// Returns the filter text as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Returns whether `name` contains the filter text, ignoring case.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.needle.to_lowercase())
    }
}

/// Validated listing criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    name: Option<NameFilter>,
    status: Option<bool>,
    sort: Option<SortField>,
}

impl TaskQuery {
    /// Creates a query matching every task in creation order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to names containing `filter`.
    #[must_use]
    pub fn with_name(mut self, filter: NameFilter) -> Self {
        self.name = Some(filter);
        self
    }

    /// Restricts results to the given completion status.
    #[must_use]
    pub const fn with_status(mut self, status: bool) -> Self {
        self.status = Some(status);
        self
    }

    /// Sorts results ascending by `field`.
    #[must_use]
    pub const fn sorted_by(mut self, field: SortField) -> Self {
        self.sort = Some(field);
        self
    }

    /// Returns the name filter, if any.
    #[must_use]
    pub const fn name(&self) -> Option<&NameFilter> {
        self.name.as_ref()
    }

    /// Returns the status filter, if any.
    #[must_use]
    pub const fn status(&self) -> Option<bool> {
        self.status
    }

    /// Returns the sort field, if any.
    #[must_use]
    pub const fn sort(&self) -> Option<SortField> {
        self.sort
    }

    /// Returns whether `task` satisfies every filter of this query.
    ///
    /// A sorted query also excludes tasks missing the sort field.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let name_matches = self
            .name
            .as_ref()
            .is_none_or(|filter| filter.matches(task.name().as_str()));
        let status_matches = self.status.is_none_or(|status| task.status() == status);
        let has_sort_key = self.sort.is_none_or(|field| field.key(task).is_some());
        name_matches && status_matches && has_sort_key
    }
}
