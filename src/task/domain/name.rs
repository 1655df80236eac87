//! Validated task name.

use super::{TaskDomainError, TaskField};
use std::fmt;

/// Non-empty task name of at most [`TaskName::MAX_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskName(String);

impl TaskName {
    /// Maximum name length in characters.
    pub const MAX_LENGTH: usize = 64;

    /// Creates a validated task name.
    ///
    /// Surrounding whitespace is trimmed before the length checks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MissingField`] when the trimmed value is
    /// empty and [`TaskDomainError::FieldTooLong`] when it exceeds
    /// [`TaskName::MAX_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::MissingField(TaskField::Name));
        }
        check_length(TaskField::Name, trimmed)?;
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rejects text longer than [`TaskName::MAX_LENGTH`] characters.
pub(crate) fn check_length(field: TaskField, value: &str) -> Result<(), TaskDomainError> {
    let actual = value.chars().count();
    if actual > TaskName::MAX_LENGTH {
        return Err(TaskDomainError::FieldTooLong {
            field,
            max: TaskName::MAX_LENGTH,
            actual,
        });
    }
    Ok(())
}

impl TryFrom<String> for TaskName {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskName> for String {
    fn from(value: TaskName) -> Self {
        value.0
    }
}

impl AsRef<str> for TaskName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
