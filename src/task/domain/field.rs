//! Names of the client-visible task fields.

use std::fmt;

/// A field of the task record as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    /// The task name.
    Name,
    /// The completion flag.
    Status,
    /// The day the task starts.
    StartDate,
    /// The day the task is due.
    DueDate,
    /// The day the task was completed.
    DoneDate,
}

impl TaskField {
    /// Returns the wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Status => "status",
            Self::StartDate => "start-date",
            Self::DueDate => "due-date",
            Self::DoneDate => "done-date",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for TaskField {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
