//! Task aggregate root and related lifecycle types.

use super::{TaskDate, TaskDomainError, TaskId, TaskName};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Completion state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// Task is still to be done.
    Open,
    /// Task has been completed.
    Complete,
}

impl TaskState {
    /// Returns the boolean `status` used on the wire and in storage.
    #[must_use]
    pub const fn as_status(self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Task aggregate root.
///
/// The completion status is derived from the presence of a done date, so a
/// task is complete exactly when it carries one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    name: TaskName,
    start_date: TaskDate,
    due_date: TaskDate,
    done_date: Option<TaskDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted task name.
    pub name: TaskName,
    /// Persisted start date.
    pub start_date: TaskDate,
    /// Persisted due date.
    pub due_date: TaskDate,
    /// Persisted completion date, if complete.
    pub done_date: Option<TaskDate>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new open task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DateOrderViolation`] when `due_date` is
    /// earlier than `start_date`.
    pub fn new(
        name: TaskName,
        start_date: TaskDate,
        due_date: TaskDate,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        ensure_date_order(start_date, due_date)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            name,
            start_date,
            due_date,
            done_date: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            start_date: data.start_date,
            due_date: data.due_date,
            done_date: data.done_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the start date.
    #[must_use]
    pub const fn start_date(&self) -> TaskDate {
        self.start_date
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> TaskDate {
        self.due_date
    }

    /// Returns the completion date, present only while complete.
    #[must_use]
    pub const fn done_date(&self) -> Option<TaskDate> {
        self.done_date
    }

    /// Returns the completion state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        if self.done_date.is_some() {
            TaskState::Complete
        } else {
            TaskState::Open
        }
    }

    /// Returns the boolean completion status.
    #[must_use]
    pub const fn status(&self) -> bool {
        self.state().as_status()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the task name.
    pub fn rename(&mut self, name: TaskName, clock: &impl Clock) {
        self.name = name;
        self.touch(clock);
    }

    /// Moves the due date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DateOrderViolation`] when `due_date` is
    /// earlier than the task's start date. The task is left unchanged.
    pub fn reschedule(
        &mut self,
        due_date: TaskDate,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        ensure_date_order(self.start_date, due_date)?;
        self.due_date = due_date;
        self.touch(clock);
        Ok(())
    }

    /// Marks the task complete as of today.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyComplete`] when the task is already
    /// complete.
    pub fn complete(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.done_date.is_some() {
            return Err(TaskDomainError::AlreadyComplete(self.id));
        }
        self.done_date = Some(TaskDate::today(clock));
        self.touch(clock);
        Ok(())
    }

    /// Returns a complete task to the open state.
    ///
    /// Returns `true` when the task was complete and has been reopened, and
    /// `false` when it was already open.
    pub fn reopen(&mut self, clock: &impl Clock) -> bool {
        if self.done_date.take().is_none() {
            return false;
        }
        self.touch(clock);
        true
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn ensure_date_order(start_date: TaskDate, due_date: TaskDate) -> Result<(), TaskDomainError> {
    if due_date < start_date {
        return Err(TaskDomainError::DateOrderViolation {
            start_date,
            due_date,
        });
    }
    Ok(())
}
