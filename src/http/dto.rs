//! Response bodies of the task API.

use crate::task::{
    domain::{Task, TaskDate, TaskField, TaskId},
    services::TaskMutation,
};
use serde::{Deserialize, Serialize};

/// Envelope wrapped around every successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `"ok"`.
    pub message: String,
    /// Operation result.
    pub result: T,
}

impl<T> ApiResponse<T> {
    /// Wraps `result` in a successful envelope.
    #[must_use]
    pub fn ok(result: T) -> Self {
        Self {
            message: "ok".to_owned(),
            result,
        }
    }
}

/// Wire representation of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TaskResponse {
    /// Task identifier.
    pub id: TaskId,
    /// Task name.
    pub name: String,
    /// Completion flag.
    pub status: bool,
    /// Start date (`YYYY-MM-DD`).
    pub start_date: TaskDate,
    /// Due date (`YYYY-MM-DD`).
    pub due_date: TaskDate,
    /// Completion date, present only for complete tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_date: Option<TaskDate>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            name: task.name().as_str().to_owned(),
            status: task.status(),
            start_date: task.start_date(),
            due_date: task.due_date(),
            done_date: task.done_date(),
        }
    }
}

/// Result of a partial update: the updated task and the touched fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskMutationResponse {
    /// Task after the update.
    pub task: TaskResponse,
    /// Fields written.
    pub set: Vec<TaskField>,
    /// Fields removed.
    pub unset: Vec<TaskField>,
}

impl From<TaskMutation> for TaskMutationResponse {
    fn from(mutation: TaskMutation) -> Self {
        Self {
            task: TaskResponse::from(&mutation.task),
            set: mutation.set,
            unset: mutation.unset,
        }
    }
}

/// Result of a deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedTaskResponse {
    /// Identifier of the removed task.
    pub id: TaskId,
}
