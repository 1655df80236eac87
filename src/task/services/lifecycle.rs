//! Service layer for task creation, lookup, update, completion, and removal.

use crate::task::{
    domain::{Task, TaskDate, TaskDomainError, TaskField, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
    validation::{
        CreateTaskRequest, ListTasksRequest, UpdateTaskRequest, validate_create,
        validate_list_query, validate_update,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Input validation or a lifecycle rule failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// No task exists with the given identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Description of a partial update that has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMutation {
    /// Task state after the update.
    pub task: Task,
    /// Fields written by the update, in request order.
    pub set: Vec<TaskField>,
    /// Fields removed by the update.
    pub unset: Vec<TaskField>,
}

/// Task lifecycle orchestration service.
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a new open task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when validation fails or
    /// [`TaskLifecycleError::Repository`] when the store rejects the insert.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let today = TaskDate::today(&*self.clock);
        let input = validate_create(&request, today)?;
        let task = Task::new(input.name, input.start_date, input.due_date, &*self.clock)?;
        self.repository.store(&task).await?;
        tracing::info!(task_id = %task.id(), due_date = %task.due_date(), "task created");
        Ok(task)
    }

    /// Lists tasks matching the request filters.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for invalid filters or
    /// [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list(&self, request: &ListTasksRequest) -> TaskLifecycleResult<Vec<Task>> {
        let query = validate_list_query(request)?;
        let tasks = self.repository.list(&query).await?;
        tracing::debug!(count = tasks.len(), "tasks listed");
        Ok(tasks)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist.
    pub async fn get(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }

    /// Applies a partial update.
    ///
    /// A new due date must not precede the task's start date. `status: false`
    /// reopens a complete task; on an open task the done date is reported as
    /// unset even though there was nothing to remove.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when validation or date
    /// ordering fails and [`TaskLifecycleError::NotFound`] when the task does
    /// not exist.
    pub async fn update(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<TaskMutation> {
        let changes = validate_update(&request)?;
        let mut task = self.get(id).await?;
        let clock = &*self.clock;
        let mut set = Vec::new();

        if let Some(name) = changes.name {
            task.rename(name, clock);
            set.push(TaskField::Name);
        }
        if let Some(due_date) = changes.due_date {
            task.reschedule(due_date, clock)?;
            set.push(TaskField::DueDate);
        }
        if changes.reopen {
            let reopened = task.reopen(clock);
            set.push(TaskField::Status);
            tracing::debug!(task_id = %id, reopened, "status cleared");
        }
        let unset = if task.status() {
            Vec::new()
        } else {
            vec![TaskField::DoneDate]
        };

        self.repository
            .update(&task)
            .await
            .map_err(lift_not_found)?;
        tracing::info!(task_id = %id, ?set, "task updated");
        Ok(TaskMutation { task, set, unset })
    }

    /// Marks a task complete as of today.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// and [`TaskLifecycleError::Domain`] with
    /// [`TaskDomainError::AlreadyComplete`] when it is already complete.
    pub async fn complete(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.get(id).await?;
        task.complete(&*self.clock)?;
        self.repository
            .update(&task)
            .await
            .map_err(lift_not_found)?;
        tracing::info!(task_id = %id, "task completed");
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when nothing was removed.
    pub async fn delete(&self, id: TaskId) -> TaskLifecycleResult<()> {
        self.repository.delete(id).await.map_err(lift_not_found)?;
        tracing::info!(task_id = %id, "task deleted");
        Ok(())
    }
}

fn lift_not_found(err: TaskRepositoryError) -> TaskLifecycleError {
    match err {
        TaskRepositoryError::NotFound(id) => TaskLifecycleError::NotFound(id),
        other => TaskLifecycleError::Repository(other),
    }
}
