//! Shared world state for task lifecycle BDD scenarios.

use std::sync::Arc;

use crate::test_helpers::{ManualClock, TestTaskService, service_at_jan_fifth};
use rstest::fixture;
use taskgate::task::{
    domain::Task,
    services::{TaskLifecycleError, TaskMutation},
};

/// Scenario world for task lifecycle behaviour tests.
pub struct TaskLifecycleWorld {
    pub service: TestTaskService,
    pub clock: Arc<ManualClock>,
    pub current_task: Option<Task>,
    pub last_mutation: Option<TaskMutation>,
    pub last_error: Option<TaskLifecycleError>,
}

impl TaskLifecycleWorld {
    /// Creates a world over an empty store with the clock at 2024-01-05.
    #[must_use]
    pub fn new() -> Self {
        let (service, clock) = service_at_jan_fifth();
        Self {
            service,
            clock,
            current_task: None,
            last_mutation: None,
            last_error: None,
        }
    }

    /// Returns the task the scenario is working on.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.current_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing current task in scenario world"))
    }

    /// Records the outcome of an operation that yields a task.
    pub fn record(&mut self, outcome: Result<Task, TaskLifecycleError>) {
        match outcome {
            Ok(task) => self.current_task = Some(task),
            Err(error) => self.last_error = Some(error),
        }
    }
}

impl Default for TaskLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskLifecycleWorld {
    TaskLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
