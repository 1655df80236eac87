//! Shared fixtures for in-memory store integration tests.

use crate::test_helpers::{ManualClock, TestTaskService, service_at_jan_fifth};
use rstest::fixture;
use std::io;
use std::sync::Arc;
use taskgate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskDate, TaskName},
};
use tokio::runtime::Runtime;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides a fresh in-memory repository for each test.
#[fixture]
pub fn repo() -> InMemoryTaskRepository {
    InMemoryTaskRepository::new()
}

/// Provides a clock fixed at 2024-01-05.
#[fixture]
pub fn clock() -> ManualClock {
    ManualClock::at(2024, 1, 5)
}

/// Service and the clock driving it.
pub struct ServiceHarness {
    /// Lifecycle service over an empty in-memory store.
    pub service: TestTaskService,
    /// Clock shared with the service.
    pub clock: Arc<ManualClock>,
}

/// Provides a lifecycle service over an empty in-memory store.
#[fixture]
pub fn harness() -> ServiceHarness {
    let (service, clock) = service_at_jan_fifth();
    ServiceHarness { service, clock }
}

/// Builds an open task directly through the domain constructor.
///
/// # Errors
///
/// Returns an error if the name or date order is invalid.
pub fn open_task(
    name: &str,
    start_date: TaskDate,
    due_date: TaskDate,
    clock: &ManualClock,
) -> Result<Task, eyre::Report> {
    let task = Task::new(TaskName::new(name)?, start_date, due_date, clock)?;
    Ok(task)
}
