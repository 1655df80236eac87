//! In-memory integration tests for task lifecycle operations.

use crate::in_memory::helpers::{ServiceHarness, harness};
use crate::test_helpers::date;
use rstest::rstest;
use taskgate::task::{
    domain::{Task, TaskDomainError, TaskField, TaskState},
    services::TaskLifecycleError,
    validation::{CreateTaskRequest, ListTasksRequest, UpdateTaskRequest},
};

/// Asserts the listed task names match `expected` in order.
///
/// # Errors
///
/// Returns an error describing the mismatch when the order differs.
fn assert_names(tasks: &[Task], expected: &[&str]) -> Result<(), eyre::Report> {
    let actual: Vec<&str> = tasks.iter().map(|task| task.name().as_str()).collect();
    eyre::ensure!(
        actual == expected,
        "expected tasks {expected:?}, found {actual:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_round_trip(harness: ServiceHarness) -> Result<(), eyre::Report> {
    let ServiceHarness { service, clock } = harness;

    let created = service
        .create(CreateTaskRequest::new("Renew passport", "2024-02-01"))
        .await?;
    eyre::ensure!(created.state() == TaskState::Open, "new task must be open");

    let mutation = service
        .update(
            created.id(),
            UpdateTaskRequest::new().with_due_date("2024-03-01"),
        )
        .await?;
    eyre::ensure!(mutation.set == vec![TaskField::DueDate], "unexpected set");

    clock.advance_days(10);
    let completed = service.complete(created.id()).await?;
    eyre::ensure!(
        completed.done_date() == Some(date(2024, 1, 15)),
        "done date must be the completion day"
    );

    let reopened = service
        .update(created.id(), UpdateTaskRequest::new().with_status(false))
        .await?;
    eyre::ensure!(reopened.task.done_date().is_none(), "reopen clears done date");

    service.delete(created.id()).await?;
    let listed = service.list(&ListTasksRequest::new()).await?;
    eyre::ensure!(listed.is_empty(), "deleted task must not be listed");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_combines_filters_and_sorting(harness: ServiceHarness) -> Result<(), eyre::Report> {
    let ServiceHarness { service, clock } = harness;
    for (name, start, due) in [
        ("Grocery run", "2024-01-05", "2024-01-09"),
        ("Groceries for party", "2024-01-02", "2024-01-20"),
        ("Gym", "2024-01-01", "2024-01-07"),
        ("grocery list", "2024-01-03", "2024-01-08"),
    ] {
        service
            .create(CreateTaskRequest::new(name, due).with_start_date(start))
            .await?;
    }

    let by_start = service
        .list(
            &ListTasksRequest::new()
                .with_name("grocer")
                .with_sort("start-date"),
        )
        .await?;
    assert_names(&by_start, &["Groceries for party", "grocery list", "Grocery run"])?;

    let gym = service
        .list(&ListTasksRequest::new().with_name("gym"))
        .await?;
    let gym_task = gym
        .first()
        .ok_or_else(|| eyre::eyre!("expected the gym task"))?;
    clock.advance_days(1);
    service.complete(gym_task.id()).await?;

    let done = service
        .list(&ListTasksRequest::new().with_status("true"))
        .await?;
    assert_names(&done, &["Gym"])?;

    let open_by_due = service
        .list(
            &ListTasksRequest::new()
                .with_status("false")
                .with_sort("due-date"),
        )
        .await?;
    assert_names(
        &open_by_due,
        &["grocery list", "Grocery run", "Groceries for party"],
    )?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn start_date_defaults_to_clock_day(harness: ServiceHarness) -> Result<(), eyre::Report> {
    let ServiceHarness { service, clock } = harness;
    clock.advance_days(3);

    let task = service
        .create(CreateTaskRequest::new("Stand-up notes", "2024-01-08"))
        .await?;

    eyre::ensure!(task.start_date() == date(2024, 1, 8), "start defaults to today");
    eyre::ensure!(task.due_date() == task.start_date(), "due equals start");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creation_with_status_true_is_unsupported(harness: ServiceHarness) {
    let result = harness
        .service
        .create(CreateTaskRequest::new("Shortcut", "2024-01-10").with_status(true))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::UnsupportedTransition))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_twice_keeps_first_done_date(
    harness: ServiceHarness,
) -> Result<(), eyre::Report> {
    let ServiceHarness { service, clock } = harness;
    let task = service
        .create(CreateTaskRequest::new("File taxes", "2024-04-15"))
        .await?;
    service.complete(task.id()).await?;
    clock.advance_days(2);

    let second = service.complete(task.id()).await;
    eyre::ensure!(
        matches!(
            second,
            Err(TaskLifecycleError::Domain(TaskDomainError::AlreadyComplete(_)))
        ),
        "second completion must be rejected"
    );

    let stored = service.get(task.id()).await?;
    eyre::ensure!(
        stored.done_date() == Some(date(2024, 1, 5)),
        "done date must not move"
    );
    Ok(())
}
