//! Input validation for task lifecycle requests.
//!
//! Requests arrive with every field optional. The rules in [`rules`] turn
//! them into typed, normalized values before any store access happens.

mod request;
pub mod rules;

pub use request::{CreateTaskRequest, ListTasksRequest, NewTask, TaskChanges, UpdateTaskRequest};
pub use rules::{parse_task_id, validate_create, validate_list_query, validate_update};
