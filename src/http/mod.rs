//! HTTP surface of the task API.
//!
//! Routes map one-to-one onto [`TaskLifecycleService`] operations. Every
//! successful response is wrapped in an [`ApiResponse`] envelope and every
//! failure is rendered by [`ApiErrorResponse`].
//!
//! [`TaskLifecycleService`]: crate::task::services::TaskLifecycleService

mod dto;
mod error;
mod handlers;
mod router;

pub use dto::{ApiResponse, DeletedTaskResponse, TaskMutationResponse, TaskResponse};
pub use error::{ApiError, ApiErrorResponse};
pub use handlers::{
    AppState, complete_task, create_task, delete_task, get_task, health_check, list_tasks,
    update_task,
};
pub use router::router;
