//! Request handlers for the task routes.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use mockable::Clock;

use super::{
    ApiErrorResponse, ApiResponse, DeletedTaskResponse, TaskMutationResponse, TaskResponse,
};
use crate::task::{
    ports::TaskRepository,
    services::TaskLifecycleService,
    validation::{CreateTaskRequest, ListTasksRequest, UpdateTaskRequest, parse_task_id},
};

/// Shared state handed to every handler.
pub struct AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Lifecycle service backed by the configured store.
    pub service: Arc<TaskLifecycleService<R, C>>,
}

impl<R, C> AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Wraps a lifecycle service.
    #[must_use]
    pub fn new(service: TaskLifecycleService<R, C>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

impl<R, C> Clone for AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

type HandlerResult<T> = Result<Json<ApiResponse<T>>, ApiErrorResponse>;

/// `GET /health`
pub async fn health_check() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::ok("healthy"))
}

/// `GET /api/tasks?name=&status=&sort=`
///
/// # Errors
///
/// Responds 400 for invalid filters and 500 for store failures.
pub async fn list_tasks<R, C>(
    State(state): State<AppState<R, C>>,
    query: Result<Query<ListTasksRequest>, QueryRejection>,
) -> HandlerResult<Vec<TaskResponse>>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let Query(request) = query?;
    let tasks = state.service.list(&request).await?;
    Ok(Json(ApiResponse::ok(
        tasks.iter().map(TaskResponse::from).collect(),
    )))
}

/// `GET /api/task/{id}`
///
/// # Errors
///
/// Responds 404 when the task does not exist.
pub async fn get_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(raw_id): Path<String>,
) -> HandlerResult<TaskResponse>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let id = parse_task_id(&raw_id)?;
    let task = state.service.get(id).await?;
    Ok(Json(ApiResponse::ok(TaskResponse::from(&task))))
}

/// `POST /api/task`
///
/// # Errors
///
/// Responds 400 for malformed bodies or validation failures.
pub async fn create_task<R, C>(
    State(state): State<AppState<R, C>>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<TaskResponse>>), ApiErrorResponse>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let Json(request) = body?;
    let task = state.service.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(TaskResponse::from(&task))),
    ))
}

/// `PATCH /api/task/{id}`
///
/// # Errors
///
/// Responds 400 for validation failures and 404 for unknown tasks.
pub async fn update_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(raw_id): Path<String>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> HandlerResult<TaskMutationResponse>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let id = parse_task_id(&raw_id)?;
    let Json(request) = body?;
    let mutation = state.service.update(id, request).await?;
    Ok(Json(ApiResponse::ok(TaskMutationResponse::from(mutation))))
}

/// `PATCH /api/complete/{id}`
///
/// # Errors
///
/// Responds 400 when the task is already complete and 404 for unknown tasks.
pub async fn complete_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(raw_id): Path<String>,
) -> HandlerResult<TaskResponse>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let id = parse_task_id(&raw_id)?;
    let task = state.service.complete(id).await?;
    Ok(Json(ApiResponse::ok(TaskResponse::from(&task))))
}

/// `DELETE /api/task/{id}`
///
/// # Errors
///
/// Responds 404 when no task was removed.
pub async fn delete_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(raw_id): Path<String>,
) -> HandlerResult<DeletedTaskResponse>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let id = parse_task_id(&raw_id)?;
    state.service.delete(id).await?;
    Ok(Json(ApiResponse::ok(DeletedTaskResponse { id })))
}
