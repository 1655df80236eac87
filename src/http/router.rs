//! Route table for the task API.

use axum::{
    Router,
    routing::{get, patch, post},
};
use mockable::Clock;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{
    AppState, complete_task, create_task, delete_task, get_task, health_check, list_tasks,
    update_task,
};
use crate::task::{ports::TaskRepository, services::TaskLifecycleService};

/// Builds the application router around `service`.
///
/// CORS is open to any origin and every request is traced.
pub fn router<R, C>(service: TaskLifecycleService<R, C>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/tasks", get(list_tasks::<R, C>))
        .route("/api/task", post(create_task::<R, C>))
        .route(
            "/api/task/{id}",
            get(get_task::<R, C>)
                .patch(update_task::<R, C>)
                .delete(delete_task::<R, C>),
        )
        .route("/api/complete/{id}", patch(complete_task::<R, C>))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(AppState::new(service))
}
