//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::{CREATE_TASKS_SQL, tasks},
};
use crate::task::{
    domain::{PersistedTaskData, SortField, Task, TaskDate, TaskId, TaskName, TaskQuery},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
///
/// The `tasks` table is created on first access if it does not exist yet.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
    schema_ready: Arc<OnceCell<()>>,
}

/// A stored row whose status flag disagrees with its completion date.
#[derive(Debug, Error)]
#[error("task {0} has status and done_date out of sync")]
struct InconsistentCompletion(uuid::Uuid);

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub fn new(pool: TaskPgPool) -> Self {
        Self {
            pool,
            schema_ready: Arc::new(OnceCell::new()),
        }
    }

    /// Builds a connection pool for `database_url` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the pool cannot
    /// establish its initial connections.
    pub fn connect(database_url: &str, max_size: u32) -> TaskRepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(max_size)
            .build(manager)
            .map_err(TaskRepositoryError::persistence)?;
        Ok(Self::new(pool))
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        self.ensure_schema().await?;
        self.run_on_connection(f).await
    }

    async fn ensure_schema(&self) -> TaskRepositoryResult<()> {
        self.schema_ready
            .get_or_try_init(|| {
                self.run_on_connection(|connection| {
                    tracing::info!("ensuring tasks table exists");
                    connection
                        .batch_execute(CREATE_TASKS_SQL)
                        .map_err(TaskRepositoryError::persistence)
                })
            })
            .await?;
        Ok(())
    }

    async fn run_on_connection<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task);

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let owned_query = query.clone();
        self.run_blocking(move |connection| {
            let rows = load_matching_rows(connection, &owned_query)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if removed == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn load_matching_rows(
    connection: &mut PgConnection,
    query: &TaskQuery,
) -> TaskRepositoryResult<Vec<TaskRow>> {
    let mut statement = tasks::table.select(TaskRow::as_select()).into_boxed::<Pg>();

    if let Some(filter) = query.name() {
        statement = statement.filter(tasks::name.ilike(like_pattern(filter.as_str())));
    }
    if let Some(status) = query.status() {
        statement = statement.filter(tasks::status.eq(status));
    }

    statement = match query.sort() {
        Some(SortField::StartDate) => {
            statement.order((tasks::start_date.asc(), tasks::created_at.asc()))
        }
        Some(SortField::DueDate) => {
            statement.order((tasks::due_date.asc(), tasks::created_at.asc()))
        }
        Some(SortField::DoneDate) => statement
            .filter(tasks::done_date.is_not_null())
            .order((tasks::done_date.asc(), tasks::created_at.asc())),
        None => statement.order(tasks::created_at.asc()),
    };

    statement
        .load::<TaskRow>(connection)
        .map_err(TaskRepositoryError::persistence)
}

/// Builds an `ILIKE` substring pattern with wildcard characters escaped.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        name: task.name().as_str().to_owned(),
        status: task.status(),
        start_date: task.start_date().into_inner(),
        due_date: task.due_date().into_inner(),
        done_date: task.done_date().map(TaskDate::into_inner),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        name: task.name().as_str().to_owned(),
        status: task.status(),
        due_date: task.due_date().into_inner(),
        done_date: task.done_date().map(TaskDate::into_inner),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        name,
        status,
        start_date,
        due_date,
        done_date,
        created_at,
        updated_at,
    } = row;

    if status != done_date.is_some() {
        return Err(TaskRepositoryError::persistence(InconsistentCompletion(id)));
    }
    let task_name = TaskName::new(name).map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        name: task_name,
        start_date: TaskDate::from_naive(start_date),
        due_date: TaskDate::from_naive(due_date),
        done_date: done_date.map(TaskDate::from_naive),
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
