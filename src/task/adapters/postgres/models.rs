//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Completion flag.
    pub status: bool,
    /// Start date.
    pub start_date: NaiveDate,
    /// Due date.
    pub due_date: NaiveDate,
    /// Completion date.
    pub done_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Completion flag.
    pub status: bool,
    /// Start date.
    pub start_date: NaiveDate,
    /// Due date.
    pub due_date: NaiveDate,
    /// Completion date.
    pub done_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for the mutable task columns.
///
/// `done_date: None` writes `NULL`, which is how reopening removes the
/// completion date.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task name.
    pub name: String,
    /// Completion flag.
    pub status: bool,
    /// Due date.
    pub due_date: NaiveDate,
    /// Completion date.
    pub done_date: Option<NaiveDate>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
