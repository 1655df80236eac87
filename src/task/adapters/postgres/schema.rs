//! Diesel schema for task lifecycle persistence.

/// Idempotent DDL creating the `tasks` table and its constraints.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../../../migrations/2026-10-19-000000_create_tasks/up.sql");

diesel::table! {
    /// Task records with lifecycle dates.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task name, 1 to 64 characters.
        #[max_length = 64]
        name -> Varchar,
        /// Completion flag, true exactly when `done_date` is set.
        status -> Bool,
        /// Day the task starts.
        start_date -> Date,
        /// Day the task is due.
        due_date -> Date,
        /// Day the task was completed.
        done_date -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
