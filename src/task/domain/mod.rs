//! Domain model for task lifecycle management.
//!
//! The task domain models creation, completion, reopening, and rescheduling
//! of to-do items while keeping all infrastructure concerns outside of the
//! domain boundary.

mod date;
mod error;
mod field;
mod ids;
mod name;
mod query;
mod task;

pub use date::TaskDate;
pub use error::{ParseSortFieldError, TaskDomainError};
pub use field::TaskField;
pub use ids::TaskId;
pub use name::TaskName;
pub use query::{NameFilter, SortField, TaskQuery};
pub use task::{PersistedTaskData, Task, TaskState};
