//! In-memory adapters for task lifecycle persistence.

mod task;

pub use task::InMemoryTaskRepository;
