//! Taskgate: a task-management REST API.
//!
//! Clients create, list, update, complete, and delete task records. Each task
//! has a name, a start date, a due date that may not precede it, and a
//! completion date that exists exactly while the task is complete.
//!
//! # Architecture
//!
//! Taskgate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle domain, validation, storage, and services
//! - [`http`]: Axum routes exposing the lifecycle operations as JSON
//! - [`config`]: Environment-driven process configuration

pub mod config;
pub mod http;
pub mod task;
