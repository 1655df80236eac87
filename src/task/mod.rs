//! Task lifecycle management.
//!
//! Tasks are created open, may be renamed or rescheduled, are completed
//! through a dedicated operation, and can be reopened by clearing their
//! status. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Request validation in [`validation`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;
