//! Core types, configuration, and state management for TableStack.
//!
//! This crate provides the building blocks shared by the TableStack service
//! crates: tenant (project) identifiers, per-project state partitioning,
//! environment-driven configuration, and the infrastructure error type.

mod config;
mod error;
mod state;
mod types;

pub use config::TableStackConfig;
pub use error::{TableStackError, TableStackResult};
pub use state::ProjectStore;
pub use types::ProjectId;
