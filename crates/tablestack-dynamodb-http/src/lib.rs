//! REST/JSON HTTP service layer for TableStack.
//!
//! Tables are addressed as REST resources:
//!
//! ```text
//! GET /v1/{project_id}/data/tables/{table_name}
//! ```
//!
//! This crate provides:
//!
//! - **Router**: Resolves the request path into an operation and its inputs
//! - **Handler trait**: Defines the boundary between HTTP and business logic
//! - **Service**: Hyper `Service` implementation wiring the two together
//! - **Response helpers**: JSON success/error response formatting
#![allow(missing_docs)]

pub mod dispatch;
pub mod response;
pub mod router;
pub mod service;

pub use dispatch::{OperationRequest, TableHandler};
pub use response::TableResponseBody;
pub use service::{TableHttpConfig, TableHttpService};
