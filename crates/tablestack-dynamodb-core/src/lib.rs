//! Table schema catalog and DescribeTable business logic for TableStack.
#![allow(missing_docs, clippy::doc_markdown, clippy::module_name_repetitions)]

pub mod config;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod handler;
pub mod provider;
pub mod schema;
pub mod storage;
