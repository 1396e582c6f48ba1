//! DynamoDB-compatible wire types for TableStack.
//!
//! These types mirror the JSON shapes of the table description API. They are
//! hand-written since the JSON protocol makes serde derives trivial.
// "DynamoDB" appears in virtually every doc comment in this crate.
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
#![allow(missing_docs)]

pub mod error;
pub mod input;
pub mod output;
pub mod types;

pub use error::{DynamoDBError, DynamoDBErrorCode};
pub use input::DescribeTableInput;
pub use output::{DescribeTableOutput, TableDescription};
