//! Error classification for DescribeTable.
//!
//! Every failure ends up in exactly one of three kinds: the table was not
//! found, a service error that is already in the external vocabulary, or an
//! internal fault whose detail must never reach the caller.

use tablestack_dynamodb_model::error::DynamoDBError;

use crate::descriptor::DescriptorError;
use crate::storage::StorageError;

/// Failure of a DescribeTable request.
#[derive(Debug, thiserror::Error)]
pub enum DescribeTableError {
    /// The table does not exist. Carries the storage message.
    #[error("{0}")]
    NotFound(String),
    /// An error already in the external vocabulary, passed through as is.
    #[error(transparent)]
    Service(DynamoDBError),
    /// Any other fault. The detail is for logs only.
    #[error("internal failure: {0:#}")]
    Internal(anyhow::Error),
}

impl DescribeTableError {
    /// Wrap an arbitrary fault as an internal error.
    pub fn internal(error: impl Into<anyhow::Error>) -> Self {
        Self::Internal(error.into())
    }

    /// Whether this is an internal fault.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}

impl From<StorageError> for DescribeTableError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::TableNotExists(_) => Self::NotFound(err.to_string()),
            StorageError::Service(e) => Self::Service(e),
            StorageError::Internal(e) => Self::Internal(e),
            other => Self::internal(other),
        }
    }
}

impl From<DescriptorError> for DescribeTableError {
    fn from(err: DescriptorError) -> Self {
        Self::internal(err)
    }
}

impl From<DescribeTableError> for DynamoDBError {
    fn from(err: DescribeTableError) -> Self {
        match err {
            DescribeTableError::NotFound(message) => DynamoDBError::resource_not_found(message),
            DescribeTableError::Service(e) => e,
            DescribeTableError::Internal(_) => DynamoDBError::internal_failure(),
        }
    }
}
