//! Error types for the TableStack core.

/// Core error type for TableStack infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum TableStackError {
    /// Invalid project (tenant) identifier.
    #[error("invalid project ID: {0:?} (must be non-empty and contain no '/')")]
    InvalidProjectId(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience result type for TableStack operations.
pub type TableStackResult<T> = Result<T, TableStackError>;
