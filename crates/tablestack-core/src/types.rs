//! Common type definitions shared across services.

use std::fmt;

/// Project (tenant) identifier scoping a customer's tables.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId(String);

impl ProjectId {
    /// Create a new project ID.
    ///
    /// # Errors
    /// Returns an error if the ID is empty, blank, or contains a path separator.
    pub fn new(id: impl Into<String>) -> Result<Self, crate::TableStackError> {
        let id = id.into();
        if id.trim().is_empty() || id.contains('/') {
            return Err(crate::TableStackError::InvalidProjectId(id));
        }
        Ok(Self(id))
    }

    /// Get the project ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProjectId {
    type Error = crate::TableStackError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProjectId> for String {
    fn from(id: ProjectId) -> Self {
        id.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
