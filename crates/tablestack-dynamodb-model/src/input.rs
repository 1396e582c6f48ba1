//! Input types.

use serde::{Deserialize, Serialize};

/// Input for the `DescribeTable` operation.
///
/// Both fields come from the request path rather than a JSON body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeTableInput {
    /// Project (tenant) owning the table.
    pub project_id: String,
    /// The name of the table to describe.
    pub table_name: String,
}

impl DescribeTableInput {
    /// Create a new input.
    #[must_use]
    pub fn new(project_id: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            table_name: table_name.into(),
        }
    }
}
