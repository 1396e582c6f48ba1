//! DescribeTable request orchestration.

use std::sync::Arc;

use tracing::{debug, warn};

use tablestack_core::ProjectId;
use tablestack_dynamodb_model::error::DynamoDBError;
use tablestack_dynamodb_model::input::DescribeTableInput;
use tablestack_dynamodb_model::output::DescribeTableOutput;

use crate::context::RequestContext;
use crate::descriptor::build_table_description;
use crate::error::DescribeTableError;
use crate::storage::SchemaStore;

/// Provider answering DescribeTable from a [`SchemaStore`].
#[derive(Debug, Clone)]
pub struct TableStackProvider {
    store: Arc<dyn SchemaStore>,
}

impl TableStackProvider {
    /// Create a provider reading schemas from `store`.
    #[must_use]
    pub fn new(store: Arc<dyn SchemaStore>) -> Self {
        Self { store }
    }

    /// Handle `DescribeTable`.
    ///
    /// Binds the project as tenant scope on `ctx`, fetches the schema and
    /// renders it. Internal faults are logged with their detail here and
    /// reach the caller only as [`DescribeTableError::Internal`].
    pub async fn handle_describe_table(
        &self,
        ctx: &mut RequestContext,
        input: DescribeTableInput,
    ) -> Result<DescribeTableOutput, DescribeTableError> {
        let result = self.describe_table(ctx, input).await;
        if let Err(DescribeTableError::Internal(e)) = &result {
            let detail = format!("{e:#}");
            warn!(
                request_id = ctx.request_id(),
                error = %detail,
                "DescribeTable failed with an internal error",
            );
        }
        result
    }

    async fn describe_table(
        &self,
        ctx: &mut RequestContext,
        input: DescribeTableInput,
    ) -> Result<DescribeTableOutput, DescribeTableError> {
        let project = ProjectId::new(input.project_id)
            .map_err(|e| DescribeTableError::Service(DynamoDBError::validation(e.to_string())))?;
        if input.table_name.is_empty() {
            return Err(DescribeTableError::Service(DynamoDBError::validation(
                "TableName must not be empty",
            )));
        }

        ctx.set_tenant(project);
        let schema = self.store.describe_table(ctx, &input.table_name).await?;

        let url = ctx.path_url();
        let table = build_table_description(&schema, url)?;
        debug!(
            table_name = %table.table_name,
            attributes = table.attribute_definitions.len(),
            indexes = table.local_secondary_indexes.len(),
            "described table",
        );
        Ok(DescribeTableOutput { table })
    }
}
