//! Schema storage collaborator.
//!
//! [`SchemaStore`] is the read path the DescribeTable logic depends on.
//! [`MemorySchemaStore`] keeps one catalog per project and is seeded at
//! startup, either table by table or from a JSON document shaped like:
//!
//! ```json
//! { "<project>": [ { "table_name": "...", "attribute_type_map": {...},
//!                    "key_attributes": [...], "index_def_map": {...} } ] }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use dashmap::DashMap;

use tablestack_core::{ProjectId, ProjectStore, TableStackResult};
use tablestack_dynamodb_model::error::DynamoDBError;

use crate::context::RequestContext;
use crate::schema::TableSchema;

/// Failures reported by a [`SchemaStore`].
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The requested table does not exist in the tenant's catalog.
    #[error("Requested resource not found: Table: {0} not found")]
    TableNotExists(String),
    /// The store produced an error already in the external vocabulary.
    #[error(transparent)]
    Service(DynamoDBError),
    /// The backing store could not be reached.
    #[error("schema store unavailable: {0}")]
    Unavailable(String),
    /// The request was cancelled before the fetch completed.
    #[error("request cancelled")]
    Cancelled,
    /// No tenant scope was bound on the request context.
    #[error("no tenant bound on request context")]
    MissingTenant,
    /// Any other fault.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Read access to table schemas, scoped by the context's tenant.
#[async_trait]
pub trait SchemaStore: Send + Sync + std::fmt::Debug {
    /// Fetch the schema of `table_name` in the tenant bound on `ctx`.
    async fn describe_table(
        &self,
        ctx: &RequestContext,
        table_name: &str,
    ) -> Result<TableSchema, StorageError>;
}

/// Tables of one project.
#[derive(Debug, Default)]
pub struct SchemaCatalog {
    tables: DashMap<String, Arc<TableSchema>>,
}

/// In-memory [`SchemaStore`] partitioned by project.
#[derive(Debug, Default)]
pub struct MemorySchemaStore {
    projects: ProjectStore<SchemaCatalog>,
}

impl MemorySchemaStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a table in `project`'s catalog.
    pub fn put_table(&self, project: &ProjectId, schema: TableSchema) {
        let catalog = self.projects.get_or_create(project);
        catalog
            .tables
            .insert(schema.table_name().to_owned(), Arc::new(schema));
    }

    /// Number of tables seeded for `project`.
    #[must_use]
    pub fn table_count(&self, project: &ProjectId) -> usize {
        self.projects.get(project).map_or(0, |catalog| catalog.tables.len())
    }

    /// Seed from a JSON document. Returns the number of tables loaded.
    pub fn load_json(&self, json: &str) -> TableStackResult<usize> {
        let seed: BTreeMap<ProjectId, Vec<TableSchema>> =
            serde_json::from_str(json).context("invalid schema seed document")?;

        let mut loaded = 0;
        for (project, tables) in seed {
            for schema in tables {
                self.put_table(&project, schema);
                loaded += 1;
            }
        }
        Ok(loaded)
    }

    /// Seed from a JSON file. Returns the number of tables loaded.
    pub fn load_seed_file(&self, path: &Path) -> TableStackResult<usize> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read schema seed {}", path.display()))?;
        let loaded = self.load_json(&json)?;
        tracing::info!(path = %path.display(), tables = loaded, "loaded schema seed");
        Ok(loaded)
    }
}

#[async_trait]
impl SchemaStore for MemorySchemaStore {
    async fn describe_table(
        &self,
        ctx: &RequestContext,
        table_name: &str,
    ) -> Result<TableSchema, StorageError> {
        let project = ctx.tenant().ok_or(StorageError::MissingTenant)?;

        tracing::debug!(
            project_id = %project,
            table_name,
            request_id = ctx.request_id(),
            "fetching table schema",
        );

        let fetch = async {
            self.projects
                .get(project)
                .and_then(|catalog| {
                    catalog
                        .tables
                        .get(table_name)
                        .map(|schema| schema.value().as_ref().clone())
                })
                .ok_or_else(|| StorageError::TableNotExists(table_name.to_owned()))
        };

        tokio::select! {
            biased;
            () = ctx.cancellation().cancelled() => Err(StorageError::Cancelled),
            result = fetch => result,
        }
    }
}
