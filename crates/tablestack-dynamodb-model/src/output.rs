//! Output types.
//!
//! Unlike request-driven optional fields elsewhere in the DynamoDB API, every
//! field of a [`TableDescription`] is always present on the wire: empty index
//! lists serialize as `[]` and the untracked statistics serialize as `0`.

use serde::{Deserialize, Serialize};

use crate::types::{
    AttributeDefinition, KeySchemaElement, Link, LocalSecondaryIndexDescription, TableStatus,
};

/// Output for the `DescribeTable` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribeTableOutput {
    /// The properties of the table.
    #[serde(rename = "Table")]
    pub table: TableDescription,
}

/// Description of a single table.
///
/// Field order matches the order in which fields appear on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableDescription {
    /// The attribute definitions for the table.
    pub attribute_definitions: Vec<AttributeDefinition>,
    /// Always 0: creation timestamps are not recorded.
    pub creation_date_time: i64,
    /// Always 0: item counts are not tracked.
    pub item_count: i64,
    /// The primary key schema.
    pub key_schema: Vec<KeySchemaElement>,
    /// The local secondary indexes; empty when the table has none.
    pub local_secondary_indexes: Vec<LocalSecondaryIndexDescription>,
    /// The name of the table.
    pub table_name: String,
    /// The current status of the table.
    pub table_status: TableStatus,
    /// Always 0: table sizes are not tracked.
    pub table_size_bytes: i64,
    /// Navigation links (`self` and `bookmark`).
    pub links: Vec<Link>,
}
