//! Projection of an internal [`TableSchema`] into its wire description.
//!
//! Every function here is pure. Lists follow the iteration order of the
//! schema's `BTreeMap`s, i.e. ascending by attribute or index name, so the
//! same schema always renders byte-identical JSON.

use std::collections::BTreeMap;

use tablestack_dynamodb_model::output::TableDescription;
use tablestack_dynamodb_model::types::{
    AttributeDefinition, AttributeType, KeySchemaElement, KeyType, Link, LinkRelation,
    LocalSecondaryIndexDescription, Projection, ProjectionType, TableStatus,
};

use crate::schema::{IndexDefinition, TableSchema};

/// Failures while rendering a description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    /// A key schema needs a hash key.
    #[error("key schema has no hash key")]
    EmptyKeySchema,
    /// A key schema has at most a hash and a range key.
    #[error("key schema has {0} attributes, at most 2 are allowed")]
    TooManyKeyAttributes(usize),
}

/// Render the attribute definitions, one per declared attribute.
#[must_use]
pub fn format_attribute_definitions(
    attribute_type_map: &BTreeMap<String, AttributeType>,
) -> Vec<AttributeDefinition> {
    attribute_type_map
        .iter()
        .map(|(name, ty)| AttributeDefinition {
            attribute_name: name.clone(),
            attribute_type: *ty,
        })
        .collect()
}

/// Render a primary key: the first attribute is `HASH`, the second `RANGE`.
pub fn format_key_schema(
    key_attributes: &[String],
) -> Result<Vec<KeySchemaElement>, DescriptorError> {
    match key_attributes {
        [] => Err(DescriptorError::EmptyKeySchema),
        [hash] => Ok(vec![KeySchemaElement::new(hash.as_str(), KeyType::Hash)]),
        [hash, range] => Ok(vec![
            KeySchemaElement::new(hash.as_str(), KeyType::Hash),
            KeySchemaElement::new(range.as_str(), KeyType::Range),
        ]),
        more => Err(DescriptorError::TooManyKeyAttributes(more.len())),
    }
}

/// Render the local secondary indexes.
///
/// Each index shares the table's hash key and sorts by its own range key.
/// No indexes yields an empty list.
#[must_use]
pub fn format_local_secondary_indexes(
    hash_key: &str,
    index_def_map: &BTreeMap<String, IndexDefinition>,
) -> Vec<LocalSecondaryIndexDescription> {
    index_def_map
        .iter()
        .map(|(name, def)| LocalSecondaryIndexDescription {
            index_name: name.clone(),
            key_schema: vec![
                KeySchemaElement::new(hash_key, KeyType::Hash),
                KeySchemaElement::new(def.range_key.as_str(), KeyType::Range),
            ],
            projection: format_projection(def),
            index_size_bytes: 0,
            item_count: 0,
        })
        .collect()
}

fn format_projection(def: &IndexDefinition) -> Projection {
    if def.projected_attributes.is_empty() {
        Projection::default()
    } else {
        Projection {
            projection_type: ProjectionType::Include,
            non_key_attributes: def.projected_attributes.clone(),
        }
    }
}

/// Render the full table description with both links set to `url`.
///
/// Statistics and the creation time are not tracked and render as 0.
pub fn build_table_description(
    schema: &TableSchema,
    url: &str,
) -> Result<TableDescription, DescriptorError> {
    let key_schema = format_key_schema(schema.key_attributes())?;
    let hash_key = key_schema[0].attribute_name.as_str();

    Ok(TableDescription {
        attribute_definitions: format_attribute_definitions(schema.attribute_type_map()),
        creation_date_time: 0,
        item_count: 0,
        local_secondary_indexes: format_local_secondary_indexes(hash_key, schema.index_def_map()),
        key_schema,
        table_name: schema.table_name().to_owned(),
        table_status: TableStatus::Active,
        table_size_bytes: 0,
        links: vec![
            Link {
                href: url.to_owned(),
                rel: LinkRelation::SelfLink,
            },
            Link {
                href: url.to_owned(),
                rel: LinkRelation::Bookmark,
            },
        ],
    })
}
