//! Internal table schema representation.
//!
//! A [`TableSchema`] is owned by the schema store and read-only to the
//! DescribeTable logic. Its invariants are checked once, at construction:
//!
//! - the table has one (hash) or two (hash + range) key attributes;
//! - every key attribute is declared in the attribute type map with a scalar type;
//! - every index range key is declared with a scalar type and differs from
//!   the table's hash key;
//! - projected attributes are declared, unique, and not key attributes of
//!   the table or of the index.
//!
//! Both maps are `BTreeMap`s, so iteration (and therefore every rendered
//! list) is in ascending name order.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use tablestack_dynamodb_model::types::AttributeType;

/// Reasons a schema fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The table name is empty.
    #[error("table name must not be empty")]
    EmptyTableName,
    /// No key attributes were given.
    #[error("table {table} must have a hash key")]
    MissingHashKey { table: String },
    /// More than two key attributes were given.
    #[error("table {table} has {count} key attributes, at most 2 are allowed")]
    TooManyKeyAttributes { table: String, count: usize },
    /// The same attribute appears twice in the primary key.
    #[error("attribute {attribute} appears twice in the key of table {table}")]
    DuplicateKeyAttribute { table: String, attribute: String },
    /// A key attribute is missing from the attribute type map.
    #[error("key attribute {attribute} of table {table} is not declared")]
    UndeclaredKeyAttribute { table: String, attribute: String },
    /// A key attribute has a set type.
    #[error("key attribute {attribute} of table {table} has non-scalar type {attribute_type}")]
    NonScalarKeyAttribute {
        table: String,
        attribute: String,
        attribute_type: AttributeType,
    },
    /// An index range key is missing from the attribute type map.
    #[error("range key {attribute} of index {index} is not declared")]
    UndeclaredIndexKey { index: String, attribute: String },
    /// An index range key has a set type.
    #[error("range key {attribute} of index {index} has non-scalar type {attribute_type}")]
    NonScalarIndexKey {
        index: String,
        attribute: String,
        attribute_type: AttributeType,
    },
    /// An index reuses the table's hash key as its range key.
    #[error("index {index} cannot use hash key {attribute} as its range key")]
    IndexKeyIsHashKey { index: String, attribute: String },
    /// A projected attribute is missing from the attribute type map.
    #[error("projected attribute {attribute} of index {index} is not declared")]
    UndeclaredProjectedAttribute { index: String, attribute: String },
    /// A projected attribute is a key attribute, which every index carries anyway.
    #[error("index {index} cannot project key attribute {attribute}")]
    KeyProjectedAttribute { index: String, attribute: String },
    /// The same attribute is projected twice.
    #[error("attribute {attribute} is projected twice by index {index}")]
    DuplicateProjectedAttribute { index: String, attribute: String },
}

/// Definition of a local secondary index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndexDefinition {
    /// The attribute the index sorts by.
    pub range_key: String,
    /// Non-key attributes copied into the index. Empty means all attributes.
    #[serde(default)]
    pub projected_attributes: Vec<String>,
}

impl IndexDefinition {
    /// An index over `range_key` projecting all attributes.
    #[must_use]
    pub fn new(range_key: impl Into<String>) -> Self {
        Self {
            range_key: range_key.into(),
            projected_attributes: Vec::new(),
        }
    }

    /// Restrict the projection to the given non-key attributes.
    #[must_use]
    pub fn with_projected_attributes(mut self, attributes: Vec<String>) -> Self {
        self.projected_attributes = attributes;
        self
    }
}

/// Validated schema of one table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawTableSchema")]
pub struct TableSchema {
    table_name: String,
    attribute_type_map: BTreeMap<String, AttributeType>,
    key_attributes: Vec<String>,
    index_def_map: BTreeMap<String, IndexDefinition>,
}

/// Unvalidated wire shape of a [`TableSchema`].
#[derive(Debug, Deserialize)]
struct RawTableSchema {
    table_name: String,
    attribute_type_map: BTreeMap<String, AttributeType>,
    key_attributes: Vec<String>,
    #[serde(default)]
    index_def_map: BTreeMap<String, IndexDefinition>,
}

impl TryFrom<RawTableSchema> for TableSchema {
    type Error = SchemaError;

    fn try_from(raw: RawTableSchema) -> Result<Self, Self::Error> {
        Self::new(
            raw.table_name,
            raw.attribute_type_map,
            raw.key_attributes,
            raw.index_def_map,
        )
    }
}

/// Check the non-key attributes projected by index `index`.
fn check_projection(
    index: &str,
    def: &IndexDefinition,
    attribute_type_map: &BTreeMap<String, AttributeType>,
    key_attributes: &[String],
) -> Result<(), SchemaError> {
    let mut seen = BTreeSet::new();
    for attribute in &def.projected_attributes {
        let index = index.to_owned();
        let attribute = attribute.clone();
        if !attribute_type_map.contains_key(&attribute) {
            return Err(SchemaError::UndeclaredProjectedAttribute { index, attribute });
        }
        if key_attributes.contains(&attribute) || attribute == def.range_key {
            return Err(SchemaError::KeyProjectedAttribute { index, attribute });
        }
        if !seen.insert(attribute.clone()) {
            return Err(SchemaError::DuplicateProjectedAttribute { index, attribute });
        }
    }
    Ok(())
}

impl TableSchema {
    /// Build a schema, checking the key and index invariants.
    pub fn new(
        table_name: impl Into<String>,
        attribute_type_map: BTreeMap<String, AttributeType>,
        key_attributes: Vec<String>,
        index_def_map: BTreeMap<String, IndexDefinition>,
    ) -> Result<Self, SchemaError> {
        let table = table_name.into();
        if table.is_empty() {
            return Err(SchemaError::EmptyTableName);
        }

        match key_attributes.as_slice() {
            [] => return Err(SchemaError::MissingHashKey { table }),
            [hash, range] if hash == range => {
                return Err(SchemaError::DuplicateKeyAttribute {
                    table,
                    attribute: hash.clone(),
                });
            }
            [_] | [_, _] => {}
            more => {
                return Err(SchemaError::TooManyKeyAttributes {
                    count: more.len(),
                    table,
                });
            }
        }

        for attribute in &key_attributes {
            match attribute_type_map.get(attribute) {
                None => {
                    return Err(SchemaError::UndeclaredKeyAttribute {
                        table,
                        attribute: attribute.clone(),
                    });
                }
                Some(ty) if !ty.is_scalar() => {
                    return Err(SchemaError::NonScalarKeyAttribute {
                        table,
                        attribute: attribute.clone(),
                        attribute_type: *ty,
                    });
                }
                Some(_) => {}
            }
        }

        let hash_key = &key_attributes[0];
        for (index, def) in &index_def_map {
            let attribute = def.range_key.clone();
            match attribute_type_map.get(&attribute) {
                None => {
                    return Err(SchemaError::UndeclaredIndexKey {
                        index: index.clone(),
                        attribute,
                    });
                }
                Some(ty) if !ty.is_scalar() => {
                    return Err(SchemaError::NonScalarIndexKey {
                        index: index.clone(),
                        attribute,
                        attribute_type: *ty,
                    });
                }
                Some(_) if &attribute == hash_key => {
                    return Err(SchemaError::IndexKeyIsHashKey {
                        index: index.clone(),
                        attribute,
                    });
                }
                Some(_) => {}
            }
            check_projection(index, def, &attribute_type_map, &key_attributes)?;
        }

        Ok(Self {
            table_name: table,
            attribute_type_map,
            key_attributes,
            index_def_map,
        })
    }

    /// Table name.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Declared attributes and their types, ascending by name.
    #[must_use]
    pub fn attribute_type_map(&self) -> &BTreeMap<String, AttributeType> {
        &self.attribute_type_map
    }

    /// Primary key attributes: hash key first, then the optional range key.
    #[must_use]
    pub fn key_attributes(&self) -> &[String] {
        &self.key_attributes
    }

    /// The partition (hash) key attribute.
    #[must_use]
    pub fn hash_key(&self) -> &str {
        &self.key_attributes[0]
    }

    /// The sort (range) key attribute, if any.
    #[must_use]
    pub fn range_key(&self) -> Option<&str> {
        self.key_attributes.get(1).map(String::as_str)
    }

    /// Local secondary indexes, ascending by index name.
    #[must_use]
    pub fn index_def_map(&self) -> &BTreeMap<String, IndexDefinition> {
        &self.index_def_map
    }
}
