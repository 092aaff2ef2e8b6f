//! Schema model
//!
//! The nested record format produced by schema extraction:
//! database → collection → field tree. This crate only reads it; filtering and
//! flattening never mutate a loaded schema.

mod error;
mod field;

pub use error::SchemaError;
pub use field::{FieldSchema, ObjectSchema, TypesCount};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One collection: its top-level fields under `object`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSchema {
    /// Top-level fields
    pub object: ObjectSchema,
    /// Collection-level statistics and other keys, kept verbatim
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl CollectionSchema {
    /// Create a collection schema from its top-level fields
    pub fn new(object: ObjectSchema) -> Self {
        Self {
            object,
            extra: IndexMap::new(),
        }
    }

    /// Number of fields at every nesting level that flattening visits
    pub fn field_count(&self) -> usize {
        field::count_fields(&self.object)
    }
}

/// Collection name → collection schema
pub type DatabaseSchema = IndexMap<String, CollectionSchema>;

/// Database name → database schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FullSchema {
    pub databases: IndexMap<String, DatabaseSchema>,
}

impl FullSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a schema from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Parse a schema from a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Build a schema from an already-parsed JSON value
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        if !value.is_object() {
            return Err(SchemaError::InvalidStructure(format!(
                "expected an object of databases, found {}",
                json_kind(value)
            )));
        }
        Ok(Self::deserialize(value)?)
    }

    /// Add (or replace) a collection
    pub fn insert_collection(
        &mut self,
        database: impl Into<String>,
        collection: impl Into<String>,
        schema: CollectionSchema,
    ) {
        self.databases
            .entry(database.into())
            .or_default()
            .insert(collection.into(), schema);
    }

    /// Collections in deterministic order: databases by name, then collections by name
    pub fn sorted_collections(&self) -> Vec<(&str, &str, &CollectionSchema)> {
        let mut databases: Vec<_> = self.databases.iter().collect();
        databases.sort_by(|a, b| a.0.cmp(b.0));

        let mut collections = Vec::new();
        for (database, database_schema) in databases {
            let mut sorted: Vec<_> = database_schema.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            for (collection, schema) in sorted {
                collections.push((database.as_str(), collection.as_str(), schema));
            }
        }
        collections
    }

    /// Total number of fields across every collection
    pub fn field_count(&self) -> usize {
        self.databases
            .values()
            .flat_map(|db| db.values())
            .map(CollectionSchema::field_count)
            .sum()
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_keeps_extra_keys() {
        let value = json!({
            "shop": {
                "orders": {
                    "count": 12,
                    "object": {
                        "total": {"count": 12, "type": "float", "types_count": {"float": 12},
                                  "prop_in_object": 1.0, "description": "Order total"}
                    }
                }
            }
        });
        let schema = FullSchema::from_value(&value).unwrap();
        let orders = &schema.databases["shop"]["orders"];
        assert_eq!(orders.extra["count"], json!(12));
        let total = &orders.object["total"];
        assert_eq!(total.count, Some(12));
        assert_eq!(total.field_type.as_deref(), Some("float"));
        assert_eq!(total.extra["description"], json!("Order total"));
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        assert!(matches!(
            FullSchema::from_value(&json!([1, 2])),
            Err(SchemaError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_collection_without_object_fails() {
        let err = FullSchema::from_json_str(r#"{"db": {"coll": {"count": 3}}}"#).unwrap_err();
        assert!(matches!(err, SchemaError::Json(_)));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
db:
  users:
    object:
      name:
        count: 2
        type: string
        types_count:
          string: 2
        prop_in_object: 1.0
"#;
        let schema = FullSchema::from_yaml_str(yaml).unwrap();
        assert_eq!(schema.field_count(), 1);
    }

    #[test]
    fn test_sorted_collections() {
        let mut schema = FullSchema::new();
        schema.insert_collection("zeta", "b", CollectionSchema::new(ObjectSchema::new()));
        schema.insert_collection("alpha", "z", CollectionSchema::new(ObjectSchema::new()));
        schema.insert_collection("alpha", "a", CollectionSchema::new(ObjectSchema::new()));

        let order: Vec<_> = schema
            .sorted_collections()
            .into_iter()
            .map(|(db, coll, _)| format!("{}.{}", db, coll))
            .collect();
        assert_eq!(order, vec!["alpha.a", "alpha.z", "zeta.b"]);
    }
}
