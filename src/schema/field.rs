//! Per-field schema

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{ARRAY, OBJECT};

/// Type name → occurrence count, in observation order
pub type TypesCount = IndexMap<String, u64>;

/// Field name → field schema, in observation order
pub type ObjectSchema = IndexMap<String, FieldSchema>;

/// Statistics and nested structure of one field
///
/// Statistic keys are optional at load time; consumers that need one report its
/// absence themselves. A single `object` key holds the nested fields, whether
/// they come from plain sub-documents or from documents inside arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Number of documents the field was observed in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,

    /// Fraction (0.0 - 1.0) of parent objects containing the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prop_in_object: Option<f64>,

    /// Common type of every observed value
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types_count: Option<TypesCount>,

    /// Common type of array elements (only for `ARRAY` fields)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_types_count: Option<TypesCount>,

    /// Nested fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<ObjectSchema>,

    /// Any other attribute (description, ...), kept verbatim
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl FieldSchema {
    /// Create a field observed `count` times in every parent object
    pub fn new(count: u64) -> Self {
        Self {
            count: Some(count),
            prop_in_object: Some(1.0),
            ..Self::default()
        }
    }

    /// Set the common type and its occurrence counts
    pub fn with_types(mut self, field_type: &str, types_count: &[(&str, u64)]) -> Self {
        self.field_type = Some(field_type.to_string());
        self.types_count = Some(to_types_count(types_count));
        self
    }

    /// Set the array element type and its occurrence counts
    pub fn with_array_types(mut self, array_type: &str, types_count: &[(&str, u64)]) -> Self {
        self.array_type = Some(array_type.to_string());
        self.array_types_count = Some(to_types_count(types_count));
        self
    }

    /// Set the nested fields
    pub fn with_object(mut self, object: ObjectSchema) -> Self {
        self.object = Some(object);
        self
    }

    /// Set the fraction of parent objects containing the field
    pub fn with_prop_in_object(mut self, prop: f64) -> Self {
        self.prop_in_object = Some(prop);
        self
    }

    /// Add an arbitrary attribute
    pub fn with_attribute(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }

    /// Whether `type_name` is among the observed value types
    pub fn has_type(&self, type_name: &str) -> bool {
        self.types_count
            .as_ref()
            .is_some_and(|tc| tc.contains_key(type_name))
    }

    /// Whether `type_name` is among the observed array element types
    pub fn has_array_type(&self, type_name: &str) -> bool {
        self.array_types_count
            .as_ref()
            .is_some_and(|tc| tc.contains_key(type_name))
    }

    /// Whether flattening descends into array elements for this field
    pub fn holds_array_of_objects(&self) -> bool {
        self.has_type(ARRAY) && self.has_array_type(OBJECT)
    }

    /// Whether flattening descends into a plain sub-document for this field
    pub fn holds_object(&self) -> bool {
        !self.holds_array_of_objects() && self.has_type(OBJECT)
    }

    /// Raw attribute by key, known or extra
    pub fn attribute(&self, key: &str) -> Option<Value> {
        match key {
            "count" => self.count.map(Value::from),
            "prop_in_object" => self.prop_in_object.map(Value::from),
            "type" => self.field_type.clone().map(Value::from),
            "array_type" => self.array_type.clone().map(Value::from),
            "types_count" => self.types_count.as_ref().map(types_count_value),
            "array_types_count" => self.array_types_count.as_ref().map(types_count_value),
            "object" => self
                .object
                .as_ref()
                .and_then(|o| serde_json::to_value(o).ok()),
            other => self.extra.get(other).cloned(),
        }
    }
}

fn to_types_count(pairs: &[(&str, u64)]) -> TypesCount {
    pairs.iter().map(|(t, c)| (t.to_string(), *c)).collect()
}

fn types_count_value(types_count: &TypesCount) -> Value {
    Value::Object(
        types_count
            .iter()
            .map(|(t, c)| (t.clone(), Value::from(*c)))
            .collect(),
    )
}

/// Fields visited by flattening, at every depth
pub(crate) fn count_fields(object: &ObjectSchema) -> usize {
    object
        .values()
        .map(|field| {
            let nested = match &field.object {
                Some(sub) if field.holds_array_of_objects() || field.holds_object() => {
                    count_fields(sub)
                }
                _ => 0,
            };
            1 + nested
        })
        .sum()
}
