//! Schema category: count filtering and flattening
//!
//! Flattening walks every collection of a [`FullSchema`] and emits one row per
//! field at any depth. Path prefixes record how a field was reached: `.` after a
//! sub-document name, `:` after the name of an array holding documents.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use super::ExportError;
use super::category::CategoryStrategy;
use super::columns::{Column, ColumnSpec, ColumnValue};
use super::table::{FlatRow, Table};
use crate::config::DEFAULT_MAX_DEPTH;
use crate::schema::{FieldSchema, FullSchema, ObjectSchema, TypesCount};
use crate::types::{ARRAY, OBJECT};

/// Keys holding statistics rather than structure
pub const COUNT_KEYS: &[&str] = &["count", "types_count", "prop_in_object", "array_types_count"];

static NON_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.:]").unwrap());

/// Strategy for the `schema` category
#[derive(Debug, Clone)]
pub struct SchemaStrategy {
    max_depth: usize,
}

impl SchemaStrategy {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Strategy refusing schemas nested deeper than `max_depth` levels
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }

    /// Flatten every collection, databases and collections in name order
    pub fn flatten(
        &self,
        schema: &FullSchema,
        columns: &[Column],
    ) -> Result<Vec<FlatRow>, ExportError> {
        let mut rows = Vec::new();
        for (database, collection, collection_schema) in schema.sorted_collections() {
            let values = self.flatten_object(&collection_schema.object, columns, "", 0)?;
            debug!(database, collection, rows = values.len(), "Flattened collection");
            rows.extend(values.into_iter().map(|values| FlatRow {
                database: database.to_string(),
                collection: collection.to_string(),
                values,
            }));
        }
        Ok(rows)
    }

    /// Rows for the fields of one object and everything nested below them
    ///
    /// Siblings are ordered by descending count, then by name.
    pub fn flatten_object(
        &self,
        object: &ObjectSchema,
        columns: &[Column],
        prefix: &str,
        level: usize,
    ) -> Result<Vec<Vec<ColumnValue>>, ExportError> {
        if level > self.max_depth {
            return Err(ExportError::MaxDepthExceeded {
                field: prefix.to_string(),
                depth: level,
                max: self.max_depth,
            });
        }

        let mut fields = Vec::with_capacity(object.len());
        for (name, field) in object {
            let count = field
                .count
                .ok_or_else(|| ExportError::malformed(format!("{}{}", prefix, name), "count"))?;
            fields.push((name.as_str(), field, count));
        }
        fields.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(b.0)));

        let mut rows = Vec::new();
        for (name, field, _) in fields {
            rows.push(field_columns(name, field, prefix, columns)?);

            let full_name = format!("{}{}", prefix, name);
            let Some(separator) = nesting_separator(field, &full_name)? else {
                continue;
            };
            let nested = field
                .object
                .as_ref()
                .ok_or_else(|| ExportError::malformed(full_name.as_str(), "object"))?;
            let nested_prefix = format!("{}{}{}", prefix, name, separator);
            rows.extend(self.flatten_object(nested, columns, &nested_prefix, level + 1)?);
        }

        Ok(rows)
    }
}

impl Default for SchemaStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryStrategy for SchemaStrategy {
    fn category(&self) -> &'static str {
        "schema"
    }

    fn filter(&self, data: &Value) -> Value {
        filter_counts(data)
    }

    fn to_table(&self, data: &Value, columns: &[ColumnSpec]) -> Result<Table, ExportError> {
        let schema = FullSchema::from_value(data)?;
        let computed: Vec<Column> = columns.iter().map(|c| c.column.clone()).collect();
        let labels: Vec<String> = columns.iter().map(|c| c.label.clone()).collect();
        let rows = self.flatten(&schema, &computed)?;
        Ok(Table::from_flat_rows(&labels, rows))
    }
}

/// Separator leading into the children of `field`, if flattening descends
///
/// An array of documents wins over a plain sub-document. The observed type
/// counts decide, so they must be present.
fn nesting_separator(field: &FieldSchema, full_name: &str) -> Result<Option<char>, ExportError> {
    let types = field
        .types_count
        .as_ref()
        .ok_or_else(|| ExportError::malformed(full_name, "types_count"))?;
    if types.contains_key(ARRAY) {
        let array_types = field
            .array_types_count
            .as_ref()
            .ok_or_else(|| ExportError::malformed(full_name, "array_types_count"))?;
        if array_types.contains_key(OBJECT) {
            return Ok(Some(':'));
        }
    }
    Ok(types.contains_key(OBJECT).then_some('.'))
}

/// Flatten `schema` with the default depth limit
pub fn flatten(schema: &FullSchema, columns: &[Column]) -> Result<Vec<FlatRow>, ExportError> {
    SchemaStrategy::new().flatten(schema, columns)
}

/// Copy of `data` without count statistics at any level
pub fn filter_counts(data: &Value) -> Value {
    match data {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(key, _)| !COUNT_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), filter_counts(value)))
                .collect::<Map<String, Value>>(),
        ),
        other => other.clone(),
    }
}

fn field_columns(
    name: &str,
    field: &FieldSchema,
    prefix: &str,
    columns: &[Column],
) -> Result<Vec<ColumnValue>, ExportError> {
    let full_name = || format!("{}{}", prefix, name);

    let mut values = Vec::with_capacity(columns.len());
    for column in columns {
        let value = match column {
            Column::FieldFullName => ColumnValue::Text(full_name()),
            Column::FieldCompactName => ColumnValue::Text(compact_name(name, prefix)),
            Column::FieldName => ColumnValue::Text(name.to_string()),
            Column::Depth => ColumnValue::Integer(depth(prefix) as u64),
            Column::Type => {
                let type_str = field_type(field).ok_or_else(|| {
                    let key = if field.field_type.is_none() { "type" } else { "array_type" };
                    ExportError::malformed(full_name(), key)
                })?;
                ColumnValue::Text(type_str)
            }
            Column::Percentage => {
                let prop = field
                    .prop_in_object
                    .ok_or_else(|| ExportError::malformed(full_name(), "prop_in_object"))?;
                ColumnValue::Float(100.0 * prop)
            }
            Column::TypesCount => {
                let types_count = field
                    .types_count
                    .as_ref()
                    .ok_or_else(|| ExportError::malformed(full_name(), "types_count"))?;
                let text = format_types_count(types_count, field.array_types_count.as_ref())
                    .ok_or_else(|| ExportError::malformed(full_name(), "array_types_count"))?;
                ColumnValue::Text(text)
            }
            Column::Attribute(key) => field
                .attribute(key)
                .map(ColumnValue::from_json)
                .unwrap_or(ColumnValue::Missing),
        };
        values.push(value);
    }
    Ok(values)
}

fn separators(prefix: &str) -> String {
    NON_SEPARATOR.replace_all(prefix, "").into_owned()
}

/// Field name preceded only by the separators of its prefix
///
/// `compact_name("baz", "foo.bar:") == " .  : baz"`
pub fn compact_name(name: &str, prefix: &str) -> String {
    let mut compact = String::new();
    for separator in separators(prefix).chars() {
        compact.push(' ');
        compact.push(separator);
        compact.push(' ');
    }
    compact.push_str(name);
    compact
}

/// Nesting level of a field: separators in its prefix
pub fn depth(prefix: &str) -> usize {
    separators(prefix).chars().count()
}

/// Declared type, `ARRAY(<element type>)` for arrays
fn field_type(field: &FieldSchema) -> Option<String> {
    let declared = field.field_type.as_deref()?;
    if declared == ARRAY {
        let element = field.array_type.as_deref()?;
        return Some(format!("ARRAY({})", element));
    }
    Some(declared.to_string())
}

/// Readable `type : count` listing, most frequent first
///
/// An `ARRAY` entry lists its element types in parentheses. Returns `None`
/// when `ARRAY` is counted but no element counts are given.
pub fn format_types_count(
    types_count: &TypesCount,
    array_types_count: Option<&TypesCount>,
) -> Option<String> {
    let mut sorted: Vec<(&String, &u64)> = types_count.iter().collect();
    // Stable: equal counts keep their input order
    sorted.sort_by(|a, b| b.1.cmp(a.1));

    let mut parts = Vec::with_capacity(sorted.len());
    for (type_name, count) in sorted {
        if type_name == ARRAY {
            let element_types = format_types_count(array_types_count?, None)?;
            parts.push(format!("ARRAY({}) : {}", element_types, count));
        } else {
            parts.push(format!("{} : {}", type_name, count));
        }
    }
    Some(parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn types(pairs: &[(&str, u64)]) -> TypesCount {
        pairs.iter().map(|(t, c)| (t.to_string(), *c)).collect()
    }

    fn scalar(count: u64, type_name: &str) -> FieldSchema {
        FieldSchema::new(count).with_types(type_name, &[(type_name, count)])
    }

    #[test]
    fn test_compact_name() {
        assert_eq!(compact_name("baz", "foo.bar:"), " .  : baz");
        assert_eq!(compact_name("baz", ""), "baz");
    }

    #[test]
    fn test_depth() {
        assert_eq!(depth(""), 0);
        assert_eq!(depth("foo."), 1);
        assert_eq!(depth("foo.bar:"), 2);
    }

    #[test]
    fn test_format_types_count() {
        assert_eq!(
            format_types_count(&types(&[("integer", 10), ("boolean", 5), ("null", 3)]), None)
                .unwrap(),
            "integer : 10, boolean : 5, null : 3"
        );
        assert_eq!(
            format_types_count(
                &types(&[("ARRAY", 10), ("null", 3)]),
                Some(&types(&[("float", 4)]))
            )
            .unwrap(),
            "ARRAY(float : 4) : 10, null : 3"
        );
    }

    #[test]
    fn test_format_types_count_sorting() {
        assert_eq!(
            format_types_count(&types(&[("null", 3), ("string", 7), ("date", 3)]), None).unwrap(),
            "string : 7, null : 3, date : 3"
        );
        assert_eq!(format_types_count(&types(&[("ARRAY", 1)]), None), None);
    }

    #[test]
    fn test_filter_counts() {
        let data = json!({
            "db": {"coll": {"count": 3, "object": {
                "a": {"count": 3, "type": "OBJECT", "types_count": {"OBJECT": 3},
                      "prop_in_object": 1.0, "object": {
                          "b": {"count": 1, "type": "integer", "array_types_count": {}}
                      }},
                "tags": [ {"count": 1} ]
            }}}
        });
        let filtered = filter_counts(&data);
        assert_eq!(
            filtered,
            json!({
                "db": {"coll": {"object": {
                    "a": {"type": "OBJECT", "object": {"b": {"type": "integer"}}},
                    "tags": [ {"count": 1} ]
                }}}
            })
        );
        assert_eq!(filter_counts(&filtered), filtered);
        assert_eq!(filter_counts(&json!("leaf")), json!("leaf"));
    }

    #[test]
    fn test_sibling_order() {
        let mut object = ObjectSchema::new();
        object.insert("b".to_string(), scalar(5, "string"));
        object.insert("c".to_string(), scalar(9, "string"));
        object.insert("a".to_string(), scalar(5, "string"));

        let rows = SchemaStrategy::new()
            .flatten_object(&object, &[Column::FieldName], "", 0)
            .unwrap();
        let names: Vec<_> = rows.iter().map(|r| r[0].to_string()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_array_of_objects_takes_precedence() {
        let mut inner = ObjectSchema::new();
        inner.insert("x".to_string(), scalar(2, "integer"));
        let mut object = ObjectSchema::new();
        object.insert(
            "items".to_string(),
            FieldSchema::new(3)
                .with_types("mixed_scalar_object", &[("ARRAY", 2), ("OBJECT", 1)])
                .with_array_types("OBJECT", &[("OBJECT", 4)])
                .with_object(inner),
        );

        let rows = SchemaStrategy::new()
            .flatten_object(&object, &[Column::FieldFullName, Column::Depth], "", 0)
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], ColumnValue::from("items:x"));
        assert_eq!(rows[1][1], ColumnValue::Integer(1));
    }

    #[test]
    fn test_column_values() {
        let mut object = ObjectSchema::new();
        object.insert(
            "scores".to_string(),
            FieldSchema::new(4)
                .with_prop_in_object(0.5)
                .with_types("ARRAY", &[("ARRAY", 3), ("null", 1)])
                .with_array_types("float", &[("float", 6)])
                .with_attribute("description", json!("Match scores")),
        );
        let columns = [
            Column::Type,
            Column::Percentage,
            Column::TypesCount,
            Column::parse("Description"),
            Column::parse("count"),
            Column::parse("missing_attr"),
        ];
        let rows = SchemaStrategy::new()
            .flatten_object(&object, &columns, "", 0)
            .unwrap();
        assert_eq!(
            rows[0],
            vec![
                ColumnValue::from("ARRAY(float)"),
                ColumnValue::Float(50.0),
                ColumnValue::from("ARRAY(float : 6) : 3, null : 1"),
                ColumnValue::from("Match scores"),
                ColumnValue::Integer(4),
                ColumnValue::Missing,
            ]
        );
    }

    #[test]
    fn test_missing_count_is_reported() {
        let mut object = ObjectSchema::new();
        object.insert("a".to_string(), FieldSchema::default());
        let err = SchemaStrategy::new()
            .flatten_object(&object, &[Column::FieldName], "parent.", 0)
            .unwrap_err();
        assert!(matches!(
            err,
            ExportError::MalformedField { ref field, ref key } if field == "parent.a" && key == "count"
        ));
    }

    #[test]
    fn test_missing_types_count_is_reported() {
        let mut inner = ObjectSchema::new();
        inner.insert("x".to_string(), scalar(1, "integer"));
        let mut object = ObjectSchema::new();
        object.insert(
            "meta".to_string(),
            FieldSchema {
                field_type: Some("OBJECT".to_string()),
                ..FieldSchema::new(1)
            }
            .with_object(inner),
        );
        let err = SchemaStrategy::new()
            .flatten_object(&object, &[Column::FieldName], "", 0)
            .unwrap_err();
        assert!(matches!(
            err,
            ExportError::MalformedField { ref field, ref key } if field == "meta" && key == "types_count"
        ));
    }

    #[test]
    fn test_missing_array_types_count_is_reported() {
        let mut inner = ObjectSchema::new();
        inner.insert("x".to_string(), scalar(1, "integer"));
        let mut object = ObjectSchema::new();
        object.insert(
            "items".to_string(),
            FieldSchema::new(2)
                .with_types("mixed_scalar_object", &[("ARRAY", 1), ("OBJECT", 1)])
                .with_object(inner),
        );
        let err = SchemaStrategy::new()
            .flatten_object(&object, &[Column::FieldFullName], "doc:", 0)
            .unwrap_err();
        assert!(matches!(
            err,
            ExportError::MalformedField { ref field, ref key }
                if field == "doc:items" && key == "array_types_count"
        ));
    }

    #[test]
    fn test_zero_max_depth_is_clamped() {
        let mut inner = ObjectSchema::new();
        inner.insert("x".to_string(), scalar(1, "integer"));
        let mut object = ObjectSchema::new();
        object.insert(
            "meta".to_string(),
            FieldSchema::new(1)
                .with_types("OBJECT", &[("OBJECT", 1)])
                .with_object(inner),
        );
        let rows = SchemaStrategy::with_max_depth(0)
            .flatten_object(&object, &[Column::FieldFullName], "", 0)
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_missing_type_is_reported() {
        let mut object = ObjectSchema::new();
        object.insert("a".to_string(), FieldSchema::new(1));
        let err = SchemaStrategy::new()
            .flatten_object(&object, &[Column::Type], "", 0)
            .unwrap_err();
        assert!(matches!(err, ExportError::MalformedField { ref key, .. } if key == "type"));
    }

    #[test]
    fn test_depth_limit() {
        let mut level2 = ObjectSchema::new();
        level2.insert("c".to_string(), scalar(1, "integer"));
        let mut level1 = ObjectSchema::new();
        level1.insert(
            "b".to_string(),
            FieldSchema::new(1)
                .with_types("OBJECT", &[("OBJECT", 1)])
                .with_object(level2),
        );
        let mut root = ObjectSchema::new();
        root.insert(
            "a".to_string(),
            FieldSchema::new(1)
                .with_types("OBJECT", &[("OBJECT", 1)])
                .with_object(level1),
        );

        assert_eq!(
            SchemaStrategy::with_max_depth(2)
                .flatten_object(&root, &[Column::FieldName], "", 0)
                .unwrap()
                .len(),
            3
        );
        let err = SchemaStrategy::with_max_depth(1)
            .flatten_object(&root, &[Column::FieldName], "", 0)
            .unwrap_err();
        assert!(matches!(
            err,
            ExportError::MaxDepthExceeded { depth: 2, max: 1, ref field } if field == "a.b."
        ));
    }
}
