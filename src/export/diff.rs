//! Diff category: schema comparison listings
//!
//! Each change record names a dotted hierarchy (`db.collection.field...`) and
//! the previous/new schema labels at that position.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ExportError;
use super::category::CategoryStrategy;
use super::columns::{ColumnSpec, ColumnValue};
use super::table::Table;
use crate::schema::json_kind;

/// Header of a diff table. Diff tables ignore requested columns.
pub const DIFF_HEADER: &[&str] = &[
    "Database",
    "Collection",
    "Hierarchy",
    "Previous Schema",
    "New Schema",
];

/// One difference between two schemas
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffRecord {
    /// Dotted path of the change; empty for a database-level change
    #[serde(default)]
    pub hierarchy: String,
    #[serde(default)]
    pub prev_schema: Value,
    #[serde(default)]
    pub new_schema: Value,
}

impl DiffRecord {
    pub fn new(hierarchy: &str, prev_schema: Value, new_schema: Value) -> Self {
        Self {
            hierarchy: hierarchy.to_string(),
            prev_schema,
            new_schema,
        }
    }

    /// Row cells: database, collection, remaining hierarchy, previous, new
    pub fn to_row(&self) -> Vec<ColumnValue> {
        let (database, collection, rest) = if self.hierarchy.is_empty() {
            // The change concerns a whole database, named by whichever label is set
            let label = first_present(&self.prev_schema, &self.new_schema);
            (ColumnValue::from_json(label.clone()), String::new(), String::new())
        } else {
            let mut segments = self.hierarchy.split('.');
            let database = segments.next().unwrap_or_default().to_string();
            let collection = segments.next().unwrap_or_default().to_string();
            let rest = segments.collect::<Vec<_>>().join(".");
            (ColumnValue::Text(database), collection, rest)
        };

        vec![
            database,
            ColumnValue::Text(collection),
            ColumnValue::Text(rest),
            ColumnValue::from_json(self.prev_schema.clone()),
            ColumnValue::from_json(self.new_schema.clone()),
        ]
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Number(_) => true,
    }
}

fn first_present<'a>(first: &'a Value, second: &'a Value) -> &'a Value {
    if is_present(first) { first } else { second }
}

/// Strategy for the `diff` category
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffStrategy;

impl DiffStrategy {
    /// Table rows for a list of change records
    pub fn rows(&self, records: &[DiffRecord]) -> Vec<Vec<ColumnValue>> {
        records.iter().map(DiffRecord::to_row).collect()
    }
}

impl CategoryStrategy for DiffStrategy {
    fn category(&self) -> &'static str {
        "diff"
    }

    fn to_table(&self, data: &Value, _columns: &[ColumnSpec]) -> Result<Table, ExportError> {
        if !data.is_array() {
            return Err(ExportError::InvalidData(format!(
                "diff data must be a list of change records, found {}",
                json_kind(data)
            )));
        }
        let records: Vec<DiffRecord> = serde_json::from_value(data.clone())
            .map_err(|e| ExportError::InvalidData(e.to_string()))?;

        Ok(Table {
            header: DIFF_HEADER.iter().map(|h| h.to_string()).collect(),
            rows: self.rows(&records),
        })
    }
}
