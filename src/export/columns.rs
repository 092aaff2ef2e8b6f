//! Column identifiers and cell values for tabular output

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

/// Columns used by tabular formats when none are requested
pub const DEFAULT_COLUMNS: &[&str] = &["Field_full_name", "Depth", "Field_name", "Type"];

/// Columns used by document-like tabular formats (markdown, html)
pub const DICTIONARY_COLUMNS: &[&str] = &[
    "Field_compact_name",
    "Field_name",
    "Full_name",
    "Description",
    "Count",
    "Percentage",
    "Types_count",
];

/// A column computed for each flattened field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Column {
    /// Prefix followed by the field name
    FieldFullName,
    /// Prefix separators followed by the field name
    FieldCompactName,
    FieldName,
    /// Number of separators in the prefix
    Depth,
    /// Declared type, `ARRAY(<element type>)` for arrays
    Type,
    /// `prop_in_object` scaled to 0 - 100
    Percentage,
    /// Readable `type : count` listing
    TypesCount,
    /// Raw field attribute looked up by (lowercased) name
    Attribute(String),
}

impl Column {
    /// Parse a column identifier, ignoring case. Never fails: unrecognised
    /// identifiers become attribute lookups.
    pub fn parse(identifier: &str) -> Self {
        let lowered = identifier.to_lowercase();
        match lowered.as_str() {
            "field_full_name" => Column::FieldFullName,
            "field_compact_name" => Column::FieldCompactName,
            "field_name" => Column::FieldName,
            "depth" => Column::Depth,
            "type" => Column::Type,
            "percentage" => Column::Percentage,
            "types_count" => Column::TypesCount,
            _ => Column::Attribute(lowered),
        }
    }
}

impl FromStr for Column {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Column::parse(s))
    }
}

/// A requested column: the caller's label and what it computes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub label: String,
    pub column: Column,
}

impl ColumnSpec {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            column: Column::parse(label),
        }
    }

    /// Parse a space-separated column list
    pub fn parse_list(columns: &str) -> Vec<ColumnSpec> {
        columns.split_whitespace().map(ColumnSpec::new).collect()
    }

    pub fn from_labels(labels: &[&str]) -> Vec<ColumnSpec> {
        labels.iter().map(|l| ColumnSpec::new(l)).collect()
    }
}

/// One cell of a flattened row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColumnValue {
    Text(String),
    Integer(u64),
    Float(f64),
    /// Attribute value passed through as-is
    Raw(Value),
    /// Requested attribute absent from the field
    Missing,
}

impl ColumnValue {
    /// Cell from a JSON value, unwrapping scalars
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => ColumnValue::Missing,
            Value::String(s) => ColumnValue::Text(s),
            Value::Number(n) => match n.as_u64() {
                Some(u) => ColumnValue::Integer(u),
                None => match n.as_f64() {
                    Some(f) => ColumnValue::Float(f),
                    None => ColumnValue::Raw(Value::Number(n)),
                },
            },
            other => ColumnValue::Raw(other),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, ColumnValue::Missing)
    }

    /// Text form, with `missing` standing in for absent values
    pub fn render_or(&self, missing: &str) -> String {
        match self {
            ColumnValue::Missing => missing.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<&str> for ColumnValue {
    fn from(s: &str) -> Self {
        ColumnValue::Text(s.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(s: String) -> Self {
        ColumnValue::Text(s)
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Text(s) => f.write_str(s),
            ColumnValue::Integer(n) => write!(f, "{}", n),
            // Whole floats keep their decimal point (100.0, not 100)
            ColumnValue::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            ColumnValue::Float(x) => write!(f, "{}", x),
            ColumnValue::Raw(Value::String(s)) => f.write_str(s),
            ColumnValue::Raw(v) => write!(f, "{}", v),
            ColumnValue::Missing => f.write_str("None"),
        }
    }
}
