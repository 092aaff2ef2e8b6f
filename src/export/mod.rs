//! Export functionality
//!
//! Turns a schema model (or a diff listing) into output documents:
//! - Category strategies (`schema`, `diff`) that filter or flatten the data
//! - Format writers (`json`, `yaml`, `tsv`, `md`, `html`) picked by identifier
//! - [`write_output`] tying both together for a requested export

pub mod category;
pub mod columns;
pub mod diff;
pub mod format;
pub mod schema;
pub mod table;
pub mod writer;

use crate::schema::SchemaError;

/// Rendered output for one format
#[derive(Debug, Clone, PartialEq)]
pub struct ExportResult {
    /// Rendered document
    pub content: String,
    /// Format identifier (also the file extension)
    pub format: String,
}

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
    #[error("Unsupported output format(s): {}. Supported formats are: {}", .unknown.join(", "), .supported.join(", "))]
    UnknownFormat {
        unknown: Vec<String>,
        supported: Vec<String>,
    },
    #[error("Field '{field}' has no '{key}' entry")]
    MalformedField { field: String, key: String },
    #[error("Maximum nesting depth exceeded at '{field}': {depth} > {max}")]
    MaxDepthExceeded {
        field: String,
        depth: usize,
        max: usize,
    },
    #[error("Invalid input data: {0}")]
    InvalidData(String),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("IO error: {0}")]
    IoError(String),
}

impl ExportError {
    pub(crate) fn malformed(field: impl Into<String>, key: &str) -> Self {
        ExportError::MalformedField {
            field: field.into(),
            key: key.to_string(),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::IoError(e.to_string())
    }
}

// Re-export for convenience
pub use category::{CategoryRegistry, CategoryStrategy};
pub use columns::{Column, ColumnSpec, ColumnValue};
pub use diff::{DiffRecord, DiffStrategy};
pub use format::{FormatRegistry, OutputFormat};
pub use schema::{SchemaStrategy, filter_counts, flatten, format_types_count};
pub use table::{FlatRow, Table};
pub use writer::{render_output, write_output, write_output_to};
