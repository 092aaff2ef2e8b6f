//! Mongo Schema Export - type lattice and reporting layer for MongoDB-style schemas
//!
//! Provides:
//! - Type lattice queries (common ancestor of observed types)
//! - Concrete type registry with `unknown` fallback
//! - The nested schema model (database → collection → fields)
//! - Category strategies: count filtering and flattening into rows
//! - Format writers (JSON, YAML, TSV, Markdown, HTML)

pub mod config;
pub mod export;
pub mod schema;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use config::{ExportConfig, ExportConfigBuilder};
pub use export::{
    CategoryRegistry, CategoryStrategy, Column, ColumnSpec, ColumnValue, DiffRecord, DiffStrategy,
    ExportError, ExportResult, FlatRow, FormatRegistry, OutputFormat, SchemaStrategy, Table,
    filter_counts, flatten, format_types_count, render_output, write_output, write_output_to,
};
pub use schema::{
    CollectionSchema, DatabaseSchema, FieldSchema, FullSchema, ObjectSchema, SchemaError,
    TypesCount,
};
pub use types::{TypeError, TypeLattice, TypeRegistry, psql_type};
