//! Type vocabulary for MongoDB-style schemas
//!
//! Provides:
//! - **Type lattice** - fixed taxonomy answering "which supertype covers these types"
//! - **Type registry** - maps concrete value types to type names, downgrading
//!   anything unmapped to `unknown`
//! - **SQL mapping** - type name to PostgreSQL column type
//!
//! ## Example
//!
//! ```rust
//! use mongo_schema_export::types::TypeLattice;
//!
//! let lattice = TypeLattice::new();
//! assert_eq!(lattice.common_parent_type(&["integer", "float"]).unwrap(), "number");
//! assert_eq!(lattice.common_parent_type::<&str>(&[]).unwrap(), "null");
//! ```

mod lattice;
mod registry;
mod sql;

pub use lattice::TypeLattice;
pub use registry::TypeRegistry;
pub use sql::psql_type;

use thiserror::Error;

/// Array container marker
pub const ARRAY: &str = "ARRAY";
/// Object container marker
pub const OBJECT: &str = "OBJECT";
/// Fallback for "no types observed"
pub const NULL: &str = "null";
/// Name given to unmapped concrete types
pub const UNKNOWN: &str = "unknown";

pub const BOOLEAN: &str = "boolean";
pub const INTEGER: &str = "integer";
pub const BIGINTEGER: &str = "biginteger";
pub const FLOAT: &str = "float";
pub const STRING: &str = "string";
pub const DATE: &str = "date";
pub const TIMESTAMP: &str = "timestamp";
pub const OID: &str = "oid";
pub const DBREF: &str = "dbref";

/// Lattice-internal supertypes
pub const NUMBER: &str = "number";
pub const GENERAL_SCALAR: &str = "general_scalar";
pub const LATTICE_OBJECT: &str = "object";
pub const MIXED_SCALAR_OBJECT: &str = "mixed_scalar_object";

/// Errors raised by type queries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Type name has no node in the lattice
    #[error("Type '{0}' is not part of the type lattice")]
    UnknownType(String),

    /// Type name has no SQL equivalent
    #[error("Type '{0}' has no PostgreSQL mapping")]
    NoSqlMapping(String),
}
