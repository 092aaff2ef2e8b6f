//! Error types for schema loading

use thiserror::Error;

/// Errors that can occur while loading a schema model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// JSON parsing or shape error
    #[error("JSON parsing error: {0}")]
    Json(String),

    /// YAML parsing or shape error
    #[error("YAML parsing error: {0}")]
    Yaml(String),

    /// Root is not a mapping of databases
    #[error("Invalid schema structure: {0}")]
    InvalidStructure(String),
}

impl From<serde_json::Error> for SchemaError {
    fn from(e: serde_json::Error) -> Self {
        SchemaError::Json(e.to_string())
    }
}

impl From<serde_yaml::Error> for SchemaError {
    fn from(e: serde_yaml::Error) -> Self {
        SchemaError::Yaml(e.to_string())
    }
}
