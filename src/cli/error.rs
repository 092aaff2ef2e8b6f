//! CLI error type

use std::path::PathBuf;

use thiserror::Error;

use crate::export::ExportError;

/// Errors reported by the command line tool
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read {0}: {1}")]
    FileReadError(PathBuf, String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to parse input: {0}")]
    ParseError(String),

    #[error("Export failed: {0}")]
    ExportError(#[from] ExportError),
}
