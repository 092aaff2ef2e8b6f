//! CLI commands

pub mod export;

pub use export::{ExportArgs, handle_export, load_input};
