//! Output formats
//!
//! Hierarchical formats (`json`, `yaml`) render the schema document itself;
//! tabular formats (`tsv`, `md`, `html`) render the table built by the data
//! category. Writers are looked up by identifier in a [`FormatRegistry`].

mod html;
mod json;
mod markdown;
mod tsv;
mod yaml;

pub use html::HtmlFormat;
pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
pub use tsv::TsvFormat;
pub use yaml::YamlFormat;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use super::ExportError;
use super::columns::DEFAULT_COLUMNS;
use super::table::Table;

/// What a format renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// The (optionally count-filtered) nested document
    Hierarchical,
    /// A table of flattened rows
    Tabular,
}

/// Input handed to a writer
#[derive(Debug, Clone, Copy)]
pub enum FormatInput<'a> {
    Document(&'a Value),
    Table(&'a Table),
}

/// A writer for one output format
pub trait OutputFormat: Send + Sync {
    /// Identifier, also used as file extension
    fn format(&self) -> &'static str;

    fn kind(&self) -> FormatKind;

    /// Columns used when the caller requests none
    fn default_columns(&self) -> &'static [&'static str] {
        DEFAULT_COLUMNS
    }

    /// Render the whole output in memory
    fn render(&self, input: FormatInput<'_>) -> Result<String, ExportError>;
}

/// Error for a writer handed the wrong kind of input
pub(crate) fn unexpected_input(format: &str, expected: FormatKind) -> ExportError {
    ExportError::InvalidData(format!(
        "format '{}' renders {} data",
        format,
        match expected {
            FormatKind::Hierarchical => "hierarchical",
            FormatKind::Tabular => "tabular",
        }
    ))
}

/// Format identifier → writer
#[derive(Clone)]
pub struct FormatRegistry {
    formats: BTreeMap<String, Arc<dyn OutputFormat>>,
}

impl FormatRegistry {
    /// Registry without any format
    pub fn empty() -> Self {
        Self {
            formats: BTreeMap::new(),
        }
    }

    /// Registry with every built-in format
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(JsonFormat));
        registry.register(Arc::new(YamlFormat));
        registry.register(Arc::new(TsvFormat));
        registry.register(Arc::new(MarkdownFormat));
        registry.register(Arc::new(HtmlFormat));
        registry
    }

    /// Add or replace the writer for its identifier
    pub fn register(&mut self, format: Arc<dyn OutputFormat>) {
        self.formats.insert(format.format().to_string(), format);
    }

    /// Known identifiers, sorted
    pub fn identifiers(&self) -> Vec<String> {
        self.formats.keys().cloned().collect()
    }

    /// Writer for `format`
    pub fn resolve(&self, format: &str) -> Result<Arc<dyn OutputFormat>, ExportError> {
        self.formats
            .get(format)
            .cloned()
            .ok_or_else(|| ExportError::UnknownFormat {
                unknown: vec![format.to_string()],
                supported: self.identifiers(),
            })
    }

    /// Resolve every identifier, failing on all unknown ones at once
    pub fn resolve_all<S: AsRef<str>>(
        &self,
        formats: &[S],
    ) -> Result<Vec<Arc<dyn OutputFormat>>, ExportError> {
        let mut unknown = Vec::new();
        for format in formats {
            let name: &str = format.as_ref();
            if !self.formats.contains_key(name) {
                unknown.push(name.to_string());
            }
        }
        if !unknown.is_empty() {
            return Err(ExportError::UnknownFormat {
                unknown,
                supported: self.identifiers(),
            });
        }
        formats.iter().map(|f| self.resolve(f.as_ref())).collect()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("formats", &self.identifiers())
            .finish()
    }
}
