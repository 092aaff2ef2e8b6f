//! YAML writer

use super::{FormatInput, FormatKind, OutputFormat, unexpected_input};
use crate::export::ExportError;

/// Block-style YAML
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormat;

impl OutputFormat for YamlFormat {
    fn format(&self) -> &'static str {
        "yaml"
    }

    fn kind(&self) -> FormatKind {
        FormatKind::Hierarchical
    }

    fn render(&self, input: FormatInput<'_>) -> Result<String, ExportError> {
        match input {
            FormatInput::Document(data) => serde_yaml::to_string(data)
                .map_err(|e| ExportError::SerializationError(e.to_string())),
            FormatInput::Table(_) => Err(unexpected_input(self.format(), self.kind())),
        }
    }
}
