//! JSON writer

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::{FormatInput, FormatKind, OutputFormat, unexpected_input};
use crate::export::ExportError;

/// Pretty-printed JSON, four-space indent, non-ASCII kept as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl OutputFormat for JsonFormat {
    fn format(&self) -> &'static str {
        "json"
    }

    fn kind(&self) -> FormatKind {
        FormatKind::Hierarchical
    }

    fn render(&self, input: FormatInput<'_>) -> Result<String, ExportError> {
        let FormatInput::Document(data) = input else {
            return Err(unexpected_input(self.format(), self.kind()));
        };

        let mut buffer = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        data.serialize(&mut serializer)
            .map_err(|e| ExportError::SerializationError(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| ExportError::SerializationError(e.to_string()))
    }
}
