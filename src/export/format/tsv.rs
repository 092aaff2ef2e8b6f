//! Tab-separated writer

use csv::WriterBuilder;

use super::{FormatInput, FormatKind, OutputFormat, unexpected_input};
use crate::export::ExportError;

/// One header line, then one line per row; absent values are left empty
#[derive(Debug, Clone, Copy, Default)]
pub struct TsvFormat;

impl OutputFormat for TsvFormat {
    fn format(&self) -> &'static str {
        "tsv"
    }

    fn kind(&self) -> FormatKind {
        FormatKind::Tabular
    }

    fn render(&self, input: FormatInput<'_>) -> Result<String, ExportError> {
        let FormatInput::Table(table) = input else {
            return Err(unexpected_input(self.format(), self.kind()));
        };

        let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(Vec::new());
        writer
            .write_record(&table.header)
            .map_err(|e| ExportError::SerializationError(e.to_string()))?;
        for row in &table.rows {
            writer
                .write_record(row.iter().map(|cell| cell.render_or("")))
                .map_err(|e| ExportError::SerializationError(e.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ExportError::SerializationError(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| ExportError::SerializationError(e.to_string()))
    }
}
