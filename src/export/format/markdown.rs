//! Markdown writer

use super::{FormatInput, FormatKind, OutputFormat, unexpected_input};
use crate::export::ExportError;
use crate::export::columns::{ColumnValue, DICTIONARY_COLUMNS};
use crate::export::table::Table;

/// Extra padding added to the widest cell of each column
const COLUMN_PADDING: usize = 5;

/// One pipe table per collection, under database and collection headings
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormat;

impl OutputFormat for MarkdownFormat {
    fn format(&self) -> &'static str {
        "md"
    }

    fn kind(&self) -> FormatKind {
        FormatKind::Tabular
    }

    fn default_columns(&self) -> &'static [&'static str] {
        DICTIONARY_COLUMNS
    }

    fn render(&self, input: FormatInput<'_>) -> Result<String, ExportError> {
        let FormatInput::Table(table) = input else {
            return Err(unexpected_input(self.format(), self.kind()));
        };

        let columns = table.field_header();
        let widths = column_widths(table);

        let header_line = make_line(columns.iter().zip(&widths).map(|(c, w)| pad(c, *w)));
        let separator_line = make_line(widths.iter().map(|w| "-".repeat(*w)));

        let mut output = String::new();
        for (database, collections) in table.grouped() {
            output.push_str(&format!("\n### Database: {}\n", database));
            for (collection, rows) in collections {
                if !collection.is_empty() {
                    output.push_str(&format!("#### Collection: {} \n", collection));
                }
                let mut lines = vec![header_line.clone(), separator_line.clone()];
                for row in rows {
                    lines.push(make_line(
                        row.iter().zip(&widths).map(|(cell, w)| pad(&cell.to_string(), *w)),
                    ));
                }
                output.push_str(&lines.join("\n"));
                output.push_str("\n\n");
            }
        }

        Ok(output)
    }
}

fn column_widths(table: &Table) -> Vec<usize> {
    table
        .field_header()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let widest_cell = table
                .rows
                .iter()
                .filter_map(|row| row.get(i + 2))
                .map(|cell: &ColumnValue| cell.to_string().chars().count())
                .max()
                .unwrap_or(0);
            widest_cell.max(name.chars().count()) + COLUMN_PADDING
        })
        .collect()
}

fn pad(value: &str, width: usize) -> String {
    format!("{:<width$}", value, width = width)
}

fn make_line(cells: impl Iterator<Item = String>) -> String {
    format!("|{}|", cells.collect::<Vec<_>>().join("|"))
}
