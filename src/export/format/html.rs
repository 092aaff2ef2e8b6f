//! HTML writer

use super::{FormatInput, FormatKind, OutputFormat, unexpected_input};
use crate::export::ExportError;
use crate::export::columns::DICTIONARY_COLUMNS;

/// Standalone data-dictionary page, one table per collection
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormat;

impl OutputFormat for HtmlFormat {
    fn format(&self) -> &'static str {
        "html"
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

        let mut html = String::from(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>Data dictionary</title>\n</head>\n<body>\n",
        );

        for (database, collections) in table.grouped() {
            html.push_str(&format!("<h2>Database: {}</h2>\n", escape(database)));
            for (collection, rows) in collections {
                if !collection.is_empty() {
                    html.push_str(&format!("<h3>Collection: {}</h3>\n", escape(collection)));
                }
                html.push_str("<table>\n<thead>\n<tr>");
                for title in table.field_header() {
                    html.push_str(&format!("<th>{}</th>", escape(title)));
                }
                html.push_str("</tr>\n</thead>\n<tbody>\n");
                for row in rows {
                    html.push_str("<tr>");
                    for cell in row {
                        html.push_str(&format!("<td>{}</td>", escape(&cell.render_or(""))));
                    }
                    html.push_str("</tr>\n");
                }
                html.push_str("</tbody>\n</table>\n");
            }
        }

        html.push_str("</body>\n</html>\n");
        Ok(html)
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
