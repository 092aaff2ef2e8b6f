//! Export entry point
//!
//! Every requested format is rendered in memory before anything is written, so
//! a failing export leaves no partial file behind.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use super::category::CategoryRegistry;
use super::columns::ColumnSpec;
use super::format::{FormatInput, FormatKind, FormatRegistry};
use super::{ExportError, ExportResult};
use crate::config::ExportConfig;

/// Render `data` in every format named by `config`
///
/// Fails before rendering anything if a format or the category is unknown.
pub fn render_output(
    data: &Value,
    config: &ExportConfig,
    categories: &CategoryRegistry,
    formats: &FormatRegistry,
) -> Result<Vec<ExportResult>, ExportError> {
    let writers = formats.resolve_all(&config.formats)?;
    let strategy = categories.resolve(&config.category, config)?;

    let mut results = Vec::with_capacity(writers.len());
    for writer in writers {
        let content = match writer.kind() {
            FormatKind::Hierarchical => {
                if config.without_counts {
                    let filtered = strategy.filter(data);
                    writer.render(FormatInput::Document(&filtered))?
                } else {
                    writer.render(FormatInput::Document(data))?
                }
            }
            FormatKind::Tabular => {
                let columns = match &config.columns {
                    Some(columns) => ColumnSpec::parse_list(columns),
                    None => ColumnSpec::from_labels(writer.default_columns()),
                };
                let table = strategy.to_table(data, &columns)?;
                writer.render(FormatInput::Table(&table))?
            }
        };
        debug!(
            format = writer.format(),
            category = strategy.category(),
            bytes = content.len(),
            "Rendered output"
        );
        results.push(ExportResult {
            content,
            format: writer.format().to_string(),
        });
    }

    Ok(results)
}

/// Export with the built-in categories and formats, to `config.output` or stdout
///
/// Returns the paths written (empty when writing to stdout).
pub fn write_output(data: &Value, config: &ExportConfig) -> Result<Vec<PathBuf>, ExportError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_output_to(data, config, &mut handle)
}

/// Like [`write_output`], with `stdout` standing in for standard output
///
/// Files are written next to their final path and renamed into place once all
/// of them are on disk. A rename failing part way can still leave the earlier
/// formats in place.
pub fn write_output_to<W: Write>(
    data: &Value,
    config: &ExportConfig,
    stdout: &mut W,
) -> Result<Vec<PathBuf>, ExportError> {
    let results = render_output(
        data,
        config,
        &CategoryRegistry::with_defaults(),
        &FormatRegistry::with_defaults(),
    )?;

    let Some(output) = &config.output else {
        for result in &results {
            stdout.write_all(result.content.as_bytes())?;
        }
        stdout.flush()?;
        return Ok(Vec::new());
    };

    // Nothing reaches a final path until every staged write succeeded
    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(results.len());
    for result in &results {
        let path = output_path(output, &result.format);
        let partial = staging_path(&path);
        if let Err(e) = std::fs::write(&partial, result.content.as_bytes()) {
            let _ = std::fs::remove_file(&partial);
            discard(&staged);
            return Err(ExportError::IoError(format!(
                "Failed to write {}: {}",
                path.display(),
                e
            )));
        }
        staged.push((partial, path));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (index, (partial, path)) in staged.iter().enumerate() {
        if let Err(e) = std::fs::rename(partial, path) {
            discard(&staged[index..]);
            return Err(ExportError::IoError(format!(
                "Failed to write {}: {}",
                path.display(),
                e
            )));
        }
        info!(path = %path.display(), "Wrote output");
        written.push(path.clone());
    }

    Ok(written)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut staging = OsString::from(path.as_os_str());
    staging.push(".partial");
    PathBuf::from(staging)
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (partial, _) in staged {
        if let Err(e) = std::fs::remove_file(partial) {
            debug!(path = %partial.display(), error = %e, "Could not remove staged output");
        }
    }
}

/// `output` with `.<format>` appended unless it already ends with it
pub fn output_path(output: &Path, format: &str) -> PathBuf {
    let extension = format!(".{}", format);
    if output.to_string_lossy().ends_with(&extension) {
        return output.to_path_buf();
    }
    let mut path = OsString::from(output.as_os_str());
    path.push(extension);
    PathBuf::from(path)
}
