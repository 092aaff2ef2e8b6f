//! Export command implementation

use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::cli::error::CliError;
use crate::cli::output::format_summary;
use crate::config::ExportConfig;
use crate::export::write_output;

/// Arguments for the export command
#[derive(Debug, Clone)]
pub struct ExportArgs {
    /// Input file, or `-` for stdin
    pub input: String,
    pub config: ExportConfig,
}

/// Load input content from file or stdin
fn read_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        let path = PathBuf::from(input);
        std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
    }
}

fn is_yaml(input: &str) -> bool {
    matches!(
        Path::new(input).extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

/// Parse the input document; YAML by file extension, JSON otherwise
pub fn load_input(input: &str) -> Result<Value, CliError> {
    let content = read_input(input)?;
    if is_yaml(input) {
        serde_yaml::from_str(&content).map_err(|e| CliError::ParseError(e.to_string()))
    } else {
        serde_json::from_str(&content).map_err(|e| CliError::ParseError(e.to_string()))
    }
}

/// Handle the export command
pub fn handle_export(args: &ExportArgs) -> Result<(), CliError> {
    if args.config.formats.is_empty() {
        return Err(CliError::InvalidArgument(
            "At least one output format is required".to_string(),
        ));
    }

    let data = load_input(&args.input)?;
    debug!(input = %args.input, category = %args.config.category, "Loaded input");

    let written = write_output(&data, &args.config)?;
    if !written.is_empty() {
        eprintln!("{}", format_summary(&written));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_yaml_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "db:\n  users:\n    object: {{}}").unwrap();
        let value = load_input(file.path().to_str().unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({"db": {"users": {"object": {}}}}));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_input("/nonexistent/schema.json"),
            Err(CliError::FileReadError(..))
        ));
    }

    #[test]
    fn test_no_formats() {
        let args = ExportArgs {
            input: "-".to_string(),
            config: ExportConfig::builder().formats(Vec::<String>::new()).build(),
        };
        assert!(matches!(
            handle_export(&args),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
