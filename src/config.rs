//! Configuration for an export run

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default limit on schema nesting followed by flattening
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration for an export run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfig {
    /// Output format identifiers (json, yaml, tsv, md, html)
    pub formats: Vec<String>,

    /// Output file path; standard output when absent
    pub output: Option<PathBuf>,

    /// Space-separated columns for tabular formats; each format's default when absent
    pub columns: Option<String>,

    /// Drop count statistics from hierarchical formats
    pub without_counts: bool,

    /// Data category (schema, diff)
    pub category: String,

    /// Maximum nesting depth followed while flattening
    pub max_depth: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            formats: vec!["json".to_string()],
            output: None,
            columns: None,
            without_counts: false,
            category: "schema".to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ExportConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> ExportConfigBuilder {
        ExportConfigBuilder::default()
    }
}

/// Builder for ExportConfig
#[derive(Debug, Default)]
pub struct ExportConfigBuilder {
    config: ExportConfig,
}

impl ExportConfigBuilder {
    /// Replace the output formats
    pub fn formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Write to this path instead of standard output
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = Some(path.into());
        self
    }

    /// Set the columns for tabular formats (space-separated)
    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.config.columns = Some(columns.into());
        self
    }

    pub fn without_counts(mut self, without_counts: bool) -> Self {
        self.config.without_counts = without_counts;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.config.category = category.into();
        self
    }

    /// Set the maximum nesting depth (at least 1)
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth.max(1);
        self
    }

    /// Build the configuration
    pub fn build(self) -> ExportConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExportConfig::default();
        assert_eq!(config.formats, vec!["json"]);
        assert_eq!(config.category, "schema");
        assert!(!config.without_counts);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_builder() {
        let config = ExportConfig::builder()
            .formats(["tsv", "md"])
            .output("/tmp/schema")
            .columns("Field_name Type")
            .category("diff")
            .max_depth(0)
            .build();

        assert_eq!(config.formats, vec!["tsv", "md"]);
        assert_eq!(config.output, Some(PathBuf::from("/tmp/schema")));
        assert_eq!(config.columns.as_deref(), Some("Field_name Type"));
        assert_eq!(config.category, "diff");
        assert_eq!(config.max_depth, 1);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ExportConfig =
            serde_json::from_str(r#"{"formats": ["yaml"], "withoutCounts": true}"#).unwrap();
        assert_eq!(config.formats, vec!["yaml"]);
        assert!(config.without_counts);
        assert_eq!(config.category, "schema");
    }
}
