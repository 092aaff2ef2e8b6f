//! Export pipeline tests

use mongo_schema_export::export::format::{FormatInput, FormatKind};
use mongo_schema_export::{
    CategoryRegistry, ExportConfig, ExportError, FormatRegistry, OutputFormat, render_output,
    write_output_to,
};
use serde_json::{Value, json};
use std::sync::Arc;

fn schema() -> Value {
    json!({
        "shop": {
            "orders": {
                "count": 10,
                "object": {
                    "total": {
                        "count": 10, "prop_in_object": 1.0, "type": "number",
                        "types_count": {"float": 6, "integer": 4},
                        "description": "Order total"
                    },
                    "coupon": {
                        "count": 2, "prop_in_object": 0.2, "type": "string",
                        "types_count": {"string": 2}
                    }
                }
            }
        }
    })
}

mod file_output_tests {
    use super::*;

    #[test]
    fn test_writes_one_file_per_format() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("dictionary");
        let config = ExportConfig::builder()
            .formats(["json", "tsv", "md"])
            .output(&base)
            .build();

        let mut stdout = Vec::new();
        let written = write_output_to(&schema(), &config, &mut stdout).unwrap();
        assert!(stdout.is_empty());
        assert_eq!(
            written,
            vec![
                dir.path().join("dictionary.json"),
                dir.path().join("dictionary.tsv"),
                dir.path().join("dictionary.md"),
            ]
        );

        let json_out: Value =
            serde_json::from_str(&std::fs::read_to_string(&written[0]).unwrap()).unwrap();
        assert_eq!(json_out, schema());

        let tsv = std::fs::read_to_string(&written[1]).unwrap();
        let lines: Vec<_> = tsv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Database\tCollection\tField_full_name\tDepth\tField_name\tType",
                "shop\torders\ttotal\t0\ttotal\tnumber",
                "shop\torders\tcoupon\t0\tcoupon\tstring",
            ]
        );

        let md = std::fs::read_to_string(&written[2]).unwrap();
        assert!(md.starts_with("\n### Database: shop\n#### Collection: orders \n"));
        assert!(md.contains("Order total"));
        assert!(md.contains("float : 6, integer : 4"));
    }

    #[test]
    fn test_failed_export_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("broken");
        let config = ExportConfig::builder()
            .formats(["tsv"])
            .columns("Field_name Type")
            .output(&base)
            .build();
        let data = json!({"shop": {"orders": {"object": {"x": {"count": 1}}}}});

        let mut stdout = Vec::new();
        let err = write_output_to(&data, &config, &mut stdout).unwrap_err();
        assert!(matches!(err, ExportError::MalformedField { .. }));
        assert!(!dir.path().join("broken.tsv").exists());
    }
}

mod category_output_tests {
    use super::*;

    #[test]
    fn test_yaml_without_counts() {
        let config = ExportConfig::builder()
            .formats(["yaml"])
            .without_counts(true)
            .build();
        let mut stdout = Vec::new();
        write_output_to(&schema(), &config, &mut stdout).unwrap();
        let out = String::from_utf8(stdout).unwrap();
        assert!(!out.contains("count"));
        assert!(out.contains("description: Order total"));
    }

    #[test]
    fn test_diff_category_tsv() {
        let diff = json!([
            {"hierarchy": "shop.orders.total", "prev_schema": "integer", "new_schema": "number"},
            {"hierarchy": "archive", "prev_schema": "archive", "new_schema": null}
        ]);
        let config = ExportConfig::builder()
            .formats(["tsv"])
            .category("diff")
            .build();
        let mut stdout = Vec::new();
        write_output_to(&diff, &config, &mut stdout).unwrap();
        let out = String::from_utf8(stdout).unwrap();
        assert_eq!(
            out,
            "Database\tCollection\tHierarchy\tPrevious Schema\tNew Schema\n\
             shop\torders\ttotal\tinteger\tnumber\n\
             archive\t\t\tarchive\t\n"
        );
    }

    #[test]
    fn test_diff_category_json_passes_through() {
        let diff = json!([{"hierarchy": "a.b", "prev_schema": "x", "new_schema": "y"}]);
        let config = ExportConfig::builder()
            .formats(["json"])
            .category("diff")
            .without_counts(true)
            .build();
        let mut stdout = Vec::new();
        write_output_to(&diff, &config, &mut stdout).unwrap();
        let value: Value = serde_json::from_slice(&stdout).unwrap();
        assert_eq!(value, diff);
    }
}

mod registry_extension_tests {
    use super::*;

    struct FieldListFormat;

    impl OutputFormat for FieldListFormat {
        fn format(&self) -> &'static str {
            "txt"
        }

        fn kind(&self) -> FormatKind {
            FormatKind::Tabular
        }

        fn default_columns(&self) -> &'static [&'static str] {
            &["Field_full_name"]
        }

        fn render(&self, input: FormatInput<'_>) -> Result<String, ExportError> {
            match input {
                FormatInput::Table(table) => Ok(table
                    .rows
                    .iter()
                    .map(|row| row[2].to_string())
                    .collect::<Vec<_>>()
                    .join("\n")),
                FormatInput::Document(_) => Err(ExportError::InvalidData("table only".into())),
            }
        }
    }

    #[test]
    fn test_custom_format() {
        let mut formats = FormatRegistry::with_defaults();
        formats.register(Arc::new(FieldListFormat));
        let config = ExportConfig::builder().formats(["txt"]).build();

        let results =
            render_output(&schema(), &config, &CategoryRegistry::with_defaults(), &formats)
                .unwrap();
        assert_eq!(results[0].format, "txt");
        assert_eq!(results[0].content, "total\ncoupon");
    }
}
