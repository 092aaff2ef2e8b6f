//! mongo-schema-export command line tool

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mongo_schema_export::ExportConfig;
use mongo_schema_export::cli::commands::{ExportArgs, handle_export};
use mongo_schema_export::config::DEFAULT_MAX_DEPTH;

/// Export a MongoDB schema model as JSON, YAML, TSV, Markdown or HTML
#[derive(Parser, Debug)]
#[command(name = "mongo-schema-export", version, about)]
struct Cli {
    /// Schema (or diff) file, JSON or YAML; `-` reads JSON from stdin
    input: String,

    /// Output format: json, yaml, tsv, md, html (repeatable)
    #[arg(short, long = "format", default_value = "json")]
    formats: Vec<String>,

    /// Output file; the format extension is added when missing
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Space-separated columns for tabular formats
    #[arg(short, long)]
    columns: Option<String>,

    /// Omit count statistics from json/yaml output
    #[arg(long)]
    without_counts: bool,

    /// Data category: schema or diff
    #[arg(long, default_value = "schema")]
    category: String,

    /// Maximum schema nesting depth followed when flattening
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut builder = ExportConfig::builder()
        .formats(cli.formats)
        .without_counts(cli.without_counts)
        .category(cli.category)
        .max_depth(cli.max_depth);
    if let Some(output) = cli.output {
        builder = builder.output(output);
    }
    if let Some(columns) = cli.columns {
        builder = builder.columns(columns);
    }

    let args = ExportArgs {
        input: cli.input,
        config: builder.build(),
    };
    handle_export(&args)?;
    Ok(())
}
