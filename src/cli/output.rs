//! Output formatting for CLI

use std::path::PathBuf;

/// Summary of written files, one per line
pub fn format_summary(written: &[PathBuf]) -> String {
    let mut output = format!("Wrote {} file(s):", written.len());
    for path in written {
        output.push_str(&format!("\n  - {}", path.display()));
    }
    output
}
