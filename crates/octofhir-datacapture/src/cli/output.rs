//! Output formatting utilities

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::fs::File;
use std::io::{IsTerminal, Write};
use std::path::Path;
use tabled::{Table, Tabled, settings::Style};

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    #[default]
    Pretty,
    /// Human-readable table
    Table,
}

/// When to color terminal output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Set up color output based on user preference
pub fn setup_colors(mode: ColorMode) {
    let enabled = match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    };
    colored::control::set_override(enabled);
}

/// Format an error for display, including its cause chain
pub fn format_error(error: &anyhow::Error) -> String {
    let mut out = format!("{} {}", "Error:".red().bold(), error);
    for cause in error.chain().skip(1) {
        out.push_str(&format!("\n  {} {}", "caused by:".dimmed(), cause));
    }
    out
}

/// Format a success message for display
pub fn format_success(message: &str) -> String {
    format!("{} {}", "Success:".green().bold(), message)
}

/// Serialize a value as JSON
pub fn format_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(value).context("Failed to serialize JSON")
    } else {
        serde_json::to_string(value).context("Failed to serialize JSON")
    }
}

/// Render rows as a table
pub fn format_table<R: Tabled>(rows: impl IntoIterator<Item = R>) -> String {
    let rows: Vec<R> = rows.into_iter().collect();
    if rows.is_empty() {
        return "(no items)".to_string();
    }
    Table::new(rows).with(Style::modern()).to_string()
}

/// Write output to a file or stdout
pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    if let Some(path) = output_file {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to output file: {}", path.display()))?;
        eprintln!(
            "{}",
            format_success(&format!("Output written to {}", path.display()))
        );
    } else {
        println!("{}", content);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Tabled)]
    struct Row {
        name: &'static str,
        value: u32,
    }

    #[test]
    fn test_format_json() {
        let value = serde_json::json!({ "a": 1 });
        assert_eq!(format_json(&value, false).unwrap(), r#"{"a":1}"#);
        assert_eq!(format_json(&value, true).unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_format_table() {
        let table = format_table([Row { name: "age", value: 42 }]);
        assert!(table.contains("name"));
        assert!(table.contains("age"));
        assert!(table.contains("42"));
        assert_eq!(format_table(Vec::<Row>::new()), "(no items)");
    }

    #[test]
    fn test_format_error_includes_causes() {
        colored::control::set_override(false);
        let error = anyhow::anyhow!("file missing").context("Failed to read response");
        assert_eq!(
            format_error(&error),
            "Error: Failed to read response\n  caused by: file missing"
        );
    }
}
