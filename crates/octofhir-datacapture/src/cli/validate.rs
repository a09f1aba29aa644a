//! Validate command implementation

use super::{input, output};
use anyhow::Result;
use colored::Colorize;
use octofhir_datacapture_validation::{
    MessageCatalog, QuestionnaireResponseValidator, ValidationReport,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tabled::Tabled;

/// Configuration for validate command
pub struct ValidateConfig {
    pub questionnaire: PathBuf,
    pub response: PathBuf,
    pub messages: Arc<MessageCatalog>,
    pub verbose: bool,
    pub output_format: output::OutputFormat,
    pub output_file: Option<PathBuf>,
}

/// JSON document written by the validate command
#[derive(Serialize)]
struct ValidationOutput<'a> {
    valid: bool,
    items: &'a ValidationReport,
}

#[derive(Tabled)]
struct ValidationRow {
    #[tabled(rename = "Item")]
    path: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Messages")]
    messages: String,
}

/// Validate a response against its questionnaire
///
/// Returns whether every item passed. Structural mismatches between the
/// response and the questionnaire are errors.
pub fn validate(config: ValidateConfig) -> Result<bool> {
    let questionnaire = input::load_questionnaire(&config.questionnaire)?;
    let response = input::load_response(&config.response)?;

    if config.verbose {
        eprintln!(
            "Validating {} against {}",
            config.response.display(),
            config.questionnaire.display()
        );
    }

    let validator = QuestionnaireResponseValidator::new(config.messages);
    let report = validator.validate(&questionnaire, &response)?;

    let content = match config.output_format {
        output::OutputFormat::Json | output::OutputFormat::Pretty => output::format_json(
            &ValidationOutput {
                valid: report.is_valid(),
                items: &report,
            },
            config.output_format == output::OutputFormat::Pretty,
        )?,
        output::OutputFormat::Table => output::format_table(report.items().iter().map(|item| {
            ValidationRow {
                path: item.path.to_string(),
                status: if item.is_valid() {
                    "ok".green().to_string()
                } else {
                    "invalid".red().to_string()
                },
                messages: item.error_messages().collect::<Vec<_>>().join("\n"),
            }
        })),
    };
    output::write_output(&content, config.output_file.as_deref())?;

    let invalid = report.invalid_items().count();
    if invalid == 0 {
        eprintln!(
            "{}",
            output::format_success(&format!("All {} item(s) are valid", report.len()))
        );
    } else {
        eprintln!(
            "{} {} of {} item(s) invalid",
            "Validation failed:".red().bold(),
            invalid,
            report.len()
        );
    }

    Ok(report.is_valid())
}
