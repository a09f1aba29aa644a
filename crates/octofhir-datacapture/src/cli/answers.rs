//! Answers command implementation

use super::{input, output};
use anyhow::Result;
use octofhir_datacapture_views::view_items;
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

/// Configuration for answers command
pub struct AnswersConfig {
    pub questionnaire: PathBuf,
    pub response: PathBuf,
    pub output_format: output::OutputFormat,
    pub output_file: Option<PathBuf>,
}

/// One listed question with its formatted answers
#[derive(Debug, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
struct AnswerRow {
    #[tabled(rename = "Link id")]
    link_id: String,
    #[tabled(rename = "Question")]
    text: String,
    #[tabled(rename = "Answer")]
    answer: String,
}

/// List every question of the response with its display string
pub fn answers(config: AnswersConfig) -> Result<()> {
    let questionnaire = input::load_questionnaire(&config.questionnaire)?;
    let response = input::load_response(&config.response)?;

    let rows: Vec<AnswerRow> = view_items(&questionnaire, &response)
        .iter()
        .map(|item| AnswerRow {
            link_id: item.link_id().to_string(),
            text: item.question_text().to_string(),
            answer: item.answer_string(),
        })
        .collect();

    let content = match config.output_format {
        output::OutputFormat::Json => output::format_json(&rows, false)?,
        output::OutputFormat::Pretty => output::format_json(&rows, true)?,
        output::OutputFormat::Table => output::format_table(rows),
    };
    output::write_output(&content, config.output_file.as_deref())
}
