//! Loading FHIR resources and message catalogs from disk

use anyhow::{Context, Result};
use octofhir_datacapture_model::{Questionnaire, QuestionnaireResponse};
use octofhir_datacapture_validation::MessageCatalog;
use std::fs;
use std::path::Path;

/// Read and parse a Questionnaire JSON file
pub fn load_questionnaire(path: &Path) -> Result<Questionnaire> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read questionnaire: {}", path.display()))?;
    let questionnaire = Questionnaire::from_json(&json)
        .with_context(|| format!("Failed to parse questionnaire: {}", path.display()))?;
    log::debug!(
        "Loaded questionnaire {} with {} top-level item(s)",
        questionnaire.url.as_deref().unwrap_or("(no url)"),
        questionnaire.item.len()
    );
    Ok(questionnaire)
}

/// Read and parse a QuestionnaireResponse JSON file
pub fn load_response(path: &Path) -> Result<QuestionnaireResponse> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read response: {}", path.display()))?;
    QuestionnaireResponse::from_json(&json)
        .with_context(|| format!("Failed to parse response: {}", path.display()))
}

/// English messages, overridden by the given catalog file if any
pub fn load_messages(path: Option<&Path>) -> Result<MessageCatalog> {
    match path {
        Some(path) => MessageCatalog::from_path(path)
            .with_context(|| format!("Failed to load messages: {}", path.display())),
        None => Ok(MessageCatalog::english()),
    }
}
