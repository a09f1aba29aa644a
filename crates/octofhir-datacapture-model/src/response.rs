//! Questionnaire responses

use crate::answer::{Answer, AnswerValue};
use crate::temporal::FhirDateTime;
use octofhir_datacapture_diagnostics::{DC0001, DataCaptureError, Result};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseStatus {
    #[default]
    InProgress,
    Completed,
    Amended,
    EnteredInError,
    Stopped,
}

/// The captured answers for one questionnaire item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireResponseItem {
    pub link_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answer: Vec<Answer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub item: Vec<QuestionnaireResponseItem>,
}

impl QuestionnaireResponseItem {
    /// Create an unanswered item
    pub fn new(link_id: impl Into<String>) -> Self {
        Self {
            link_id: link_id.into(),
            ..Self::default()
        }
    }

    /// Add an answer
    pub fn with_answer(mut self, value: AnswerValue) -> Self {
        self.answer.push(Answer::new(value));
        self
    }

    /// Add a child item
    pub fn with_item(mut self, item: QuestionnaireResponseItem) -> Self {
        self.item.push(item);
        self
    }

    /// Check if at least one answer was recorded
    pub fn has_answer(&self) -> bool {
        !self.answer.is_empty()
    }

    /// Values of all answers that carry one, in order
    pub fn answer_values(&self) -> impl Iterator<Item = &AnswerValue> {
        self.answer.iter().filter_map(|answer| answer.value.as_ref())
    }
}

/// A set of answers to a questionnaire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireResponse {
    #[serde(default = "QuestionnaireResponse::resource_type_default")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Canonical URL of the questionnaire being answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questionnaire: Option<String>,
    #[serde(default)]
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authored: Option<FhirDateTime>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub item: Vec<QuestionnaireResponseItem>,
}

impl Default for QuestionnaireResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionnaireResponse {
    pub const RESOURCE_TYPE: &'static str = "QuestionnaireResponse";

    fn resource_type_default() -> String {
        Self::RESOURCE_TYPE.to_string()
    }

    /// Create an empty in-progress response
    pub fn new() -> Self {
        Self {
            resource_type: Self::resource_type_default(),
            id: None,
            questionnaire: None,
            status: ResponseStatus::InProgress,
            authored: None,
            item: Vec::new(),
        }
    }

    /// Set the questionnaire canonical
    pub fn for_questionnaire(mut self, url: impl Into<String>) -> Self {
        self.questionnaire = Some(url.into());
        self
    }

    /// Add a top-level item
    pub fn with_item(mut self, item: QuestionnaireResponseItem) -> Self {
        self.item.push(item);
        self
    }

    /// Parse a QuestionnaireResponse resource from FHIR JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let response: Self = serde_json::from_str(json).map_err(|e| {
            DataCaptureError::model_in(DC0001, Self::RESOURCE_TYPE, e.to_string())
        })?;
        if response.resource_type != Self::RESOURCE_TYPE {
            return Err(DataCaptureError::model_in(
                DC0001,
                Self::RESOURCE_TYPE,
                format!(
                    "Expected resourceType '{}', found '{}'",
                    Self::RESOURCE_TYPE,
                    response.resource_type
                ),
            ));
        }
        Ok(response)
    }
}
