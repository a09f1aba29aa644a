//! Validation of a whole questionnaire response

use crate::item::{ItemValidation, QuestionnaireResponseItemValidator};
use crate::messages::{MessageCatalog, StringResources};
use crate::result::ValidationResult;
use indexmap::IndexMap;
use octofhir_datacapture_diagnostics::{
    DC0100, DC0101, DC0102, DC0103, DC0104, DataCaptureError, ItemPath, Result,
};
use octofhir_datacapture_model::{
    ItemType, Questionnaire, QuestionnaireItem, QuestionnaireResponse, QuestionnaireResponseItem,
};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Per-item results of a response validation, in questionnaire order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    items: Vec<ItemValidation>,
}

impl ValidationReport {
    /// Check if every item passed every constraint
    pub fn is_valid(&self) -> bool {
        self.items.iter().all(ItemValidation::is_valid)
    }

    pub fn items(&self) -> &[ItemValidation] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items with at least one failed constraint
    pub fn invalid_items(&self) -> impl Iterator<Item = &ItemValidation> {
        self.items.iter().filter(|item| !item.is_valid())
    }

    /// Results for the item at `path`
    pub fn get(&self, path: &ItemPath) -> Option<&ItemValidation> {
        self.items.iter().find(|item| &item.path == path)
    }

    /// Results grouped by link id; repeated items share one entry
    pub fn by_link_id(&self) -> IndexMap<String, Vec<ValidationResult>> {
        let mut map: IndexMap<String, Vec<ValidationResult>> = IndexMap::new();
        for item in &self.items {
            map.entry(item.link_id().to_string())
                .or_default()
                .extend(item.results.iter().cloned());
        }
        map
    }
}

impl IntoIterator for ValidationReport {
    type Item = ItemValidation;
    type IntoIter = std::vec::IntoIter<ItemValidation>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Validates a [`QuestionnaireResponse`] against its [`Questionnaire`]
///
/// Response items are paired with questionnaire items by `linkId` at each
/// level of the tree. A question without a response item is validated as
/// having no answers, so required questions are caught even when the
/// response omits them.
#[derive(Clone)]
pub struct QuestionnaireResponseValidator {
    item_validator: QuestionnaireResponseItemValidator,
    resources: Arc<dyn StringResources>,
}

impl Default for QuestionnaireResponseValidator {
    fn default() -> Self {
        Self::new(Arc::new(MessageCatalog::english()))
    }
}

impl QuestionnaireResponseValidator {
    /// Validator with the standard constraint set and the given messages
    pub fn new(resources: Arc<dyn StringResources>) -> Self {
        Self {
            item_validator: QuestionnaireResponseItemValidator::default(),
            resources,
        }
    }

    /// Replace the constraint set
    pub fn with_item_validator(mut self, item_validator: QuestionnaireResponseItemValidator) -> Self {
        self.item_validator = item_validator;
        self
    }

    /// Validate every question of the response
    ///
    /// Constraint failures land in the report. Errors are returned only when
    /// the response does not fit the questionnaire's structure; all such
    /// problems are collected before returning.
    pub fn validate(
        &self,
        questionnaire: &Questionnaire,
        response: &QuestionnaireResponse,
    ) -> Result<ValidationReport> {
        if let (Some(expected), Some(actual)) = (&questionnaire.url, &response.questionnaire) {
            if canonical_base(expected) != canonical_base(actual) {
                return Err(DataCaptureError::validation(
                    DC0100,
                    format!("Response is for questionnaire '{actual}', expected '{expected}'"),
                ));
            }
        }

        let mut walk = Walk {
            validator: self,
            report: ValidationReport::default(),
            errors: Vec::new(),
        };
        walk.items(&ItemPath::root(), &questionnaire.item, &response.item);

        log::debug!(
            "Validated {} item(s), {} invalid, {} structural error(s)",
            walk.report.len(),
            walk.report.invalid_items().count(),
            walk.errors.len()
        );

        match DataCaptureError::from_many(walk.errors) {
            Some(error) => Err(error),
            None => Ok(walk.report),
        }
    }
}

/// Strip a `|version` suffix from a canonical URL
fn canonical_base(canonical: &str) -> &str {
    canonical.split('|').next().unwrap_or(canonical)
}

struct Walk<'v> {
    validator: &'v QuestionnaireResponseValidator,
    report: ValidationReport,
    errors: Vec<DataCaptureError>,
}

impl Walk<'_> {
    fn items(
        &mut self,
        parent: &ItemPath,
        questions: &[QuestionnaireItem],
        responses: &[QuestionnaireResponseItem],
    ) {
        let mut seen = HashSet::new();
        for response in responses {
            let path = parent.child(&response.link_id);
            match questions.iter().find(|q| q.link_id == response.link_id) {
                None => self.errors.push(DataCaptureError::validation_at(
                    DC0101,
                    format!("No questionnaire item with linkId '{}'", response.link_id),
                    path,
                )),
                Some(question) => {
                    let repeating_group = question.item_type == ItemType::Group && question.repeats;
                    if !seen.insert(response.link_id.as_str()) && !repeating_group {
                        self.errors.push(DataCaptureError::validation_at(
                            DC0104,
                            format!("Item '{}' appears more than once", response.link_id),
                            path,
                        ));
                    }
                }
            }
        }

        for question in questions {
            let path = parent.child(&question.link_id);
            let mut matching = responses
                .iter()
                .filter(|r| r.link_id == question.link_id)
                .peekable();

            match question.item_type {
                ItemType::Display => {}
                ItemType::Group => {
                    if matching.peek().is_none() {
                        self.items(&path, &question.item, &[]);
                    }
                    for response in matching {
                        if response.has_answer() {
                            self.errors.push(DataCaptureError::validation_at(
                                DC0102,
                                format!("Group '{}' cannot have answers", question.link_id),
                                path.clone(),
                            ));
                        }
                        self.items(&path, &question.item, &response.item);
                    }
                }
                _ => match matching.next() {
                    None => self.question(&path, question, &QuestionnaireResponseItem::new(&question.link_id)),
                    Some(response) => self.question(&path, question, response),
                },
            }
        }
    }

    fn question(
        &mut self,
        path: &ItemPath,
        question: &QuestionnaireItem,
        response: &QuestionnaireResponseItem,
    ) {
        if response.answer.len() > 1 && !question.repeats {
            self.errors.push(DataCaptureError::validation_at(
                DC0103,
                format!(
                    "Item '{}' has {} answers but does not repeat",
                    question.link_id,
                    response.answer.len()
                ),
                path.clone(),
            ));
        }

        let results = self.validator.item_validator.validate(
            question,
            response,
            self.validator.resources.as_ref(),
        );
        self.report
            .items
            .push(ItemValidation::new(path.clone(), results));

        for answer in &response.answer {
            if !answer.item.is_empty() {
                self.items(path, &question.item, &answer.item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octofhir_datacapture_model::{Answer, AnswerValue};
    use pretty_assertions::assert_eq;

    fn questionnaire() -> Questionnaire {
        Questionnaire::new()
            .with_url("http://example.org/Questionnaire/intake")
            .with_item(QuestionnaireItem::new("intro", ItemType::Display))
            .with_item(QuestionnaireItem::new("name", ItemType::String).required(true))
            .with_item(
                QuestionnaireItem::new("contact", ItemType::Group)
                    .with_item(QuestionnaireItem::new("phone", ItemType::String).required(true)),
            )
    }

    #[test]
    fn test_missing_items_are_validated_as_unanswered() {
        let report = QuestionnaireResponseValidator::default()
            .validate(&questionnaire(), &QuestionnaireResponse::new())
            .unwrap();

        let paths: Vec<String> = report.items().iter().map(|i| i.path.to_string()).collect();
        assert_eq!(paths, vec!["name", "contact/phone"]);
        assert!(!report.is_valid());
        assert_eq!(report.invalid_items().count(), 2);
    }

    #[test]
    fn test_answered_response_is_valid() {
        let response = QuestionnaireResponse::new()
            .for_questionnaire("http://example.org/Questionnaire/intake|1.0")
            .with_item(QuestionnaireResponseItem::new("name").with_answer(AnswerValue::string("Ann")))
            .with_item(
                QuestionnaireResponseItem::new("contact").with_item(
                    QuestionnaireResponseItem::new("phone").with_answer(AnswerValue::string("555")),
                ),
            );

        let report = QuestionnaireResponseValidator::default()
            .validate(&questionnaire(), &response)
            .unwrap();
        assert!(report.is_valid());
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_questionnaire_mismatch() {
        let response =
            QuestionnaireResponse::new().for_questionnaire("http://example.org/Questionnaire/other");
        let err = QuestionnaireResponseValidator::default()
            .validate(&questionnaire(), &response)
            .unwrap_err();
        assert_eq!(err.code(), DC0100);
    }

    #[test]
    fn test_unknown_link_id() {
        let response = QuestionnaireResponse::new().with_item(QuestionnaireResponseItem::new("ghost"));
        let err = QuestionnaireResponseValidator::default()
            .validate(&questionnaire(), &response)
            .unwrap_err();
        assert_eq!(err.code(), DC0101);
        assert_eq!(err.path(), Some(&ItemPath::new("ghost")));
    }

    #[test]
    fn test_structural_errors_are_collected() {
        let mut group = QuestionnaireResponseItem::new("contact");
        group.answer.push(Answer::new(AnswerValue::string("oops")));
        let response = QuestionnaireResponse::new()
            .with_item(
                QuestionnaireResponseItem::new("name")
                    .with_answer(AnswerValue::string("a"))
                    .with_answer(AnswerValue::string("b")),
            )
            .with_item(group);

        let err = QuestionnaireResponseValidator::default()
            .validate(&questionnaire(), &response)
            .unwrap_err();
        match err {
            DataCaptureError::Multiple(errors) => {
                let codes: Vec<_> = errors.iter().map(DataCaptureError::code).collect();
                assert_eq!(codes, vec![DC0103, DC0102]);
            }
            other => panic!("expected multiple errors, got {other}"),
        }
    }

    #[test]
    fn test_by_link_id_keeps_questionnaire_order() {
        let report = QuestionnaireResponseValidator::default()
            .validate(&questionnaire(), &QuestionnaireResponse::new())
            .unwrap();
        let by_link_id = report.by_link_id();
        let keys: Vec<&String> = by_link_id.keys().collect();
        assert_eq!(keys, vec!["name", "phone"]);
    }
}
