//! Running a set of constraint validators on one item

use crate::constraint::{
    ConstraintValidator, MaxLengthConstraintValidator, MaxValueConstraintValidator,
    MinLengthConstraintValidator, MinValueConstraintValidator, RegexConstraintValidator,
    RequiredConstraintValidator,
};
use crate::messages::StringResources;
use crate::result::ValidationResult;
use octofhir_datacapture_diagnostics::ItemPath;
use octofhir_datacapture_model::{QuestionnaireItem, QuestionnaireResponseItem};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// All constraint results for one response item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemValidation {
    pub path: ItemPath,
    pub results: Vec<ValidationResult>,
}

impl ItemValidation {
    pub fn new(path: ItemPath, results: Vec<ValidationResult>) -> Self {
        Self { path, results }
    }

    /// Link id of the validated item
    pub fn link_id(&self) -> &str {
        self.path.link_id().unwrap_or_default()
    }

    /// Check if every constraint passed
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(|result| result.is_valid)
    }

    /// Messages of the failed constraints, in validator order
    pub fn error_messages(&self) -> impl Iterator<Item = &str> {
        self.results
            .iter()
            .filter_map(|result| result.error_message.as_deref())
    }
}

/// Runs an ordered list of constraint validators on a question/answer pair
///
/// Every validator runs independently; one failure does not stop the others.
#[derive(Clone)]
pub struct QuestionnaireResponseItemValidator {
    validators: Vec<Arc<dyn ConstraintValidator>>,
}

impl Default for QuestionnaireResponseItemValidator {
    fn default() -> Self {
        Self::builder()
            .with(RequiredConstraintValidator)
            .with(MaxLengthConstraintValidator)
            .with(MinLengthConstraintValidator)
            .with(MinValueConstraintValidator)
            .with(MaxValueConstraintValidator)
            .with(RegexConstraintValidator::new())
            .build()
    }
}

impl std::fmt::Debug for QuestionnaireResponseItemValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.validators.iter().map(|v| v.name()))
            .finish()
    }
}

impl QuestionnaireResponseItemValidator {
    /// The standard set: required, maxLength, minLength, minValue, maxValue, regex
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an empty validator list
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    /// Names of the configured validators, in order
    pub fn names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// Run every validator and collect all results
    pub fn validate(
        &self,
        question: &QuestionnaireItem,
        response: &QuestionnaireResponseItem,
        resources: &dyn StringResources,
    ) -> Vec<ValidationResult> {
        self.validators
            .iter()
            .map(|validator| {
                let result = validator.validate(question, response, resources);
                if !result.is_valid {
                    log::debug!(
                        "Item '{}' failed {} constraint: {}",
                        question.link_id,
                        validator.name(),
                        result.error_message.as_deref().unwrap_or_default()
                    );
                }
                result
            })
            .collect()
    }
}

/// Builder for [`QuestionnaireResponseItemValidator`]
#[derive(Default)]
pub struct ValidatorBuilder {
    validators: Vec<Arc<dyn ConstraintValidator>>,
}

impl ValidatorBuilder {
    /// Append a validator
    pub fn with(mut self, validator: impl ConstraintValidator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Append a shared validator
    pub fn with_shared(mut self, validator: Arc<dyn ConstraintValidator>) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn build(self) -> QuestionnaireResponseItemValidator {
        QuestionnaireResponseItemValidator {
            validators: self.validators,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MessageCatalog;
    use octofhir_datacapture_model::{AnswerValue, ItemType};
    use pretty_assertions::assert_eq;

    struct NoDigits;

    impl ConstraintValidator for NoDigits {
        fn name(&self) -> &'static str {
            "noDigits"
        }

        fn validate(
            &self,
            _question: &QuestionnaireItem,
            response: &QuestionnaireResponseItem,
            _resources: &dyn StringResources,
        ) -> ValidationResult {
            let has_digit = response
                .answer_values()
                .filter_map(|v| v.primitive_string())
                .any(|s| s.chars().any(|c| c.is_ascii_digit()));
            if has_digit {
                ValidationResult::invalid("No digits please")
            } else {
                ValidationResult::valid()
            }
        }
    }

    #[test]
    fn test_default_validator_names() {
        assert_eq!(
            QuestionnaireResponseItemValidator::new().names(),
            vec!["required", "maxLength", "minLength", "minValue", "maxValue", "regex"]
        );
    }

    #[test]
    fn test_all_validators_run() {
        let validator = QuestionnaireResponseItemValidator::builder()
            .with(MaxLengthConstraintValidator)
            .with(NoDigits)
            .build();
        let question = QuestionnaireItem::new("name", ItemType::String).with_max_length(3);
        let response = QuestionnaireResponseItem::new("name").with_answer(AnswerValue::string("R2D2"));

        let results = validator.validate(&question, &response, &MessageCatalog::english());
        let validation = ItemValidation::new(ItemPath::new("name"), results);

        assert!(!validation.is_valid());
        assert_eq!(validation.link_id(), "name");
        assert_eq!(
            validation.error_messages().collect::<Vec<_>>(),
            vec![
                "The maximum number of characters that are permitted in the answer is: 3",
                "No digits please",
            ]
        );
    }

    #[test]
    fn test_empty_validator_accepts_everything() {
        let validator = QuestionnaireResponseItemValidator::builder().build();
        let question = QuestionnaireItem::new("q", ItemType::String).required(true);
        let results = validator.validate(
            &question,
            &QuestionnaireResponseItem::new("q"),
            &MessageCatalog::english(),
        );
        assert!(results.is_empty());
        assert!(ItemValidation::new(ItemPath::new("q"), results).is_valid());
    }
}
