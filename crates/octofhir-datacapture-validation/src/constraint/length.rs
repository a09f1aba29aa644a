use super::{ConstraintValidator, first_failure};
use crate::messages::{
    MAX_LENGTH_VALIDATION_ERROR_MSG, MIN_LENGTH_VALIDATION_ERROR_MSG, StringResources, message,
};
use crate::result::ValidationResult;
use octofhir_datacapture_model::{QuestionnaireItem, QuestionnaireResponseItem};

/// `Questionnaire.item.maxLength` bounds the character count of primitive answers
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxLengthConstraintValidator;

impl ConstraintValidator for MaxLengthConstraintValidator {
    fn name(&self) -> &'static str {
        "maxLength"
    }

    fn validate(
        &self,
        question: &QuestionnaireItem,
        response: &QuestionnaireResponseItem,
        resources: &dyn StringResources,
    ) -> ValidationResult {
        let Some(max_length) = question.max_length else {
            return ValidationResult::valid();
        };

        first_failure(response, |value| {
            let text = value.primitive_string()?;
            (text.chars().count() > max_length as usize)
                .then(|| message(resources, MAX_LENGTH_VALIDATION_ERROR_MSG, &[&max_length]))
        })
    }
}

/// The `minLength` extension sets a minimum character count for primitive answers
#[derive(Debug, Clone, Copy, Default)]
pub struct MinLengthConstraintValidator;

impl ConstraintValidator for MinLengthConstraintValidator {
    fn name(&self) -> &'static str {
        "minLength"
    }

    fn validate(
        &self,
        question: &QuestionnaireItem,
        response: &QuestionnaireResponseItem,
        resources: &dyn StringResources,
    ) -> ValidationResult {
        let Some(min_length) = question.min_length() else {
            return ValidationResult::valid();
        };

        first_failure(response, |value| {
            let text = value.primitive_string()?;
            (text.chars().count() < min_length)
                .then(|| message(resources, MIN_LENGTH_VALIDATION_ERROR_MSG, &[&min_length]))
        })
    }
}
