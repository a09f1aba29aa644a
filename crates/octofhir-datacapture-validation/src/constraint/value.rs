use super::{ConstraintValidator, first_failure};
use crate::compare::{compare_answer, display_bound};
use crate::messages::{
    MAX_VALUE_VALIDATION_ERROR_MSG, MIN_VALUE_VALIDATION_ERROR_MSG, StringResources, message,
};
use crate::result::ValidationResult;
use octofhir_datacapture_model::{AnswerValue, QuestionnaireItem, QuestionnaireResponseItem};
use std::cmp::Ordering;

/// Shared check for both bounds: fail when an answer orders as `violation`
/// against the bound
fn check_bound(
    bound: Option<&AnswerValue>,
    violation: Ordering,
    key: &str,
    response: &QuestionnaireResponseItem,
    resources: &dyn StringResources,
) -> ValidationResult {
    let Some(bound) = bound else {
        return ValidationResult::valid();
    };

    first_failure(response, |value| {
        (compare_answer(value, bound)? == violation)
            .then(|| message(resources, key, &[&display_bound(bound)]))
    })
}

/// The `minValue` extension: answers must not be below the bound
#[derive(Debug, Clone, Copy, Default)]
pub struct MinValueConstraintValidator;

impl ConstraintValidator for MinValueConstraintValidator {
    fn name(&self) -> &'static str {
        "minValue"
    }

    fn validate(
        &self,
        question: &QuestionnaireItem,
        response: &QuestionnaireResponseItem,
        resources: &dyn StringResources,
    ) -> ValidationResult {
        check_bound(
            question.min_value(),
            Ordering::Less,
            MIN_VALUE_VALIDATION_ERROR_MSG,
            response,
            resources,
        )
    }
}

/// The `maxValue` extension: answers must not be above the bound
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxValueConstraintValidator;

impl ConstraintValidator for MaxValueConstraintValidator {
    fn name(&self) -> &'static str {
        "maxValue"
    }

    fn validate(
        &self,
        question: &QuestionnaireItem,
        response: &QuestionnaireResponseItem,
        resources: &dyn StringResources,
    ) -> ValidationResult {
        check_bound(
            question.max_value(),
            Ordering::Greater,
            MAX_VALUE_VALIDATION_ERROR_MSG,
            response,
            resources,
        )
    }
}
