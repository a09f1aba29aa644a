use super::{ConstraintValidator, first_failure};
use crate::messages::{REGEX_VALIDATION_ERROR_MSG, StringResources, message};
use crate::result::ValidationResult;
use ::regex::Regex;
use octofhir_datacapture_model::{QuestionnaireItem, QuestionnaireResponseItem};
use parking_lot::Mutex;
use std::collections::HashMap;

/// The `regex` extension: every primitive answer must match the whole pattern
///
/// Compiled patterns are cached per validator. A pattern that does not
/// compile is logged once and the constraint passes.
#[derive(Debug, Default)]
pub struct RegexConstraintValidator {
    cache: Mutex<HashMap<String, Option<Regex>>>,
}

impl RegexConstraintValidator {
    pub fn new() -> Self {
        Self::default()
    }

    fn compiled(&self, pattern: &str) -> Option<Regex> {
        let mut cache = self.cache.lock();
        cache
            .entry(pattern.to_string())
            .or_insert_with(|| match Regex::new(&format!("^(?:{pattern})$")) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    log::warn!("Ignoring invalid regex constraint '{}': {}", pattern, e);
                    None
                }
            })
            .clone()
    }
}

impl ConstraintValidator for RegexConstraintValidator {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn validate(
        &self,
        question: &QuestionnaireItem,
        response: &QuestionnaireResponseItem,
        resources: &dyn StringResources,
    ) -> ValidationResult {
        let Some(pattern) = question.regex() else {
            return ValidationResult::valid();
        };
        let Some(regex) = self.compiled(pattern) else {
            return ValidationResult::valid();
        };

        first_failure(response, |value| {
            let text = value.primitive_string()?;
            (!regex.is_match(&text))
                .then(|| message(resources, REGEX_VALIDATION_ERROR_MSG, &[&pattern]))
        })
    }
}
