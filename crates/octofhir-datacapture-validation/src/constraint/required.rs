use super::ConstraintValidator;
use crate::messages::{REQUIRED_CONSTRAINT_VALIDATION_ERROR_MSG, StringResources, message};
use crate::result::ValidationResult;
use octofhir_datacapture_model::{QuestionnaireItem, QuestionnaireResponseItem};

/// A required question needs at least one recorded answer
///
/// Any answer counts, including one without a value.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredConstraintValidator;

impl ConstraintValidator for RequiredConstraintValidator {
    fn name(&self) -> &'static str {
        "required"
    }

    fn validate(
        &self,
        question: &QuestionnaireItem,
        response: &QuestionnaireResponseItem,
        resources: &dyn StringResources,
    ) -> ValidationResult {
        if question.required && response.answer.is_empty() {
            return ValidationResult::invalid(message(
                resources,
                REQUIRED_CONSTRAINT_VALIDATION_ERROR_MSG,
                &[],
            ));
        }
        ValidationResult::valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MessageCatalog;
    use octofhir_datacapture_model::{Answer, AnswerValue, ItemType};
    use pretty_assertions::assert_eq;

    fn validate(required: bool, response: &QuestionnaireResponseItem) -> ValidationResult {
        let question = QuestionnaireItem::new("q", ItemType::String).required(required);
        RequiredConstraintValidator.validate(&question, response, &MessageCatalog::english())
    }

    #[test]
    fn test_required_without_answer_fails() {
        let result = validate(true, &QuestionnaireResponseItem::new("q"));
        assert_eq!(
            result,
            ValidationResult::invalid("Missing answer for required field.")
        );
    }

    #[test]
    fn test_required_with_answer_passes() {
        let response = QuestionnaireResponseItem::new("q").with_answer(AnswerValue::string("x"));
        assert_eq!(validate(true, &response), ValidationResult::valid());
    }

    #[test]
    fn test_answer_without_value_counts() {
        let mut response = QuestionnaireResponseItem::new("q");
        response.answer.push(Answer::default());
        assert!(validate(true, &response).is_valid);
    }

    #[test]
    fn test_optional_without_answer_passes() {
        assert_eq!(
            validate(false, &QuestionnaireResponseItem::new("q")),
            ValidationResult::valid()
        );
    }

    #[test]
    fn test_message_comes_from_resources() {
        let question = QuestionnaireItem::new("q", ItemType::String).required(true);
        let catalog = MessageCatalog::empty()
            .with(REQUIRED_CONSTRAINT_VALIDATION_ERROR_MSG, "Réponse obligatoire.");
        let result = RequiredConstraintValidator.validate(
            &question,
            &QuestionnaireResponseItem::new("q"),
            &catalog,
        );
        assert_eq!(result.error_message.as_deref(), Some("Réponse obligatoire."));
    }
}
