//! Constraint validators
//!
//! Each validator checks one rule of a question definition against the
//! answers captured for it. Validators are independent of each other; the
//! caller decides which ones to run and aggregates their results (see
//! [`crate::QuestionnaireResponseItemValidator`]).

mod length;
mod pattern;
mod required;
mod value;

pub use length::{MaxLengthConstraintValidator, MinLengthConstraintValidator};
pub use pattern::RegexConstraintValidator;
pub use required::RequiredConstraintValidator;
pub use value::{MaxValueConstraintValidator, MinValueConstraintValidator};

use crate::messages::StringResources;
use crate::result::ValidationResult;
use octofhir_datacapture_model::{AnswerValue, QuestionnaireItem, QuestionnaireResponseItem};

/// A rule checking a response item against its question definition
///
/// The caller pairs `question` and `response` (same `linkId`) before calling.
/// Implementations have no side effects and never fail: a broken rule is a
/// result with `is_valid == false`, a rule that cannot be evaluated passes.
pub trait ConstraintValidator: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    fn validate(
        &self,
        question: &QuestionnaireItem,
        response: &QuestionnaireResponseItem,
        resources: &dyn StringResources,
    ) -> ValidationResult;
}

/// First answer value for which `check` reports a failure message
pub(crate) fn first_failure<F>(response: &QuestionnaireResponseItem, check: F) -> ValidationResult
where
    F: FnMut(&AnswerValue) -> Option<String>,
{
    response
        .answer_values()
        .find_map(check)
        .map(ValidationResult::invalid)
        .unwrap_or_else(ValidationResult::valid)
}
