//! Answer formatting

use octofhir_datacapture_model::{Answer, AnswerValue, QuestionnaireResponseItem};

/// Shown for an item without answers and for answers without a usable value
pub const NOT_ANSWERED: &str = "Not Answered";

/// Display string of a single answer
pub fn answer_display(answer: &Answer) -> String {
    let display = match &answer.value {
        Some(AnswerValue::Boolean(Some(true))) => Some("Yes".to_string()),
        Some(AnswerValue::Boolean(Some(false))) => Some("No".to_string()),
        Some(AnswerValue::String(v) | AnswerValue::Uri(v)) => v.clone(),
        Some(AnswerValue::Integer(v)) => v.map(|i| i.to_string()),
        Some(AnswerValue::Decimal(v)) => v.map(|d| d.to_string()),
        Some(AnswerValue::Date(v)) => v.as_ref().map(ToString::to_string),
        Some(AnswerValue::DateTime(v)) => v.as_ref().map(ToString::to_string),
        Some(AnswerValue::Time(v)) => v.as_ref().map(ToString::to_string),
        Some(AnswerValue::Quantity(quantity)) => quantity.value.map(|d| d.to_string()),
        Some(AnswerValue::Attachment(attachment)) => attachment.url.clone(),
        Some(AnswerValue::Coding(coding)) => coding.display_string().map(str::to_string),
        _ => None,
    };
    display.unwrap_or_else(|| NOT_ANSWERED.to_string())
}

/// All answers of an item joined with `", "`, in answer order
///
/// An item without answers is [`NOT_ANSWERED`].
pub fn answer_string(item: &QuestionnaireResponseItem) -> String {
    if item.answer.is_empty() {
        return NOT_ANSWERED.to_string();
    }
    let joined = item
        .answer
        .iter()
        .map(answer_display)
        .collect::<Vec<_>>()
        .join(", ");
    log::trace!("Formatted answers of '{}': {}", item.link_id, joined);
    joined
}
