//! Property tests for the required constraint
//!
//! Covers the three universal rules of the required check over arbitrary
//! answer lists and message tables.

use octofhir_datacapture_model::{
    AnswerValue, Decimal, ItemType, QuestionnaireItem, QuestionnaireResponseItem,
};
use octofhir_datacapture_validation::{
    ConstraintValidator, MessageCatalog, RequiredConstraintValidator,
    messages::REQUIRED_CONSTRAINT_VALIDATION_ERROR_MSG,
};
use proptest::prelude::*;

fn arb_answer() -> impl Strategy<Value = AnswerValue> {
    prop_oneof![
        any::<bool>().prop_map(AnswerValue::boolean),
        any::<i32>().prop_map(AnswerValue::integer),
        (any::<i64>(), 0u32..6).prop_map(|(n, scale)| AnswerValue::decimal(Decimal::new(n, scale))),
        "[a-zA-Z0-9 ]{0,16}".prop_map(AnswerValue::string),
        Just(AnswerValue::Boolean(None)),
        Just(AnswerValue::String(None)),
    ]
}

fn arb_item_type() -> impl Strategy<Value = ItemType> {
    prop_oneof![
        Just(ItemType::Boolean),
        Just(ItemType::Integer),
        Just(ItemType::Decimal),
        Just(ItemType::String),
        Just(ItemType::Text),
        Just(ItemType::Choice),
    ]
}

fn response_with(answers: Vec<AnswerValue>) -> QuestionnaireResponseItem {
    answers
        .into_iter()
        .fold(QuestionnaireResponseItem::new("q"), |item, value| item.with_answer(value))
}

proptest! {
    #[test]
    fn required_without_answers_fails_with_message(
        item_type in arb_item_type(),
        template in "[a-zA-Z .]{0,40}",
    ) {
        let question = QuestionnaireItem::new("q", item_type).required(true);
        let catalog = MessageCatalog::empty()
            .with(REQUIRED_CONSTRAINT_VALIDATION_ERROR_MSG, template);

        let result = RequiredConstraintValidator.validate(
            &question,
            &QuestionnaireResponseItem::new("q"),
            &catalog,
        );

        prop_assert!(!result.is_valid);
        prop_assert!(result.error_message.is_some_and(|m| !m.is_empty()));
    }

    #[test]
    fn required_with_answers_passes(
        item_type in arb_item_type(),
        answers in prop::collection::vec(arb_answer(), 1..5),
    ) {
        let question = QuestionnaireItem::new("q", item_type).required(true);
        let result = RequiredConstraintValidator.validate(
            &question,
            &response_with(answers),
            &MessageCatalog::english(),
        );

        prop_assert!(result.is_valid);
        prop_assert_eq!(result.error_message, None);
    }

    #[test]
    fn optional_always_passes(
        item_type in arb_item_type(),
        answers in prop::collection::vec(arb_answer(), 0..5),
    ) {
        let question = QuestionnaireItem::new("q", item_type).required(false);
        let result = RequiredConstraintValidator.validate(
            &question,
            &response_with(answers),
            &MessageCatalog::english(),
        );

        prop_assert!(result.is_valid);
    }
}
