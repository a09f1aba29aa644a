//! Pairing of questions with their captured answers for display

use crate::format::answer_string;
use octofhir_datacapture_model::{
    ItemType, Questionnaire, QuestionnaireItem, QuestionnaireResponse, QuestionnaireResponseItem,
};
use std::borrow::Cow;

/// A question together with the response item holding its answers
///
/// The response item is owned when the response had none for this question.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionnaireResponseItemViewItem<'a> {
    pub questionnaire_item: &'a QuestionnaireItem,
    pub response_item: Cow<'a, QuestionnaireResponseItem>,
}

impl<'a> QuestionnaireResponseItemViewItem<'a> {
    pub fn new(
        questionnaire_item: &'a QuestionnaireItem,
        response_item: &'a QuestionnaireResponseItem,
    ) -> Self {
        Self {
            questionnaire_item,
            response_item: Cow::Borrowed(response_item),
        }
    }

    /// View item for a question the response does not mention
    pub fn unanswered(questionnaire_item: &'a QuestionnaireItem) -> Self {
        Self {
            questionnaire_item,
            response_item: Cow::Owned(QuestionnaireResponseItem::new(&questionnaire_item.link_id)),
        }
    }

    pub fn link_id(&self) -> &str {
        &self.questionnaire_item.link_id
    }

    /// Question text, falling back to the link id
    pub fn question_text(&self) -> &str {
        self.questionnaire_item
            .text
            .as_deref()
            .unwrap_or(&self.questionnaire_item.link_id)
    }

    /// Answers joined for display, see [`answer_string`]
    pub fn answer_string(&self) -> String {
        answer_string(&self.response_item)
    }
}

/// Flatten a response into view items, in questionnaire order
///
/// Groups and display items produce no view item of their own; their
/// children do. Items nested under an answer follow the question they
/// belong to.
pub fn view_items<'a>(
    questionnaire: &'a Questionnaire,
    response: &'a QuestionnaireResponse,
) -> Vec<QuestionnaireResponseItemViewItem<'a>> {
    let mut out = Vec::new();
    collect(&questionnaire.item, &response.item, &mut out);
    out
}

fn collect<'a>(
    questions: &'a [QuestionnaireItem],
    responses: &'a [QuestionnaireResponseItem],
    out: &mut Vec<QuestionnaireResponseItemViewItem<'a>>,
) {
    for question in questions {
        let mut matching = responses
            .iter()
            .filter(|r| r.link_id == question.link_id)
            .peekable();

        match question.item_type {
            ItemType::Display => {}
            ItemType::Group => {
                if matching.peek().is_none() {
                    collect(&question.item, &[], out);
                }
                for response in matching {
                    collect(&question.item, &response.item, out);
                }
            }
            _ => match matching.next() {
                None => out.push(QuestionnaireResponseItemViewItem::unanswered(question)),
                Some(response) => {
                    out.push(QuestionnaireResponseItemViewItem::new(question, response));
                    for answer in &response.answer {
                        collect(&question.item, &answer.item, out);
                    }
                }
            },
        }
    }
}
