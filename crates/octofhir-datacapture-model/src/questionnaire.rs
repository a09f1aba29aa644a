//! Questionnaire definitions

use crate::answer::AnswerValue;
use crate::datatypes::Extension;
use octofhir_datacapture_diagnostics::{DC0001, DataCaptureError, ItemPath, Result};
use serde::{Deserialize, Serialize};

/// `minValue` extension: inclusive lower bound of an answer
pub const EXTENSION_MIN_VALUE_URL: &str = "http://hl7.org/fhir/StructureDefinition/minValue";
/// `maxValue` extension: inclusive upper bound of an answer
pub const EXTENSION_MAX_VALUE_URL: &str = "http://hl7.org/fhir/StructureDefinition/maxValue";
/// `minLength` extension: minimum number of characters
pub const EXTENSION_MIN_LENGTH_URL: &str = "http://hl7.org/fhir/StructureDefinition/minLength";
/// `regex` extension: pattern a primitive answer must match
pub const EXTENSION_REGEX_URL: &str = "http://hl7.org/fhir/StructureDefinition/regex";

/// Kind of a questionnaire item (`Questionnaire.item.type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    #[serde(rename = "group")]
    Group,
    #[serde(rename = "display")]
    Display,
    #[serde(rename = "question")]
    Question,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "decimal")]
    Decimal,
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "dateTime")]
    DateTime,
    #[serde(rename = "time")]
    Time,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "url")]
    Url,
    #[serde(rename = "choice")]
    Choice,
    #[serde(rename = "open-choice")]
    OpenChoice,
    #[serde(rename = "attachment")]
    Attachment,
    #[serde(rename = "reference")]
    Reference,
    #[serde(rename = "quantity")]
    Quantity,
}

impl ItemType {
    /// Check if items of this type can carry answers
    pub fn is_question(&self) -> bool {
        !matches!(self, Self::Group | Self::Display)
    }
}

/// One item of a questionnaire: a question, a group or display text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireItem {
    pub link_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub repeats: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub item: Vec<QuestionnaireItem>,
}

impl QuestionnaireItem {
    /// Create an item with the given link id and type
    pub fn new(link_id: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            link_id: link_id.into(),
            definition: None,
            prefix: None,
            text: None,
            item_type,
            required: false,
            repeats: false,
            read_only: false,
            max_length: None,
            extension: Vec::new(),
            item: Vec::new(),
        }
    }

    /// Set the question text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the required flag
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the repeats flag
    pub fn repeats(mut self, repeats: bool) -> Self {
        self.repeats = repeats;
        self
    }

    /// Set the maximum answer length
    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Add an extension
    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.extension.push(extension);
        self
    }

    /// Add a child item
    pub fn with_item(mut self, item: QuestionnaireItem) -> Self {
        self.item.push(item);
        self
    }

    /// Check if this item can carry answers
    pub fn is_question(&self) -> bool {
        self.item_type.is_question()
    }

    /// Value of the first extension with the given URL
    pub fn extension_value(&self, url: &str) -> Option<&AnswerValue> {
        self.extension
            .iter()
            .find(|extension| extension.url == url)
            .and_then(|extension| extension.value.as_ref())
    }

    /// Inclusive lower bound from the `minValue` extension
    pub fn min_value(&self) -> Option<&AnswerValue> {
        self.extension_value(EXTENSION_MIN_VALUE_URL)
    }

    /// Inclusive upper bound from the `maxValue` extension
    pub fn max_value(&self) -> Option<&AnswerValue> {
        self.extension_value(EXTENSION_MAX_VALUE_URL)
    }

    /// Minimum answer length from the `minLength` extension
    pub fn min_length(&self) -> Option<usize> {
        match self.extension_value(EXTENSION_MIN_LENGTH_URL)? {
            AnswerValue::Integer(Some(length)) if *length >= 0 => Some(*length as usize),
            other => {
                log::warn!(
                    "Ignoring minLength extension on item '{}' with {} value",
                    self.link_id,
                    other.type_name()
                );
                None
            }
        }
    }

    /// Pattern from the `regex` extension
    pub fn regex(&self) -> Option<&str> {
        match self.extension_value(EXTENSION_REGEX_URL)? {
            AnswerValue::String(Some(pattern)) => Some(pattern),
            other => {
                log::warn!(
                    "Ignoring regex extension on item '{}' with {} value",
                    self.link_id,
                    other.type_name()
                );
                None
            }
        }
    }

    /// Direct child with the given link id
    pub fn child(&self, link_id: &str) -> Option<&QuestionnaireItem> {
        self.item.iter().find(|item| item.link_id == link_id)
    }
}

/// A questionnaire: an ordered tree of items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Questionnaire {
    #[serde(default = "Questionnaire::resource_type_default")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub item: Vec<QuestionnaireItem>,
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::new()
    }
}

impl Questionnaire {
    pub const RESOURCE_TYPE: &'static str = "Questionnaire";

    fn resource_type_default() -> String {
        Self::RESOURCE_TYPE.to_string()
    }

    /// Create an empty questionnaire
    pub fn new() -> Self {
        Self {
            resource_type: Self::resource_type_default(),
            id: None,
            url: None,
            name: None,
            title: None,
            status: None,
            item: Vec::new(),
        }
    }

    /// Set the canonical URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Add a top-level item
    pub fn with_item(mut self, item: QuestionnaireItem) -> Self {
        self.item.push(item);
        self
    }

    /// Parse a Questionnaire resource from FHIR JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let questionnaire: Self = serde_json::from_str(json).map_err(|e| {
            DataCaptureError::model_in(DC0001, Self::RESOURCE_TYPE, e.to_string())
        })?;
        if questionnaire.resource_type != Self::RESOURCE_TYPE {
            return Err(DataCaptureError::model_in(
                DC0001,
                Self::RESOURCE_TYPE,
                format!(
                    "Expected resourceType '{}', found '{}'",
                    Self::RESOURCE_TYPE,
                    questionnaire.resource_type
                ),
            ));
        }
        Ok(questionnaire)
    }

    /// Find an item by its path from the root
    pub fn find_item(&self, path: &ItemPath) -> Option<&QuestionnaireItem> {
        let (first, rest) = path.segments().split_first()?;
        let mut item = self.item.iter().find(|item| &item.link_id == first)?;
        for link_id in rest {
            item = item.child(link_id)?;
        }
        Some(item)
    }

    /// Depth-first iteration over all items with their paths
    pub fn items_with_paths(&self) -> Vec<(ItemPath, &QuestionnaireItem)> {
        fn walk<'a>(
            parent: &ItemPath,
            items: &'a [QuestionnaireItem],
            out: &mut Vec<(ItemPath, &'a QuestionnaireItem)>,
        ) {
            for item in items {
                let path = parent.child(&item.link_id);
                out.push((path.clone(), item));
                walk(&path, &item.item, out);
            }
        }

        let mut out = Vec::new();
        walk(&ItemPath::root(), &self.item, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const QUESTIONNAIRE: &str = r#"{
        "resourceType": "Questionnaire",
        "url": "http://example.org/Questionnaire/intake",
        "item": [
            {
                "linkId": "name",
                "text": "Full name",
                "type": "string",
                "required": true,
                "maxLength": 40,
                "extension": [
                    {"url": "http://hl7.org/fhir/StructureDefinition/minLength", "valueInteger": 2},
                    {"url": "http://hl7.org/fhir/StructureDefinition/regex", "valueString": "[A-Za-z ]+"}
                ]
            },
            {
                "linkId": "vitals",
                "type": "group",
                "item": [
                    {
                        "linkId": "weight",
                        "type": "decimal",
                        "extension": [
                            {"url": "http://hl7.org/fhir/StructureDefinition/minValue", "valueDecimal": 0.5}
                        ]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_questionnaire() {
        let questionnaire = Questionnaire::from_json(QUESTIONNAIRE).unwrap();
        assert_eq!(questionnaire.item.len(), 2);

        let name = &questionnaire.item[0];
        assert!(name.required);
        assert!(!name.repeats);
        assert_eq!(name.item_type, ItemType::String);
        assert_eq!(name.max_length, Some(40));
        assert_eq!(name.min_length(), Some(2));
        assert_eq!(name.regex(), Some("[A-Za-z ]+"));
        assert_eq!(name.min_value(), None);
    }

    #[test]
    fn test_find_item_by_path() {
        let questionnaire = Questionnaire::from_json(QUESTIONNAIRE).unwrap();
        let weight = questionnaire
            .find_item(&ItemPath::new("vitals").child("weight"))
            .unwrap();
        assert_eq!(weight.item_type, ItemType::Decimal);
        assert_eq!(
            weight.min_value(),
            Some(&AnswerValue::decimal("0.5".parse().unwrap()))
        );
        assert!(questionnaire.find_item(&ItemPath::new("weight")).is_none());
        assert!(questionnaire.find_item(&ItemPath::root()).is_none());
    }

    #[test]
    fn test_items_with_paths_in_document_order() {
        let questionnaire = Questionnaire::from_json(QUESTIONNAIRE).unwrap();
        let paths: Vec<String> = questionnaire
            .items_with_paths()
            .into_iter()
            .map(|(path, _)| path.to_string())
            .collect();
        assert_eq!(paths, vec!["name", "vitals", "vitals/weight"]);
    }

    #[test]
    fn test_wrong_resource_type() {
        let err = Questionnaire::from_json(r#"{"resourceType":"Patient"}"#).unwrap_err();
        assert_eq!(err.code(), DC0001);
    }

    #[test]
    fn test_unknown_item_type() {
        let json = r#"{"resourceType":"Questionnaire","item":[{"linkId":"a","type":"slider"}]}"#;
        assert!(Questionnaire::from_json(json).is_err());
    }

    #[test]
    fn test_min_length_with_wrong_type_is_ignored() {
        let item = QuestionnaireItem::new("q", ItemType::String).with_extension(Extension::new(
            EXTENSION_MIN_LENGTH_URL,
            AnswerValue::string("3"),
        ));
        assert_eq!(item.min_length(), None);
    }
}
