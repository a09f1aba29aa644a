//! Answer values of a questionnaire response
//!
//! FHIR encodes an answer as a `value[x]` choice: exactly one of
//! `valueBoolean`, `valueDecimal`, ... is present. Here that choice is the
//! [`AnswerValue`] sum type. Primitive variants carry an optional payload
//! because a primitive may be present with only an id or extensions
//! (`"_valueBoolean": {...}` without `"valueBoolean"`).

use crate::datatypes::{Attachment, Coding, Element, Quantity, Reference};
use crate::response::QuestionnaireResponseItem;
use crate::temporal::{FhirDate, FhirDateTime, FhirTime};
use octofhir_datacapture_diagnostics::{DC0002, DataCaptureError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The value of one answer
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnswerValue {
    // === Primitive Types ===
    Boolean(Option<bool>),
    Decimal(Option<Decimal>),
    Integer(Option<i32>),
    Date(Option<FhirDate>),
    DateTime(Option<FhirDateTime>),
    Time(Option<FhirTime>),
    String(Option<String>),
    Uri(Option<String>),

    // === Complex Types ===
    Attachment(Attachment),
    Coding(Coding),
    Quantity(Quantity),
    Reference(Reference),
}

impl AnswerValue {
    /// Create a boolean value
    pub fn boolean(value: bool) -> Self {
        Self::Boolean(Some(value))
    }

    /// Create a decimal value
    pub fn decimal(value: Decimal) -> Self {
        Self::Decimal(Some(value))
    }

    /// Create an integer value
    pub fn integer(value: i32) -> Self {
        Self::Integer(Some(value))
    }

    /// Create a date value
    pub fn date(value: FhirDate) -> Self {
        Self::Date(Some(value))
    }

    /// Create a dateTime value
    pub fn date_time(value: FhirDateTime) -> Self {
        Self::DateTime(Some(value))
    }

    /// Create a time value
    pub fn time(value: FhirTime) -> Self {
        Self::Time(Some(value))
    }

    /// Create a string value
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(Some(value.into()))
    }

    /// Create a uri value
    pub fn uri(value: impl Into<String>) -> Self {
        Self::Uri(Some(value.into()))
    }

    /// FHIR type name of the value (the `[x]` suffix, lower camel case)
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Decimal(_) => "decimal",
            Self::Integer(_) => "integer",
            Self::Date(_) => "date",
            Self::DateTime(_) => "dateTime",
            Self::Time(_) => "time",
            Self::String(_) => "string",
            Self::Uri(_) => "uri",
            Self::Attachment(_) => "Attachment",
            Self::Coding(_) => "Coding",
            Self::Quantity(_) => "Quantity",
            Self::Reference(_) => "Reference",
        }
    }

    /// Check if this is a FHIR primitive type
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Boolean(_)
                | Self::Decimal(_)
                | Self::Integer(_)
                | Self::Date(_)
                | Self::DateTime(_)
                | Self::Time(_)
                | Self::String(_)
                | Self::Uri(_)
        )
    }

    /// Lexical form of a primitive value; `None` for complex types and for
    /// primitives without a payload
    pub fn primitive_string(&self) -> Option<String> {
        match self {
            Self::Boolean(v) => v.map(|b| b.to_string()),
            Self::Decimal(v) => v.map(|d| d.to_string()),
            Self::Integer(v) => v.map(|i| i.to_string()),
            Self::Date(v) => v.as_ref().map(ToString::to_string),
            Self::DateTime(v) => v.as_ref().map(ToString::to_string),
            Self::Time(v) => v.as_ref().map(ToString::to_string),
            Self::String(v) | Self::Uri(v) => v.clone(),
            Self::Attachment(_) | Self::Coding(_) | Self::Quantity(_) | Self::Reference(_) => None,
        }
    }
}

/// One answer of a response item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAnswer", into = "RawAnswer")]
pub struct Answer {
    /// `None` when the answer carries no `value[x]` at all
    pub value: Option<AnswerValue>,
    /// Items nested under this answer
    pub item: Vec<QuestionnaireResponseItem>,
}

impl Answer {
    /// Create an answer with a value
    pub fn new(value: AnswerValue) -> Self {
        Self {
            value: Some(value),
            item: Vec::new(),
        }
    }

    /// Add a nested item
    pub fn with_item(mut self, item: QuestionnaireResponseItem) -> Self {
        self.item.push(item);
        self
    }
}

impl From<AnswerValue> for Answer {
    fn from(value: AnswerValue) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct RawAnswer {
    #[serde(flatten)]
    value: ChoiceValue,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    item: Vec<QuestionnaireResponseItem>,
}

impl TryFrom<RawAnswer> for Answer {
    type Error = DataCaptureError;

    fn try_from(raw: RawAnswer) -> Result<Self, Self::Error> {
        Ok(Self {
            value: raw.value.into_value()?,
            item: raw.item,
        })
    }
}

impl From<Answer> for RawAnswer {
    fn from(answer: Answer) -> Self {
        Self {
            value: ChoiceValue::from_value(answer.value),
            item: answer.item,
        }
    }
}

/// JSON shape of the `value[x]` choice shared by answers and extensions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChoiceValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value_boolean: Option<bool>,
    #[serde(rename = "_valueBoolean", default, skip_serializing_if = "Option::is_none")]
    value_boolean_element: Option<Element>,

    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float_option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    value_decimal: Option<Decimal>,
    #[serde(rename = "_valueDecimal", default, skip_serializing_if = "Option::is_none")]
    value_decimal_element: Option<Element>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    value_integer: Option<i32>,
    #[serde(rename = "_valueInteger", default, skip_serializing_if = "Option::is_none")]
    value_integer_element: Option<Element>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    value_date: Option<FhirDate>,
    #[serde(rename = "_valueDate", default, skip_serializing_if = "Option::is_none")]
    value_date_element: Option<Element>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    value_date_time: Option<FhirDateTime>,
    #[serde(rename = "_valueDateTime", default, skip_serializing_if = "Option::is_none")]
    value_date_time_element: Option<Element>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    value_time: Option<FhirTime>,
    #[serde(rename = "_valueTime", default, skip_serializing_if = "Option::is_none")]
    value_time_element: Option<Element>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    value_string: Option<String>,
    #[serde(rename = "_valueString", default, skip_serializing_if = "Option::is_none")]
    value_string_element: Option<Element>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    value_uri: Option<String>,
    #[serde(rename = "_valueUri", default, skip_serializing_if = "Option::is_none")]
    value_uri_element: Option<Element>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    value_attachment: Option<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value_coding: Option<Coding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value_quantity: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value_reference: Option<Reference>,
}

impl ChoiceValue {
    /// Collapse the choice into at most one value
    pub(crate) fn into_value(self) -> Result<Option<AnswerValue>, DataCaptureError> {
        let mut values = Vec::new();

        if self.value_boolean.is_some() || self.value_boolean_element.is_some() {
            values.push(AnswerValue::Boolean(self.value_boolean));
        }
        if self.value_decimal.is_some() || self.value_decimal_element.is_some() {
            values.push(AnswerValue::Decimal(self.value_decimal));
        }
        if self.value_integer.is_some() || self.value_integer_element.is_some() {
            values.push(AnswerValue::Integer(self.value_integer));
        }
        if self.value_date.is_some() || self.value_date_element.is_some() {
            values.push(AnswerValue::Date(self.value_date));
        }
        if self.value_date_time.is_some() || self.value_date_time_element.is_some() {
            values.push(AnswerValue::DateTime(self.value_date_time));
        }
        if self.value_time.is_some() || self.value_time_element.is_some() {
            values.push(AnswerValue::Time(self.value_time));
        }
        if self.value_string.is_some() || self.value_string_element.is_some() {
            values.push(AnswerValue::String(self.value_string));
        }
        if self.value_uri.is_some() || self.value_uri_element.is_some() {
            values.push(AnswerValue::Uri(self.value_uri));
        }
        if let Some(attachment) = self.value_attachment {
            values.push(AnswerValue::Attachment(attachment));
        }
        if let Some(coding) = self.value_coding {
            values.push(AnswerValue::Coding(coding));
        }
        if let Some(quantity) = self.value_quantity {
            values.push(AnswerValue::Quantity(quantity));
        }
        if let Some(reference) = self.value_reference {
            values.push(AnswerValue::Reference(reference));
        }

        if values.len() > 1 {
            let types: Vec<_> = values.iter().map(AnswerValue::type_name).collect();
            return Err(DataCaptureError::model(
                DC0002,
                format!("Expected at most one value[x], found {}", types.join(", ")),
            ));
        }
        Ok(values.pop())
    }

    /// Expand a value into the choice; absent primitive payloads become an
    /// empty `_valueX` element so the value type survives a round trip
    pub(crate) fn from_value(value: Option<AnswerValue>) -> Self {
        let mut choice = Self::default();
        let Some(value) = value else {
            return choice;
        };

        match value {
            AnswerValue::Boolean(v) => {
                choice.value_boolean_element = v.is_none().then(Element::default);
                choice.value_boolean = v;
            }
            AnswerValue::Decimal(v) => {
                choice.value_decimal_element = v.is_none().then(Element::default);
                choice.value_decimal = v;
            }
            AnswerValue::Integer(v) => {
                choice.value_integer_element = v.is_none().then(Element::default);
                choice.value_integer = v;
            }
            AnswerValue::Date(v) => {
                choice.value_date_element = v.is_none().then(Element::default);
                choice.value_date = v;
            }
            AnswerValue::DateTime(v) => {
                choice.value_date_time_element = v.is_none().then(Element::default);
                choice.value_date_time = v;
            }
            AnswerValue::Time(v) => {
                choice.value_time_element = v.is_none().then(Element::default);
                choice.value_time = v;
            }
            AnswerValue::String(v) => {
                choice.value_string_element = v.is_none().then(Element::default);
                choice.value_string = v;
            }
            AnswerValue::Uri(v) => {
                choice.value_uri_element = v.is_none().then(Element::default);
                choice.value_uri = v;
            }
            AnswerValue::Attachment(v) => choice.value_attachment = Some(v),
            AnswerValue::Coding(v) => choice.value_coding = Some(v),
            AnswerValue::Quantity(v) => choice.value_quantity = Some(v),
            AnswerValue::Reference(v) => choice.value_reference = Some(v),
        }
        choice
    }
}
