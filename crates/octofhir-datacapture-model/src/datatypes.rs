//! FHIR general-purpose datatypes used as answer values

use crate::answer::{AnswerValue, ChoiceValue};
use octofhir_datacapture_diagnostics::DataCaptureError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Id and extensions of a primitive value (the JSON `_valueX` companion)
///
/// A primitive answer may carry only this element and no value at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,
}

/// A code from a code system
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_selected: Option<bool>,
}

impl Coding {
    /// Create a coding from system, code and display
    pub fn new(
        system: impl Into<String>,
        code: impl Into<String>,
        display: Option<impl Into<String>>,
    ) -> Self {
        Self {
            system: Some(system.into()),
            code: Some(code.into()),
            display: display.map(Into::into),
            ..Self::default()
        }
    }

    /// Label shown to users: the display text, falling back to the code
    pub fn display_string(&self) -> Option<&str> {
        self.display
            .as_deref()
            .filter(|display| !display.is_empty())
            .or(self.code.as_deref())
    }
}

/// A measured amount
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quantity {
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float_option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Decimal>,
    /// `<`, `<=`, `>=` or `>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Quantity {
    /// Create a quantity with a value and unit
    pub fn new(value: Decimal, unit: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            unit: Some(unit.into()),
            ..Self::default()
        }
    }

    /// Create a unitless quantity
    pub fn unitless(value: Decimal) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// Unit identity used for comparisons: the coded unit, else the human unit
    pub fn unit_key(&self) -> Option<(&str, &str)> {
        match (&self.system, &self.code) {
            (Some(system), Some(code)) => Some((system.as_str(), code.as_str())),
            _ => self.unit.as_deref().map(|unit| ("", unit)),
        }
    }

    /// Check if quantities have compatible units
    pub fn is_compatible_with(&self, other: &Self) -> bool {
        self.unit_key() == other.unit_key()
    }
}

/// Content in a format defined elsewhere, usually referenced by URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Base64 encoded data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation: Option<String>,
}

impl Attachment {
    /// Attachment referencing content by URL
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }
}

/// A reference to another resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// A FHIR extension: a URL-identified value attached to an element
///
/// The value uses the same `value[x]` choice as answers; value types outside
/// that choice are ignored and leave `value` empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawExtension", into = "RawExtension")]
pub struct Extension {
    pub url: String,
    pub value: Option<AnswerValue>,
    /// Sub-extensions of a complex extension
    pub extension: Vec<Extension>,
}

impl Extension {
    /// Create an extension with a value
    pub fn new(url: impl Into<String>, value: AnswerValue) -> Self {
        Self {
            url: url.into(),
            value: Some(value),
            extension: Vec::new(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct RawExtension {
    url: String,
    #[serde(flatten)]
    value: ChoiceValue,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    extension: Vec<Extension>,
}

impl TryFrom<RawExtension> for Extension {
    type Error = DataCaptureError;

    fn try_from(raw: RawExtension) -> Result<Self, Self::Error> {
        let value = raw
            .value
            .into_value()
            .map_err(|e| e.with_context(format!("in extension '{}'", raw.url)))?;
        Ok(Self {
            url: raw.url,
            value,
            extension: raw.extension,
        })
    }
}

impl From<Extension> for RawExtension {
    fn from(extension: Extension) -> Self {
        Self {
            url: extension.url,
            value: ChoiceValue::from_value(extension.value),
            extension: extension.extension,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_coding_display_string() {
        let coding = Coding::new("http://loinc.org", "LA33-6", Some("Yes"));
        assert_eq!(coding.display_string(), Some("Yes"));

        let code_only = Coding {
            code: Some("LA32-8".to_string()),
            display: Some(String::new()),
            ..Coding::default()
        };
        assert_eq!(code_only.display_string(), Some("LA32-8"));

        assert_eq!(Coding::default().display_string(), None);
    }

    #[test]
    fn test_quantity_compatibility() {
        let kg = Quantity {
            system: Some("http://unitsofmeasure.org".to_string()),
            code: Some("kg".to_string()),
            ..Quantity::new(Decimal::from(70), "kilogram")
        };
        let kg2 = Quantity {
            system: Some("http://unitsofmeasure.org".to_string()),
            code: Some("kg".to_string()),
            ..Quantity::new(Decimal::from(80), "kilograms")
        };
        assert!(kg.is_compatible_with(&kg2));
        assert!(!kg.is_compatible_with(&Quantity::new(Decimal::from(70), "kg")));
        assert!(Quantity::unitless(Decimal::ONE).is_compatible_with(&Quantity::unitless(Decimal::TEN)));
    }

    #[test]
    fn test_extension_json() {
        let json = r#"{"url":"http://hl7.org/fhir/StructureDefinition/minValue","valueInteger":3}"#;
        let extension: Extension = serde_json::from_str(json).unwrap();
        assert_eq!(extension.value, Some(AnswerValue::Integer(Some(3))));
        assert_eq!(serde_json::to_string(&extension).unwrap(), json);
    }

    #[test]
    fn test_extension_with_unsupported_value_type() {
        let json = r#"{"url":"http://example.org/ext","valueCode":"abc"}"#;
        let extension: Extension = serde_json::from_str(json).unwrap();
        assert_eq!(extension.value, None);
    }
}
