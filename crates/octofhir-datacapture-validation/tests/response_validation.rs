//! End-to-end validation of FHIR JSON questionnaire responses

use octofhir_datacapture_diagnostics::{DC0101, DC0104, DataCaptureError, ItemPath};
use octofhir_datacapture_model::{Questionnaire, QuestionnaireResponse};
use octofhir_datacapture_validation::{
    MessageCatalog, QuestionnaireResponseItemValidator, QuestionnaireResponseValidator,
    RequiredConstraintValidator, ValidationResult,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

const QUESTIONNAIRE: &str = r#"{
  "resourceType": "Questionnaire",
  "url": "http://example.org/Questionnaire/vitals",
  "status": "active",
  "item": [
    { "linkId": "intro", "type": "display", "text": "Please fill in your vitals" },
    { "linkId": "name", "type": "string", "text": "Name", "required": true, "maxLength": 10 },
    {
      "linkId": "age", "type": "integer", "text": "Age",
      "extension": [
        { "url": "http://hl7.org/fhir/StructureDefinition/minValue", "valueInteger": 0 },
        { "url": "http://hl7.org/fhir/StructureDefinition/maxValue", "valueInteger": 120 }
      ]
    },
    {
      "linkId": "zip", "type": "string", "text": "Postal code",
      "extension": [
        { "url": "http://hl7.org/fhir/StructureDefinition/regex", "valueString": "[0-9]{5}" }
      ]
    },
    {
      "linkId": "smoker", "type": "boolean", "text": "Do you smoke?",
      "item": [
        { "linkId": "packs", "type": "integer", "text": "Packs per day", "required": true }
      ]
    },
    {
      "linkId": "medication", "type": "group", "repeats": true,
      "item": [
        { "linkId": "drug", "type": "string", "required": true }
      ]
    }
  ]
}"#;

fn questionnaire() -> Questionnaire {
    Questionnaire::from_json(QUESTIONNAIRE).unwrap()
}

fn response(items: &str) -> QuestionnaireResponse {
    QuestionnaireResponse::from_json(&format!(
        r#"{{
          "resourceType": "QuestionnaireResponse",
          "questionnaire": "http://example.org/Questionnaire/vitals",
          "status": "completed",
          "item": {items}
        }}"#
    ))
    .unwrap()
}

fn messages_at(report: &octofhir_datacapture_validation::ValidationReport, path: &str) -> Vec<String> {
    report
        .get(&ItemPath::from(path))
        .map(|item| item.error_messages().map(str::to_string).collect())
        .unwrap_or_default()
}

#[test]
fn test_valid_response() {
    let response = response(
        r#"[
          { "linkId": "name", "answer": [{ "valueString": "Ann" }] },
          { "linkId": "age", "answer": [{ "valueInteger": 42 }] },
          { "linkId": "zip", "answer": [{ "valueString": "12345" }] },
          {
            "linkId": "smoker",
            "answer": [{
              "valueBoolean": true,
              "item": [{ "linkId": "packs", "answer": [{ "valueInteger": 1 }] }]
            }]
          },
          { "linkId": "medication", "item": [{ "linkId": "drug", "answer": [{ "valueString": "aspirin" }] }] },
          { "linkId": "medication", "item": [{ "linkId": "drug", "answer": [{ "valueString": "ibuprofen" }] }] }
        ]"#,
    );

    let report = QuestionnaireResponseValidator::default()
        .validate(&questionnaire(), &response)
        .unwrap();

    assert!(report.is_valid(), "{report:?}");
    let paths: Vec<String> = report.items().iter().map(|i| i.path.to_string()).collect();
    assert_eq!(
        paths,
        vec![
            "name",
            "age",
            "zip",
            "smoker",
            "smoker/packs",
            "medication/drug",
            "medication/drug",
        ]
    );
}

#[test]
fn test_constraint_failures_are_reported_per_item() {
    let response = response(
        r#"[
          { "linkId": "name", "answer": [{ "valueString": "Bartholomew Jr" }] },
          { "linkId": "age", "answer": [{ "valueInteger": 130 }] },
          { "linkId": "zip", "answer": [{ "valueString": "1234a" }] }
        ]"#,
    );

    let report = QuestionnaireResponseValidator::default()
        .validate(&questionnaire(), &response)
        .unwrap();

    assert!(!report.is_valid());
    assert_eq!(
        messages_at(&report, "name"),
        vec!["The maximum number of characters that are permitted in the answer is: 10"]
    );
    assert_eq!(messages_at(&report, "age"), vec!["Maximum value allowed is: 120"]);
    assert_eq!(
        messages_at(&report, "zip"),
        vec!["The answer doesn't match regular expression: [0-9]{5}"]
    );
    // smoker was never answered, so its nested packs question is not checked
    assert!(report.get(&ItemPath::from("smoker/packs")).is_none());
    // the missing medication group still has its required child validated
    assert_eq!(
        messages_at(&report, "medication/drug"),
        vec!["Missing answer for required field."]
    );
}

#[test]
fn test_nested_answer_items_are_validated() {
    let response = response(
        r#"[
          { "linkId": "name", "answer": [{ "valueString": "Ann" }] },
          { "linkId": "smoker", "answer": [{ "valueBoolean": true, "item": [{ "linkId": "packs" }] }] },
          { "linkId": "medication", "item": [{ "linkId": "drug", "answer": [{ "valueString": "none" }] }] }
        ]"#,
    );

    let report = QuestionnaireResponseValidator::default()
        .validate(&questionnaire(), &response)
        .unwrap();

    let invalid: Vec<String> = report.invalid_items().map(|i| i.path.to_string()).collect();
    assert_eq!(invalid, vec!["smoker/packs"]);
}

#[test]
fn test_localized_messages() {
    let catalog = MessageCatalog::from_json_str(
        r#"{ "required_constraint_validation_error_msg": "Antwort fehlt." }"#,
    )
    .unwrap();
    let validator = QuestionnaireResponseValidator::new(Arc::new(catalog));

    let report = validator
        .validate(&questionnaire(), &response("[]"))
        .unwrap();

    assert_eq!(messages_at(&report, "name"), vec!["Antwort fehlt."]);
}

#[test]
fn test_custom_item_validator() {
    let validator = QuestionnaireResponseValidator::default().with_item_validator(
        QuestionnaireResponseItemValidator::builder()
            .with(RequiredConstraintValidator)
            .build(),
    );
    let response = response(r#"[{ "linkId": "age", "answer": [{ "valueInteger": 500 }] }]"#);

    let report = validator.validate(&questionnaire(), &response).unwrap();
    let by_link_id = report.by_link_id();

    assert_eq!(by_link_id["age"], vec![ValidationResult::valid()]);
    assert_eq!(
        by_link_id["name"],
        vec![ValidationResult::invalid("Missing answer for required field.")]
    );
}

#[test]
fn test_structural_errors() {
    let response = response(
        r#"[
          { "linkId": "name", "answer": [{ "valueString": "Ann" }] },
          { "linkId": "name", "answer": [{ "valueString": "Bob" }] },
          { "linkId": "weight", "answer": [{ "valueDecimal": 70.5 }] }
        ]"#,
    );

    let err = QuestionnaireResponseValidator::default()
        .validate(&questionnaire(), &response)
        .unwrap_err();

    let DataCaptureError::Multiple(errors) = err else {
        panic!("expected multiple errors");
    };
    let found: Vec<_> = errors
        .iter()
        .map(|e| (e.code(), e.path().map(ToString::to_string)))
        .collect();
    assert_eq!(
        found,
        vec![
            (DC0104, Some("name".to_string())),
            (DC0101, Some("weight".to_string())),
        ]
    );
}

#[test]
fn test_report_serializes_as_json_array() {
    let report = QuestionnaireResponseValidator::default()
        .validate(&questionnaire(), &response(r#"[{ "linkId": "name", "answer": [{ "valueString": "Ann" }] }]"#))
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json[0]["path"], "name");
    assert_eq!(json[0]["results"][0]["isValid"], true);
    assert!(json[0]["results"][0].get("errorMessage").is_none());
}
