//! FHIR questionnaire data capture
//!
//! This crate bundles the data capture core:
//! - The FHIR R4 questionnaire model ([`model`])
//! - Constraint validation of captured answers ([`validation`])
//! - Display formatting of answers ([`views`])
//! - Error codes and item paths ([`diagnostics`])
//!
//! # Example
//!
//! ```
//! use octofhir_datacapture::{
//!     AnswerValue, ConstraintValidator, ItemType, MessageCatalog, QuestionnaireItem,
//!     QuestionnaireResponseItem, RequiredConstraintValidator, answer_string,
//! };
//!
//! let question = QuestionnaireItem::new("smoker", ItemType::Boolean).required(true);
//! let response = QuestionnaireResponseItem::new("smoker").with_answer(AnswerValue::boolean(true));
//!
//! let result = RequiredConstraintValidator.validate(&question, &response, &MessageCatalog::english());
//! assert!(result.is_valid);
//! assert_eq!(answer_string(&response), "Yes");
//! ```

// Re-export all public APIs from internal crates
pub use octofhir_datacapture_diagnostics as diagnostics;
pub use octofhir_datacapture_model as model;
pub use octofhir_datacapture_validation as validation;
pub use octofhir_datacapture_views as views;

// Convenience re-exports
pub use octofhir_datacapture_diagnostics::{DataCaptureError, ErrorCode, ItemPath, Result};
pub use octofhir_datacapture_model::{
    Answer, AnswerValue, ItemType, Questionnaire, QuestionnaireItem, QuestionnaireResponse,
    QuestionnaireResponseItem,
};
pub use octofhir_datacapture_validation::{
    ConstraintValidator, MessageCatalog, QuestionnaireResponseItemValidator,
    QuestionnaireResponseValidator, RequiredConstraintValidator, StringResources,
    ValidationReport, ValidationResult,
};
pub use octofhir_datacapture_views::{
    NOT_ANSWERED, QuestionnaireResponseItemViewItem, answer_string, view_items,
};

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
