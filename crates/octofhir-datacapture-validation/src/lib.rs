//! Questionnaire response validation
//!
//! This crate checks captured answers against their question definitions.
//!
//! - **Constraint validators**: one rule each (required, max/min length,
//!   min/max value, regex) behind the [`ConstraintValidator`] trait
//! - **Item validation**: runs a list of constraint validators independently
//!   on one question/answer pair and collects every result
//! - **Response validation**: pairs the items of a response with the items of
//!   its questionnaire by `linkId` and validates the whole tree
//! - **Messages**: error messages come from an injected [`StringResources`]
//!   lookup; [`MessageCatalog`] is the built-in implementation
//!
//! # Example
//!
//! ```
//! use octofhir_datacapture_model::{ItemType, QuestionnaireItem, QuestionnaireResponseItem};
//! use octofhir_datacapture_validation::{ConstraintValidator, MessageCatalog, RequiredConstraintValidator};
//!
//! let messages = MessageCatalog::english();
//! let question = QuestionnaireItem::new("q1", ItemType::String).required(true);
//! let answer = QuestionnaireResponseItem::new("q1");
//!
//! let result = RequiredConstraintValidator.validate(&question, &answer, &messages);
//! assert!(!result.is_valid);
//! assert_eq!(result.error_message.as_deref(), Some("Missing answer for required field."));
//! ```
//!
//! A failed constraint is a [`ValidationResult`] value, never an error.
//! `Result` errors are reserved for responses that do not fit their
//! questionnaire at all.

pub mod compare;
pub mod constraint;
pub mod item;
pub mod messages;
pub mod response;
pub mod result;

pub use constraint::{
    ConstraintValidator, MaxLengthConstraintValidator, MaxValueConstraintValidator,
    MinLengthConstraintValidator, MinValueConstraintValidator, RegexConstraintValidator,
    RequiredConstraintValidator,
};
pub use item::{ItemValidation, QuestionnaireResponseItemValidator, ValidatorBuilder};
pub use messages::{LookupFn, MessageCatalog, StringResources, message};
pub use response::{QuestionnaireResponseValidator, ValidationReport};
pub use result::ValidationResult;
