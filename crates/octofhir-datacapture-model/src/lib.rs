//! FHIR R4 questionnaire model for data capture
//!
//! This crate defines the subset of the FHIR R4 model the data capture core
//! works on:
//! - `Questionnaire` and its item tree (question definitions)
//! - `QuestionnaireResponse` and its item tree (captured answers)
//! - The answer `value[x]` choice as the [`AnswerValue`] sum type
//! - Partial-precision temporal primitives (date, dateTime, time)
//!
//! All types deserialize from and serialize to FHIR JSON.

pub mod answer;
pub mod datatypes;
pub mod questionnaire;
pub mod response;
pub mod temporal;

pub use answer::{Answer, AnswerValue};
pub use datatypes::{Attachment, Coding, Element, Extension, Quantity, Reference};
pub use questionnaire::{ItemType, Questionnaire, QuestionnaireItem};
pub use response::{QuestionnaireResponse, QuestionnaireResponseItem, ResponseStatus};
pub use temporal::{DateTimePrecision, FhirDate, FhirDateTime, FhirTime, TimeZoneOffset};

pub use octofhir_datacapture_diagnostics::{DataCaptureError, Result};
pub use rust_decimal::Decimal;
