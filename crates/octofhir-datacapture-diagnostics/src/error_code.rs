//! Data capture error codes following a structured numbering system
//!
//! Error code ranges:
//! - DC0001-DC0099: Model errors (FHIR JSON, primitive formats)
//! - DC0100-DC0199: Validation errors (questionnaire/response structure)
//! - DC0200-DC0299: Resource errors (message catalogs)
//! - DC0400-DC0499: System errors (I/O, configuration)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a model error (0001-0099)
    pub const fn is_model_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is a validation error (0100-0199)
    pub const fn is_validation_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is a resource error (0200-0299)
    pub const fn is_resource_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is a system error (0400-0499)
    pub const fn is_system_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DC{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Model errors (0001-0099)
    map.insert(1, ErrorInfo::new("Invalid FHIR JSON"));
    map.insert(2, ErrorInfo::new("Multiple value[x] elements")
        .with_help("An answer or extension carries at most one value[x] element"));
    map.insert(3, ErrorInfo::new("Invalid date format")
        .with_help("Expected YYYY, YYYY-MM or YYYY-MM-DD"));
    map.insert(4, ErrorInfo::new("Invalid dateTime format")
        .with_help("Expected YYYY[-MM[-DD[Thh:mm:ss[.fff](Z|+hh:mm)]]]"));
    map.insert(5, ErrorInfo::new("Invalid time format")
        .with_help("Expected hh:mm:ss[.fff]"));
    map.insert(6, ErrorInfo::new("Unknown questionnaire item type"));
    map.insert(7, ErrorInfo::new("Unsupported extension value"));

    // Validation errors (0100-0199)
    map.insert(100, ErrorInfo::new("Questionnaire mismatch")
        .with_help("QuestionnaireResponse.questionnaire must reference Questionnaire.url"));
    map.insert(101, ErrorInfo::new("Unknown linkId")
        .with_help("Every response item must match a questionnaire item at the same level"));
    map.insert(102, ErrorInfo::new("Answer on a group item"));
    map.insert(103, ErrorInfo::new("Multiple answers for a non-repeating item")
        .with_help("Set Questionnaire.item.repeats to allow more than one answer"));
    map.insert(104, ErrorInfo::new("Duplicate response item"));

    // Resource errors (0200-0299)
    map.insert(200, ErrorInfo::new("Invalid message catalog")
        .with_help("A message catalog is a flat JSON object of message id to template"));
    map.insert(201, ErrorInfo::new("Message catalog already installed"));

    // System errors (0400-0499)
    map.insert(400, ErrorInfo::new("I/O error"));
    map.insert(401, ErrorInfo::new("Serialization error"));

    map
});

// Model errors
pub const DC0001: ErrorCode = ErrorCode::new(1);
pub const DC0002: ErrorCode = ErrorCode::new(2);
pub const DC0003: ErrorCode = ErrorCode::new(3);
pub const DC0004: ErrorCode = ErrorCode::new(4);
pub const DC0005: ErrorCode = ErrorCode::new(5);
pub const DC0006: ErrorCode = ErrorCode::new(6);
pub const DC0007: ErrorCode = ErrorCode::new(7);

// Validation errors
pub const DC0100: ErrorCode = ErrorCode::new(100);
pub const DC0101: ErrorCode = ErrorCode::new(101);
pub const DC0102: ErrorCode = ErrorCode::new(102);
pub const DC0103: ErrorCode = ErrorCode::new(103);
pub const DC0104: ErrorCode = ErrorCode::new(104);

// Resource errors
pub const DC0200: ErrorCode = ErrorCode::new(200);
pub const DC0201: ErrorCode = ErrorCode::new(201);

// System errors
pub const DC0400: ErrorCode = ErrorCode::new(400);
pub const DC0401: ErrorCode = ErrorCode::new(401);
