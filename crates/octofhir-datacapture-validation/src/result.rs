//! Outcome of a single constraint check

use serde::{Deserialize, Serialize};

/// Result of validating one response item against one constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ValidationResult {
    /// A passing result
    pub const fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: None,
        }
    }

    /// A failing result with its message
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error_message: Some(message.into()),
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}
