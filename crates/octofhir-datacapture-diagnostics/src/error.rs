//! Data capture error types

use crate::{DC0400, ErrorCode, ItemPath};
use thiserror::Error;

/// Main data capture error type
///
/// Constraint violations are never reported through this type; they are
/// ordinary validation results. Errors describe input that cannot be
/// interpreted at all: malformed resources, responses that do not fit their
/// questionnaire, unreadable message catalogs.
#[derive(Debug, Clone, Error)]
pub enum DataCaptureError {
    /// Model error (malformed FHIR JSON or primitive value)
    #[error("{code}: {message}")]
    Model {
        code: ErrorCode,
        message: String,
        resource_type: Option<String>,
        context: Option<String>,
    },

    /// Structural validation error (response does not fit the questionnaire)
    #[error("{code}: {message}{}", path_suffix(.path))]
    Validation {
        code: ErrorCode,
        message: String,
        path: Option<ItemPath>,
        context: Option<String>,
    },

    /// Message resource error
    #[error("{code}: {message}")]
    Resource {
        code: ErrorCode,
        message: String,
        key: Option<String>,
    },

    /// System error
    #[error("{code}: {message}")]
    System {
        code: ErrorCode,
        message: String,
        context: Option<String>,
    },

    /// Multiple errors collected
    #[error("Multiple errors: {}", .0.len())]
    Multiple(Vec<DataCaptureError>),
}

fn path_suffix(path: &Option<ItemPath>) -> String {
    match path {
        Some(path) if !path.is_root() => format!(" (at {path})"),
        _ => String::new(),
    }
}

impl DataCaptureError {
    /// Create a model error
    pub fn model(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Model {
            code,
            message: message.into(),
            resource_type: None,
            context: None,
        }
    }

    /// Create a model error for a specific resource type
    pub fn model_in(
        code: ErrorCode,
        resource_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Model {
            code,
            message: message.into(),
            resource_type: Some(resource_type.into()),
            context: None,
        }
    }

    /// Create a structural validation error
    pub fn validation(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            path: None,
            context: None,
        }
    }

    /// Create a structural validation error located at an item
    pub fn validation_at(code: ErrorCode, message: impl Into<String>, path: ItemPath) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            path: Some(path),
            context: None,
        }
    }

    /// Create a message resource error
    pub fn resource(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Resource {
            code,
            message: message.into(),
            key: None,
        }
    }

    /// Create a message resource error for a message id
    pub fn resource_key(code: ErrorCode, key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Resource {
            code,
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Create a system error
    pub fn system(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::System {
            code,
            message: message.into(),
            context: None,
        }
    }

    /// Create a system error from an I/O failure
    pub fn io(error: &std::io::Error, context: impl Into<String>) -> Self {
        Self::System {
            code: DC0400,
            message: error.to_string(),
            context: Some(context.into()),
        }
    }

    /// Attach context information (ignored for resource and multiple errors)
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        match &mut self {
            Self::Model { context, .. }
            | Self::Validation { context, .. }
            | Self::System { context, .. } => *context = Some(ctx.into()),
            Self::Resource { .. } | Self::Multiple(_) => {}
        }
        self
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Model { code, .. } => *code,
            Self::Validation { code, .. } => *code,
            Self::Resource { code, .. } => *code,
            Self::System { code, .. } => *code,
            Self::Multiple(errors) => errors.first().map(|e| e.code()).unwrap_or(ErrorCode::new(0)),
        }
    }

    /// Get the item path if available
    pub fn path(&self) -> Option<&ItemPath> {
        match self {
            Self::Validation { path, .. } => path.as_ref(),
            _ => None,
        }
    }

    /// Get the context if available
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Model { context, .. }
            | Self::Validation { context, .. }
            | Self::System { context, .. } => context.as_deref(),
            _ => None,
        }
    }

    /// Collapse a list of errors: `None` when empty, the error itself when
    /// there is exactly one, `Multiple` otherwise
    pub fn from_many(mut errors: Vec<DataCaptureError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::Multiple(errors)),
        }
    }
}
