//! Data capture diagnostics and error handling
//!
//! This crate provides the error handling infrastructure shared by the
//! questionnaire model, validation and view crates: structured error codes,
//! item paths locating a questionnaire item, and the common error type.

mod error;
mod error_code;
mod path;

pub use error::*;
pub use error_code::*;
pub use path::*;

/// Result type for data capture operations
pub type Result<T> = std::result::Result<T, DataCaptureError>;
