//! CLI functionality for the datacapture tool
//!
//! - Response validation
//! - Answer listing
//! - Resource loading
//! - Output formatting and logging

pub mod answers;
pub mod input;
pub mod logger;
pub mod output;
pub mod validate;
