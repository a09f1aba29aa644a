//! Display of captured answers
//!
//! Turns response items into the strings shown when a completed
//! questionnaire is reviewed. Formatting is total: any answer that has
//! nothing displayable renders as [`NOT_ANSWERED`].

pub mod format;
pub mod view_item;

pub use format::{NOT_ANSWERED, answer_display, answer_string};
pub use view_item::{QuestionnaireResponseItemViewItem, view_items};
