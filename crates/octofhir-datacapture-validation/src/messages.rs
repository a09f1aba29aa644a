//! Localized validation messages
//!
//! Validators never hard-code message text. They look a message id up in a
//! [`StringResources`] implementation handed to them by the caller. The
//! built-in [`MessageCatalog`] carries the English texts and can be
//! overridden from a flat JSON object of message id to template.
//!
//! Templates use positional `{0}`, `{1}`, ... placeholders.

use octofhir_datacapture_diagnostics::{DC0200, DC0201, DataCaptureError, Result};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;
use std::sync::{Arc, LazyLock, OnceLock};

pub const REQUIRED_CONSTRAINT_VALIDATION_ERROR_MSG: &str = "required_constraint_validation_error_msg";
pub const MAX_LENGTH_VALIDATION_ERROR_MSG: &str = "max_length_validation_error_msg";
pub const MIN_LENGTH_VALIDATION_ERROR_MSG: &str = "min_length_validation_error_msg";
pub const MIN_VALUE_VALIDATION_ERROR_MSG: &str = "min_value_validation_error_msg";
pub const MAX_VALUE_VALIDATION_ERROR_MSG: &str = "max_value_validation_error_msg";
pub const REGEX_VALIDATION_ERROR_MSG: &str = "regex_validation_error_msg";

static ENGLISH: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    map.insert(REQUIRED_CONSTRAINT_VALIDATION_ERROR_MSG, "Missing answer for required field.");
    map.insert(
        MAX_LENGTH_VALIDATION_ERROR_MSG,
        "The maximum number of characters that are permitted in the answer is: {0}",
    );
    map.insert(
        MIN_LENGTH_VALIDATION_ERROR_MSG,
        "The minimum number of characters that are permitted in the answer is: {0}",
    );
    map.insert(MIN_VALUE_VALIDATION_ERROR_MSG, "Minimum value allowed is: {0}");
    map.insert(MAX_VALUE_VALIDATION_ERROR_MSG, "Maximum value allowed is: {0}");
    map.insert(REGEX_VALIDATION_ERROR_MSG, "The answer doesn't match regular expression: {0}");
    map
});

static GLOBAL: OnceLock<Arc<MessageCatalog>> = OnceLock::new();

/// Lookup of localized message templates by message id
pub trait StringResources: Send + Sync {
    /// Template for `key`, `None` when this source has no such message
    fn get_string(&self, key: &str) -> Option<Cow<'_, str>>;
}

/// Adapts a plain lookup function into [`StringResources`]
pub struct LookupFn<F>(pub F);

impl<F> StringResources for LookupFn<F>
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn get_string(&self, key: &str) -> Option<Cow<'_, str>> {
        (self.0)(key).map(Cow::Owned)
    }
}

impl StringResources for HashMap<String, String> {
    fn get_string(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|s| Cow::Borrowed(s.as_str()))
    }
}

/// Resolve message `key` and fill in its placeholders
///
/// Falls back to the built-in English template and finally to the key
/// itself, so the result is never empty.
pub fn message(resources: &dyn StringResources, key: &str, args: &[&dyn Display]) -> String {
    let template = resources
        .get_string(key)
        .filter(|template| !template.is_empty())
        .or_else(|| {
            log::debug!("No message for '{}', using built-in text", key);
            ENGLISH.get(key).map(|s| Cow::Borrowed(*s))
        })
        .unwrap_or(Cow::Borrowed(key));
    format_template(&template, args)
}

/// Substitute `{n}` placeholders; unknown placeholders are kept verbatim
fn format_template(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let substituted = after.find('}').and_then(|end| {
            let index: usize = after[..end].parse().ok()?;
            let arg = args.get(index)?;
            Some((arg.to_string(), end))
        });
        match substituted {
            Some((value, end)) => {
                out.push_str(&value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// A table of message templates keyed by message id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    /// A catalog without any messages (lookups fall back to English)
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in English catalog
    pub fn english() -> Self {
        Self {
            messages: ENGLISH
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    /// Set one message template
    pub fn with(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.messages.insert(key.into(), template.into());
        self
    }

    /// Overlay another catalog on top of this one
    pub fn merge(mut self, other: MessageCatalog) -> Self {
        self.messages.extend(other.messages);
        self
    }

    /// Parse a flat JSON object of message id to template
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| DataCaptureError::resource(DC0200, e.to_string()))?;
        let Value::Object(entries) = value else {
            return Err(DataCaptureError::resource(
                DC0200,
                "Message catalog must be a JSON object",
            ));
        };

        let mut messages = HashMap::with_capacity(entries.len());
        for (key, value) in entries {
            match value {
                Value::String(template) => {
                    messages.insert(key, template);
                }
                other => {
                    return Err(DataCaptureError::resource_key(
                        DC0200,
                        key.clone(),
                        format!("Message '{key}' must be a string, found {other}"),
                    ));
                }
            }
        }
        Ok(Self { messages })
    }

    /// Read a catalog file; entries override the English defaults
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| DataCaptureError::io(&e, format!("reading {}", path.display())))?;
        let overrides = Self::from_json_str(&json)?;
        log::debug!("Loaded {} messages from {}", overrides.len(), path.display());
        Ok(Self::english().merge(overrides))
    }

    /// Number of templates in this catalog
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Install this catalog as the process-wide catalog
    ///
    /// Can only happen once; later calls fail with the catalog unchanged.
    pub fn install(self) -> Result<Arc<MessageCatalog>> {
        let catalog = Arc::new(self);
        GLOBAL
            .set(Arc::clone(&catalog))
            .map_err(|_| DataCaptureError::resource(DC0201, "A message catalog is already installed"))?;
        Ok(catalog)
    }

    /// The process-wide catalog, English when none was installed
    pub fn global() -> Arc<MessageCatalog> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::english())))
    }
}

impl StringResources for MessageCatalog {
    fn get_string(&self, key: &str) -> Option<Cow<'_, str>> {
        self.messages.get(key).map(|s| Cow::Borrowed(s.as_str()))
    }
}
