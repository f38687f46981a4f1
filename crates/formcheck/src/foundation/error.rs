//! Error types
//!
//! Field invalidity is never an error value: it is reported through messages
//! and the form's validity flag. The types here cover the two other failure
//! kinds:
//!
//! - [`OptionsError`]: the caller handed in structurally invalid evaluation
//!   options. A programming mistake, returned to the caller.
//! - [`CallbackError`]: a rule callback (validator, message text, whole-form
//!   validator) could not produce a result. Recovered inside the evaluator and
//!   turned into an internal validation message.

use std::borrow::Cow;

use serde_json::Value;

/// Returns a short name for the JSON type of `value`, used in error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Error raised while parsing evaluation options.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    /// The options value is not a JSON object.
    #[error("evaluation options must be an object, found {found}")]
    NotAnObject {
        /// JSON type that was found instead.
        found: &'static str,
    },

    /// The options object contains a key that is not a recognized option.
    #[error("unknown evaluation option '{0}'")]
    UnknownOption(String),

    /// A recognized option has the wrong type.
    #[error("option '{option}' must be {expected}, found {found}")]
    InvalidOption {
        /// Name of the option.
        option: &'static str,
        /// Human-readable description of the accepted shape.
        expected: &'static str,
        /// JSON type that was found instead.
        found: &'static str,
    },

    /// `setFilled` is neither a key, a list of keys nor a map of booleans.
    #[error("option 'setFilled' must be a field key, a list of keys or a map of booleans, found {found}")]
    InvalidSetFilled {
        /// Description of the offending shape.
        found: String,
    },

    /// The options text is not valid JSON.
    #[error("invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl OptionsError {
    /// Convenience constructor for [`OptionsError::InvalidOption`].
    pub fn invalid_option(option: &'static str, expected: &'static str, found: &Value) -> Self {
        Self::InvalidOption {
            option,
            expected,
            found: value_kind(found),
        }
    }

    /// Convenience constructor for [`OptionsError::InvalidSetFilled`].
    pub fn invalid_set_filled(found: impl Into<String>) -> Self {
        Self::InvalidSetFilled {
            found: found.into(),
        }
    }
}

/// Failure reported by a user-supplied rule callback.
///
/// # Examples
///
/// ```rust,ignore
/// use formcheck::prelude::*;
///
/// let rule = FieldRule::new().try_validate(|value, _data| {
///     let n = value.as_i64().ok_or_else(|| CallbackError::new("expected a number"))?;
///     Ok(Verdict::check(n > 10, ValidationMessage::error("Too small")))
/// });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CallbackError {
    message: Cow<'static, str>,
}

impl CallbackError {
    /// Creates a callback error with the given detail.
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure detail.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&'static str> for CallbackError {
    fn from(message: &'static str) -> Self {
        Self::new(message)
    }
}

impl From<String> for CallbackError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<serde_json::Error> for CallbackError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(error.to_string())
    }
}

/// Error raised by [`Form`](crate::form::Form) accessors.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// The form values do not deserialize into the requested type.
    #[error("form values do not match the requested type: {0}")]
    ValuesMismatch(#[source] serde_json::Error),
}
