//! Validation messages attached to fields and to the whole form
//!
//! A field carries at most one [`ValidationMessage`]. The message has a
//! [`Severity`], an optional numeric [`MessageCode`] and the text shown to the
//! user. Only the `Error` severity (see [`Severity::is_blocking`]) makes a
//! form invalid.
//!
//! Text uses `Cow<'static, str>` so static messages (the common case) need no
//! allocation.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Text shown for a missing required field when neither the field rule nor
/// the rule set's default messages provide one.
pub const DEFAULT_REQUIRED_FIELD_TEXT: &str = "This field is required";

// ============================================================================
// SEVERITY
// ============================================================================

/// Severity level of a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The field or form contains an error. Any message with this severity
    /// makes the form invalid.
    #[default]
    Error,
    /// The user should be warned. The form can still be valid.
    Warning,
    /// The user should be hinted. The form can still be valid.
    Hint,
    /// A rule callback failed while evaluating. The failure detail is the
    /// message text. The severity itself does not affect validity; the
    /// evaluator invalidates the form for the failure.
    ValidationError,
}

impl Severity {
    /// Returns true if a message of this severity makes the form invalid.
    /// Only [`Severity::Error`] does.
    #[must_use]
    pub fn is_blocking(self) -> bool {
        matches!(self, Self::Error)
    }

    /// Wire name of the severity.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Hint => "hint",
            Self::ValidationError => "validation_error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// MESSAGE CODE
// ============================================================================

/// Numeric code classifying where a message came from.
///
/// Serialized as its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum MessageCode {
    /// No particular classification.
    None = 0,
    /// A required field has no value.
    FieldIsRequired = 1,
    /// Produced by a user-defined validator.
    Custom = 100,
    /// A rule lookup named a field that has no rule.
    InternalFieldNotFound = 1000,
    /// A rule callback failed.
    InternalError = 9999,
}

impl From<MessageCode> for u16 {
    fn from(code: MessageCode) -> Self {
        code as Self
    }
}

impl TryFrom<u16> for MessageCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::FieldIsRequired),
            100 => Ok(Self::Custom),
            1000 => Ok(Self::InternalFieldNotFound),
            9999 => Ok(Self::InternalError),
            other => Err(format!("unknown message code {other}")),
        }
    }
}

// ============================================================================
// VALIDATION MESSAGE
// ============================================================================

/// A message produced while validating a field or the whole form.
///
/// # Examples
///
/// ```rust,ignore
/// use formcheck::foundation::{MessageCode, ValidationMessage};
///
/// let msg = ValidationMessage::error("Must match the password")
///     .with_code(MessageCode::Custom);
/// assert!(msg.is_blocking());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationMessage {
    /// Severity of the message.
    #[serde(rename = "type")]
    pub severity: Severity,

    /// Optional classification code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<MessageCode>,

    /// Text shown to the user.
    #[serde(rename = "message")]
    pub text: Cow<'static, str>,
}

impl ValidationMessage {
    /// Creates a message with the given severity and no code.
    pub fn new(severity: Severity, text: impl Into<Cow<'static, str>>) -> Self {
        Self {
            severity,
            code: None,
            text: text.into(),
        }
    }

    /// Creates an error-severity message.
    pub fn error(text: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Severity::Error, text)
    }

    /// Creates a warning-severity message.
    pub fn warning(text: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Severity::Warning, text)
    }

    /// Creates a hint-severity message.
    pub fn hint(text: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Severity::Hint, text)
    }

    /// Creates the message recorded for a missing required field.
    pub fn required(text: impl Into<Cow<'static, str>>) -> Self {
        Self::error(text).with_code(MessageCode::FieldIsRequired)
    }

    /// Creates the message recorded when a rule callback fails.
    pub fn internal_error(detail: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Severity::ValidationError, detail).with_code(MessageCode::InternalError)
    }

    /// Creates the message recorded when a rule lookup names an unknown field.
    pub fn field_not_found(field: &str) -> Self {
        Self::new(
            Severity::ValidationError,
            format!("no rule is declared for field '{field}'"),
        )
        .with_code(MessageCode::InternalFieldNotFound)
    }

    /// Sets the message code.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_code(mut self, code: MessageCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Returns true if this message makes the form invalid.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.severity.is_blocking()
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.text)?;
        if let Some(code) = self.code {
            write!(f, " (code {})", u16::from(code))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn only_error_severity_blocks() {
        assert!(Severity::Error.is_blocking());
        assert!(!Severity::ValidationError.is_blocking());
        assert!(!Severity::Warning.is_blocking());
        assert!(!Severity::Hint.is_blocking());
    }

    #[test]
    fn required_message_carries_code() {
        let msg = ValidationMessage::required(DEFAULT_REQUIRED_FIELD_TEXT);
        assert_eq!(msg.severity, Severity::Error);
        assert_eq!(msg.code, Some(MessageCode::FieldIsRequired));
        assert_eq!(msg.text, "This field is required");
    }

    #[test]
    fn serializes_with_wire_names() {
        let msg = ValidationMessage::internal_error("boom");
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({ "type": "validation_error", "code": 9999, "message": "boom" })
        );

        let hint = ValidationMessage::hint("look into mirror");
        assert_eq!(
            serde_json::to_value(&hint).unwrap(),
            json!({ "type": "hint", "message": "look into mirror" })
        );
    }

    #[test]
    fn deserializes_from_wire_shape() {
        let msg: ValidationMessage =
            serde_json::from_value(json!({ "type": "warning", "code": 100, "message": "careful" }))
                .unwrap();
        assert_eq!(
            msg,
            ValidationMessage::warning("careful").with_code(MessageCode::Custom)
        );
    }

    #[test]
    fn unknown_code_is_rejected() {
        let result: Result<ValidationMessage, _> =
            serde_json::from_value(json!({ "type": "error", "code": 7, "message": "x" }));
        assert!(result.is_err());
    }

    #[test]
    fn display_includes_code() {
        let msg = ValidationMessage::required("Not good");
        assert_eq!(msg.to_string(), "error: Not good (code 1)");
        assert_eq!(ValidationMessage::hint("h").to_string(), "hint: h");
    }
}
