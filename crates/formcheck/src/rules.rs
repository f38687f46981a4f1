//! Declarative validation rules
//!
//! A [`RuleSet`] holds one [`FieldRule`] per validated field (kept in
//! declaration order), an optional whole-form validator and default message
//! texts. Rule sets are immutable once built and are shared between
//! evaluations through an `Arc`.
//!
//! # Examples
//!
//! ```rust,ignore
//! use formcheck::prelude::*;
//!
//! let rules = RuleSet::new()
//!     .field("name", FieldRule::new().required().trim())
//!     .field(
//!         "age",
//!         FieldRule::new().validate(|value, _data| {
//!             Verdict::check(value.as_u64().is_some_and(|n| n >= 18), ValidationMessage::error("Too young"))
//!         }),
//!     )
//!     .validate_form(|state, _data| FormVerdict::new(state.is_form_valid))
//!     .default_required_text("Please fill in this field");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::foundation::{CallbackResult, DEFAULT_REQUIRED_FIELD_TEXT, ValidationMessage, Verdict};
use crate::form::{FilledMap, Values};

// ============================================================================
// CALLBACK TYPES
// ============================================================================

/// Value transform applied during preprocessing.
pub type PreprocessFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Custom field validator. Receives the preprocessed value and the auxiliary
/// data passed in the evaluation options.
pub type FieldValidatorFn =
    Arc<dyn Fn(&Value, Option<&Value>) -> CallbackResult<Verdict> + Send + Sync>;

/// Whole-form validator. Receives the state after field validation and the
/// auxiliary data passed in the evaluation options.
pub type FormValidatorFn =
    Arc<dyn Fn(&FormState<'_>, Option<&Value>) -> CallbackResult<FormVerdict> + Send + Sync>;

/// Lazily produced message text.
pub type MessageTextFn = Arc<dyn Fn() -> CallbackResult<String> + Send + Sync>;

// ============================================================================
// MESSAGE TEXT
// ============================================================================

/// Message text given either literally or as a function producing it.
#[derive(Clone)]
pub enum MessageText {
    /// Fixed text.
    Literal(Cow<'static, str>),
    /// Text produced on demand. The function may fail.
    Lazy(MessageTextFn),
}

impl MessageText {
    /// Creates a literal text.
    pub fn literal(text: impl Into<Cow<'static, str>>) -> Self {
        Self::Literal(text.into())
    }

    /// Creates a text produced by `f` each time it is needed.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::Lazy(Arc::new(move || -> CallbackResult<String> { Ok(f()) }))
    }

    /// Creates a text produced by a fallible function.
    pub fn try_from_fn<F>(f: F) -> Self
    where
        F: Fn() -> CallbackResult<String> + Send + Sync + 'static,
    {
        Self::Lazy(Arc::new(f))
    }

    /// Produces the text, invoking the function for lazy texts.
    pub fn resolve(&self) -> CallbackResult<Cow<'static, str>> {
        match self {
            Self::Literal(text) => Ok(text.clone()),
            Self::Lazy(f) => f().map(Cow::Owned),
        }
    }
}

impl fmt::Debug for MessageText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Lazy(_) => f.write_str("Lazy(<function>)"),
        }
    }
}

impl From<&'static str> for MessageText {
    fn from(text: &'static str) -> Self {
        Self::Literal(Cow::Borrowed(text))
    }
}

impl From<String> for MessageText {
    fn from(text: String) -> Self {
        Self::Literal(Cow::Owned(text))
    }
}

// ============================================================================
// FIELD RULE
// ============================================================================

/// Validation and preprocessing rules for a single field.
///
/// All parts are optional. Without any of them the field is accepted as is.
#[derive(Clone, Default)]
pub struct FieldRule {
    /// The field must have a value (neither undefined nor an empty string).
    pub required: bool,
    /// Text shown when a required field is missing. Overrides the rule set
    /// default.
    pub required_text: Option<MessageText>,
    /// Strip leading and trailing whitespace from string values.
    pub trim: bool,
    /// Transform applied to the value after trimming.
    pub preprocess: Option<PreprocessFn>,
    /// Custom validator run after the required check.
    pub validator: Option<FieldValidatorFn>,
}

impl FieldRule {
    /// Creates a rule that accepts any value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the field as required.
    #[must_use = "builder methods must be chained or built"]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the text shown when the required field is missing.
    #[must_use = "builder methods must be chained or built"]
    pub fn required_text(mut self, text: impl Into<MessageText>) -> Self {
        self.required_text = Some(text.into());
        self
    }

    /// Enables whitespace trimming for string values.
    #[must_use = "builder methods must be chained or built"]
    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    /// Sets the preprocessing transform.
    #[must_use = "builder methods must be chained or built"]
    pub fn preprocess<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.preprocess = Some(Arc::new(f));
        self
    }

    /// Sets an infallible custom validator.
    #[must_use = "builder methods must be chained or built"]
    pub fn validate<F, R>(mut self, f: F) -> Self
    where
        F: Fn(&Value, Option<&Value>) -> R + Send + Sync + 'static,
        R: Into<Verdict>,
    {
        self.validator = Some(Arc::new(
            move |value: &Value, data: Option<&Value>| -> CallbackResult<Verdict> {
                Ok(f(value, data).into())
            },
        ));
        self
    }

    /// Sets a custom validator that may fail.
    ///
    /// A failure does not abort the evaluation; the field receives an
    /// internal validation-error message instead.
    #[must_use = "builder methods must be chained or built"]
    pub fn try_validate<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, Option<&Value>) -> CallbackResult<Verdict> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("required", &self.required)
            .field("required_text", &self.required_text)
            .field("trim", &self.trim)
            .field("preprocess", &self.preprocess.as_ref().map(|_| "<function>"))
            .field("validator", &self.validator.as_ref().map(|_| "<function>"))
            .finish()
    }
}

// ============================================================================
// WHOLE-FORM VALIDATION
// ============================================================================

/// State handed to the whole-form validator.
///
/// Values are already preprocessed and `is_form_valid` reflects the field
/// validators.
#[derive(Debug, Clone, Copy)]
pub struct FormState<'a> {
    /// Preprocessed form values.
    pub values: &'a Values,
    /// Fields the user has interacted with.
    pub filled: &'a FilledMap,
    /// Validity after field validation.
    pub is_form_valid: bool,
}

impl FormState<'_> {
    /// Returns the value of a field, if present.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns true if the field is marked filled.
    #[must_use]
    pub fn is_filled(&self, key: &str) -> bool {
        self.filled.get(key).copied().unwrap_or(false)
    }
}

/// Result of the whole-form validator.
///
/// Field messages are overlaid on the field-level messages key by key: a
/// `Some` replaces the field's message and a `None` removes it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormVerdict {
    /// New validity of the form.
    pub is_form_valid: bool,
    /// Field messages overriding the field-level results.
    pub messages: IndexMap<String, Option<ValidationMessage>>,
    /// Message for the form as a whole.
    pub form_message: Option<ValidationMessage>,
}

impl FormVerdict {
    /// Creates a verdict with the given validity and no messages.
    #[must_use]
    pub fn new(is_form_valid: bool) -> Self {
        Self {
            is_form_valid,
            ..Self::default()
        }
    }

    /// Creates a verdict reporting the form valid.
    #[must_use]
    pub fn valid() -> Self {
        Self::new(true)
    }

    /// Creates a verdict reporting the form invalid.
    #[must_use]
    pub fn invalid() -> Self {
        Self::new(false)
    }

    /// Sets the message of a field.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, key: impl Into<String>, message: ValidationMessage) -> Self {
        self.messages.insert(key.into(), Some(message));
        self
    }

    /// Removes any field-level message of a field.
    #[must_use = "builder methods must be chained or built"]
    pub fn clear_message(mut self, key: impl Into<String>) -> Self {
        self.messages.insert(key.into(), None);
        self
    }

    /// Sets the form-level message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_form_message(mut self, message: ValidationMessage) -> Self {
        self.form_message = Some(message);
        self
    }
}

// ============================================================================
// RULE SET
// ============================================================================

/// Default texts for messages raised by the evaluator itself.
#[derive(Debug, Clone, Default)]
pub struct DefaultMessages {
    /// Text shown when a required field is missing and its rule has no text
    /// of its own.
    pub required_field: Option<MessageText>,
}

/// The complete set of rules for a form.
#[derive(Clone, Default)]
pub struct RuleSet {
    /// Field rules in declaration order.
    pub fields: IndexMap<String, FieldRule>,
    /// Optional cross-field validator run after all field rules.
    pub form_validator: Option<FormValidatorFn>,
    /// Default message texts.
    pub default_messages: DefaultMessages,
}

impl RuleSet {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the rule of a field. Declaring a field twice replaces the
    /// earlier rule but keeps its original position.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, key: impl Into<String>, rule: FieldRule) -> Self {
        self.fields.insert(key.into(), rule);
        self
    }

    /// Sets an infallible whole-form validator.
    #[must_use = "builder methods must be chained or built"]
    pub fn validate_form<F>(mut self, f: F) -> Self
    where
        F: Fn(&FormState<'_>, Option<&Value>) -> FormVerdict + Send + Sync + 'static,
    {
        self.form_validator = Some(Arc::new(
            move |state: &FormState<'_>, data: Option<&Value>| -> CallbackResult<FormVerdict> {
                Ok(f(state, data))
            },
        ));
        self
    }

    /// Sets a whole-form validator that may fail.
    #[must_use = "builder methods must be chained or built"]
    pub fn try_validate_form<F>(mut self, f: F) -> Self
    where
        F: Fn(&FormState<'_>, Option<&Value>) -> CallbackResult<FormVerdict>
            + Send
            + Sync
            + 'static,
    {
        self.form_validator = Some(Arc::new(f));
        self
    }

    /// Sets the default text for missing required fields.
    #[must_use = "builder methods must be chained or built"]
    pub fn default_required_text(mut self, text: impl Into<MessageText>) -> Self {
        self.default_messages.required_field = Some(text.into());
        self
    }

    /// Returns the rule of a field, if declared.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldRule> {
        self.fields.get(key)
    }

    /// Text used for missing required fields when nothing else is configured.
    #[must_use]
    pub fn builtin_required_text() -> &'static str {
        DEFAULT_REQUIRED_FIELD_TEXT
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("fields", &self.fields)
            .field(
                "form_validator",
                &self.form_validator.as_ref().map(|_| "<function>"),
            )
            .field("default_messages", &self.default_messages)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::CallbackError;
    use serde_json::json;

    #[test]
    fn message_text_resolves_literal_and_lazy() {
        assert_eq!(MessageText::from("Not good").resolve().unwrap(), "Not good");
        let lazy = MessageText::from_fn(|| "Lazy not good".to_string());
        assert_eq!(lazy.resolve().unwrap(), "Lazy not good");
    }

    #[test]
    fn failing_message_text_reports_error() {
        let text = MessageText::try_from_fn(|| Err(CallbackError::new("no locale")));
        assert_eq!(text.resolve().unwrap_err().message(), "no locale");
    }

    #[test]
    fn field_declaration_keeps_first_position() {
        let rules = RuleSet::new()
            .field("a", FieldRule::new())
            .field("b", FieldRule::new())
            .field("a", FieldRule::new().required());

        let keys: Vec<_> = rules.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b"]);
        assert!(rules.get("a").is_some_and(|rule| rule.required));
    }

    #[test]
    fn infallible_validator_is_wrapped() {
        let rule = FieldRule::new()
            .validate(|value, _| Verdict::check(value == "ok", ValidationMessage::error("bad")));
        let validator = rule.validator.expect("validator set");
        assert_eq!(validator(&json!("ok"), None), Ok(Verdict::Pass));
        assert!(!validator(&json!("nope"), None).unwrap().is_pass());
    }

    #[test]
    fn form_verdict_builder() {
        let verdict = FormVerdict::invalid()
            .with_message("a", ValidationMessage::warning("Values do not match"))
            .clear_message("b")
            .with_form_message(ValidationMessage::warning("a and b must match"));

        assert!(!verdict.is_form_valid);
        assert_eq!(verdict.messages.len(), 2);
        assert_eq!(verdict.messages.get("b"), Some(&None));
        assert!(verdict.form_message.is_some());
    }

    #[test]
    fn debug_hides_callbacks() {
        let rule = FieldRule::new().trim().preprocess(|v| v);
        let rendered = format!("{rule:?}");
        assert!(rendered.contains("<function>"));
        assert!(rendered.contains("trim: true"));
    }
}
