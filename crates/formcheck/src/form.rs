//! Form records
//!
//! A [`Form`] is both the input to and the output of an evaluation: the
//! caller builds one with [`initialize`] (or [`Form::new`]), updates values
//! and filled-state as the user types, and evaluates it to get a new form
//! with messages and validity filled in.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::foundation::{FormError, Severity, ValidationMessage};
use crate::options::EvaluationOptions;
use crate::rules::RuleSet;

/// Field values by key. A missing key or `null` is an undefined value.
pub type Values = IndexMap<String, Value>;

/// Fields the user has interacted with. A missing key means not filled.
pub type FilledMap = IndexMap<String, bool>;

/// Field messages by key. A field without a message has no entry.
pub type MessageMap = IndexMap<String, ValidationMessage>;

/// A form: values, filled-state and rules, plus the outcome of the last
/// evaluation.
///
/// Forms compare equal when their data is equal and they share the same
/// rule set instance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    /// Field values. After an evaluation these are preprocessed.
    pub values: Values,
    /// Fields the user has interacted with.
    pub filled: FilledMap,
    /// Rules the form is evaluated against.
    #[serde(skip)]
    pub rules: Arc<RuleSet>,
    /// Field messages of the last evaluation.
    pub messages: MessageMap,
    /// True if the last evaluation found no blocking messages or failures.
    pub is_form_valid: bool,
    /// Form-level message of the last evaluation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_message: Option<ValidationMessage>,
}

impl Form {
    /// Creates an unvalidated form with nothing filled.
    pub fn new(values: Values, rules: impl Into<Arc<RuleSet>>) -> Self {
        initialize(values, rules, None)
    }

    /// Evaluates the form. See [`evaluate`](crate::evaluate::evaluate).
    #[must_use = "evaluation returns a new form and leaves this one untouched"]
    pub fn evaluate(&self, options: &EvaluationOptions) -> Form {
        crate::evaluate::evaluate(self, options)
    }

    /// Returns true if any field message has exactly the given severity.
    #[must_use]
    pub fn has_messages_of_severity(&self, severity: Severity) -> bool {
        has_messages_of_severity(self, severity)
    }

    /// Returns the message of a field, if any.
    #[must_use]
    pub fn message(&self, key: &str) -> Option<&ValidationMessage> {
        self.messages.get(key)
    }

    /// Returns true if the field is marked filled.
    #[must_use]
    pub fn is_filled(&self, key: &str) -> bool {
        self.filled.get(key).copied().unwrap_or(false)
    }

    /// Returns true if every required field is filled and has a value.
    #[must_use]
    pub fn required_fields_filled(&self) -> bool {
        are_required_fields_filled(&self.values, &self.filled, &self.rules)
    }

    /// Deserializes the values into a typed form model.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// #[derive(serde::Deserialize)]
    /// struct Signup { name: String, age: u32 }
    ///
    /// let signup: Signup = form.values_as()?;
    /// ```
    pub fn values_as<T: DeserializeOwned>(&self) -> Result<T, FormError> {
        let object = self
            .values
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::from_value(Value::Object(object)).map_err(FormError::ValuesMismatch)
    }
}

impl PartialEq for Form {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.rules, &other.rules)
            && self.values == other.values
            && self.filled == other.filled
            && self.messages == other.messages
            && self.is_form_valid == other.is_form_valid
            && self.form_message == other.form_message
    }
}

/// Creates a fresh, unvalidated form.
///
/// The form has no messages and is not valid until it is evaluated.
pub fn initialize(
    values: Values,
    rules: impl Into<Arc<RuleSet>>,
    filled: Option<FilledMap>,
) -> Form {
    Form {
        values,
        filled: filled.unwrap_or_default(),
        rules: rules.into(),
        messages: MessageMap::new(),
        is_form_valid: false,
        form_message: None,
    }
}

/// Returns true if at least one field message has exactly `severity`.
///
/// Only field messages are scanned; the form-level message is not.
pub fn has_messages_of_severity(form: &Form, severity: Severity) -> bool {
    form.messages
        .values()
        .any(|message| message.severity == severity)
}

/// Returns true if every required field is filled and has a non-blank value.
///
/// Unlike the evaluator's required check, this treats every falsy value and
/// whitespace-only strings as missing, and an unfilled field as missing
/// regardless of its value.
pub fn are_required_fields_filled(values: &Values, filled: &FilledMap, rules: &RuleSet) -> bool {
    rules
        .fields
        .iter()
        .filter(|(_, rule)| rule.required)
        .all(|(key, _)| {
            let is_filled = filled.get(key).copied().unwrap_or(false);
            let has_value = match values.get(key) {
                Some(Value::String(text)) => !text.trim().is_empty(),
                Some(value) => !crate::preprocess::is_falsy(value),
                None => false,
            };
            is_filled && has_value
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::FieldRule;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn values(pairs: &[(&str, Value)]) -> Values {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn initialize_creates_unvalidated_form() {
        let rules = Arc::new(RuleSet::new());
        let form = initialize(values(&[("field1", json!("value"))]), Arc::clone(&rules), None);

        assert_eq!(form.values.get("field1"), Some(&json!("value")));
        assert!(form.filled.is_empty());
        assert!(form.messages.is_empty());
        assert!(!form.is_form_valid);
        assert!(form.form_message.is_none());
        assert!(Arc::ptr_eq(&form.rules, &rules));
    }

    #[test]
    fn initialize_keeps_given_filled_state() {
        let filled: FilledMap = [("a".to_string(), true)].into_iter().collect();
        let form = initialize(Values::new(), RuleSet::new(), Some(filled));
        assert!(form.is_filled("a"));
        assert!(!form.is_filled("b"));
    }

    #[test]
    fn severity_scan_matches_exactly() {
        let mut form = Form::new(Values::new(), RuleSet::new());
        assert!(!form.has_messages_of_severity(Severity::Error));

        form.messages
            .insert("hint".into(), ValidationMessage::hint("hint"));
        form.messages
            .insert("warning".into(), ValidationMessage::warning("warning"));
        assert!(form.has_messages_of_severity(Severity::Warning));
        assert!(!form.has_messages_of_severity(Severity::Error));
    }

    #[test]
    fn severity_scan_ignores_form_message() {
        let mut form = Form::new(Values::new(), RuleSet::new());
        form.form_message = Some(ValidationMessage::error("form level"));
        assert!(!has_messages_of_severity(&form, Severity::Error));
    }

    #[test]
    fn required_fields_filled_checks_filled_and_value() {
        let rules = RuleSet::new()
            .field("a", FieldRule::new().required())
            .field("b", FieldRule::new());
        let filled: FilledMap = [("a".to_string(), true)].into_iter().collect();

        assert!(are_required_fields_filled(
            &values(&[("a", json!("x"))]),
            &filled,
            &rules
        ));
        assert!(!are_required_fields_filled(
            &values(&[("a", json!("   "))]),
            &filled,
            &rules
        ));
        assert!(!are_required_fields_filled(
            &values(&[("a", json!("x"))]),
            &FilledMap::new(),
            &rules
        ));
    }

    #[test]
    fn values_as_deserializes_typed_model() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Signup {
            name: String,
            age: u32,
        }

        let form = Form::new(
            values(&[("name", json!("Ada")), ("age", json!(36))]),
            RuleSet::new(),
        );
        assert_eq!(
            form.values_as::<Signup>().unwrap(),
            Signup {
                name: "Ada".into(),
                age: 36
            }
        );
        assert!(form.values_as::<Vec<String>>().is_err());
    }

    #[test]
    fn serializes_wire_shape() {
        let mut form = Form::new(values(&[("a", json!("1"))]), RuleSet::new());
        form.messages.insert("a".into(), ValidationMessage::hint("h"));
        assert_eq!(
            serde_json::to_value(&form).unwrap(),
            json!({
                "values": { "a": "1" },
                "filled": {},
                "messages": { "a": { "type": "hint", "message": "h" } },
                "isFormValid": false,
            })
        );
    }
}
