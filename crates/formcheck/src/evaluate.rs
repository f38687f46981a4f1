//! Form evaluation
//!
//! [`evaluate`] runs a form's rules against its current values and
//! filled-state and returns a new form carrying the preprocessed values,
//! field messages, the form-level message and the overall validity.
//!
//! # Order of operations
//!
//! 1. Copy values and filled-state; apply `set_filled`, then `set_values`.
//! 2. For each field rule, in declaration order:
//!    - preprocess the value (unless disabled) and store it back;
//!    - if the field is required and the value is undefined or `""`, the form
//!      is invalid and, if the field is filled, the field gets the
//!      required-field message; the custom validator is skipped;
//!    - otherwise run the custom validator. Its message is recorded only for
//!      filled fields; an error message invalidates the form either way.
//! 3. Run the whole-form validator, if any, and overlay its results.
//!
//! Unfilled fields never show messages, but they still count towards
//! validity. A callback that fails leaves the form invalid whatever the
//! whole-form validator reports.

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::foundation::ValidationMessage;
use crate::form::{FilledMap, Form, MessageMap, Values};
use crate::options::EvaluationOptions;
use crate::preprocess::{is_missing, preprocess};
use crate::required::resolve_required_message;
use crate::rules::{FormState, RuleSet};

/// Outcome of the field-level pass.
#[derive(Debug)]
struct FieldPass {
    messages: MessageMap,
    is_form_valid: bool,
    callback_failed: bool,
}

/// Evaluates a form against its rules.
///
/// The input form is not modified; the returned form shares its rule set.
/// Any form-level message or field messages from an earlier evaluation are
/// discarded.
#[tracing::instrument(level = "debug", skip_all, fields(fields = form.rules.fields.len()))]
pub fn evaluate(form: &Form, options: &EvaluationOptions) -> Form {
    let rules = &*form.rules;
    let data = options.data.as_ref();

    let mut values = form.values.clone();
    let mut filled = form.filled.clone();

    if let Some(set_filled) = &options.set_filled {
        set_filled.apply(&mut filled);
    }
    if let Some(set_values) = &options.set_values {
        for (key, value) in set_values {
            values.insert(key.clone(), value.clone());
        }
    }

    let FieldPass {
        mut messages,
        mut is_form_valid,
        callback_failed,
    } = validate_fields(rules, &mut values, &filled, options.use_preprocessor, data);

    let mut form_message = None;
    if let Some(form_validator) = &rules.form_validator {
        let state = FormState {
            values: &values,
            filled: &filled,
            is_form_valid,
        };

        match form_validator(&state, data) {
            Ok(verdict) => {
                for (key, message) in verdict.messages {
                    match message {
                        Some(message) => {
                            messages.insert(key, message);
                        }
                        None => {
                            messages.shift_remove(&key);
                        }
                    }
                }
                is_form_valid = verdict.is_form_valid;
                if verdict
                    .form_message
                    .as_ref()
                    .is_some_and(ValidationMessage::is_blocking)
                {
                    is_form_valid = false;
                }
                form_message = verdict.form_message;
            }
            Err(error) => {
                warn!(%error, "form validator failed");
                form_message = Some(ValidationMessage::internal_error(error.message().to_owned()));
                is_form_valid = false;
            }
        }

        if callback_failed || messages.values().any(ValidationMessage::is_blocking) {
            is_form_valid = false;
        }
    }

    debug!(
        is_form_valid,
        messages = messages.len(),
        has_form_message = form_message.is_some(),
        "form evaluated"
    );

    Form {
        values,
        filled,
        rules: form.rules.clone(),
        messages,
        is_form_valid,
        form_message,
    }
}

/// Runs preprocessing, required checks and custom validators for every
/// declared field, updating `values` in place.
fn validate_fields(
    rules: &RuleSet,
    values: &mut Values,
    filled: &FilledMap,
    use_preprocessor: bool,
    data: Option<&Value>,
) -> FieldPass {
    let mut messages = MessageMap::new();
    let mut is_form_valid = true;
    let mut callback_failed = false;

    for (key, rule) in &rules.fields {
        let raw = values.get(key).cloned().unwrap_or(Value::Null);
        let value = if use_preprocessor {
            preprocess(rule, raw)
        } else {
            raw
        };
        if values.contains_key(key) || !value.is_null() {
            values.insert(key.clone(), value.clone());
        }

        let is_filled = filled.get(key).copied().unwrap_or(false);

        if rule.required && is_missing(&value) {
            trace!(field = %key, is_filled, "required field is missing");
            if is_filled {
                messages.insert(key.clone(), resolve_required_message(rules, key));
            }
            is_form_valid = false;
            continue;
        }

        let Some(validator) = &rule.validator else {
            continue;
        };

        match validator(&value, data) {
            Ok(verdict) => {
                let Some(message) = verdict.into_message() else {
                    trace!(field = %key, "field passed");
                    continue;
                };
                trace!(field = %key, severity = %message.severity, is_filled, "field validator reported");
                if is_form_valid {
                    is_form_valid = !message.is_blocking();
                }
                if is_filled {
                    messages.insert(key.clone(), message);
                }
            }
            Err(error) => {
                warn!(field = %key, %error, "field validator failed");
                messages.insert(
                    key.clone(),
                    ValidationMessage::internal_error(error.message().to_owned()),
                );
                is_form_valid = false;
                callback_failed = true;
            }
        }
    }

    FieldPass {
        messages,
        is_form_valid,
        callback_failed,
    }
}
