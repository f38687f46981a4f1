//! Message resolution for missing required fields

use tracing::warn;

use crate::foundation::{DEFAULT_REQUIRED_FIELD_TEXT, ValidationMessage};
use crate::rules::{MessageText, RuleSet};

/// Resolves the message shown when the required field `key` has no value.
///
/// The text is taken from the first of these that is set and not an empty
/// literal:
///
/// 1. the field rule's `required_text`;
/// 2. the rule set's default required-field text;
/// 3. [`DEFAULT_REQUIRED_FIELD_TEXT`].
///
/// If `key` has no rule, an internal field-not-found message is returned.
/// If a lazy text fails, the failure detail becomes an internal-error
/// message; resolution never fails.
pub fn resolve_required_message(rules: &RuleSet, key: &str) -> ValidationMessage {
    let Some(rule) = rules.get(key) else {
        return ValidationMessage::field_not_found(key);
    };

    let text = [
        rule.required_text.as_ref(),
        rules.default_messages.required_field.as_ref(),
    ]
    .into_iter()
    .flatten()
    .find(|text| !is_empty_literal(text));

    match text {
        None => ValidationMessage::required(DEFAULT_REQUIRED_FIELD_TEXT),
        Some(text) => match text.resolve() {
            Ok(text) => ValidationMessage::required(text),
            Err(error) => {
                warn!(field = %key, %error, "required-field text could not be produced");
                ValidationMessage::internal_error(error.message().to_owned())
            }
        },
    }
}

fn is_empty_literal(text: &MessageText) -> bool {
    matches!(text, MessageText::Literal(text) if text.is_empty())
}
