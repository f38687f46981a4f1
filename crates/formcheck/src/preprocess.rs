//! Value preprocessing
//!
//! Runs before any validation of a field: trims strings if the rule asks for
//! it, then applies the rule's transform. Falsy values (`null`, `false`,
//! zero, `""`) are passed through untouched, so transforms never see them.

use serde_json::Value;

use crate::rules::FieldRule;

/// Returns true for values that count as "no input": `null`, `false`,
/// numeric zero and the empty string.
///
/// Arrays and objects are never falsy, even when empty.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Returns true if a required field with this value is missing: undefined
/// (`null`) or the empty string.
pub fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Applies the rule's preprocessing to a value.
///
/// Falsy input is returned unchanged. Otherwise strings are trimmed if the
/// rule has `trim` set, and then the rule's transform (if any) is applied.
pub fn preprocess(rule: &FieldRule, value: Value) -> Value {
    if is_falsy(&value) {
        return value;
    }

    let value = match value {
        Value::String(text) if rule.trim => {
            let trimmed = text.trim();
            if trimmed.len() == text.len() {
                Value::String(text)
            } else {
                Value::String(trimmed.to_owned())
            }
        }
        other => other,
    };

    match &rule.preprocess {
        Some(transform) => transform(value),
        None => value,
    }
}
