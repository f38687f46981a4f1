//! Prelude module for convenient imports.
//!
//! `use formcheck::prelude::*;` brings in everything needed to declare rules,
//! build forms and evaluate them.

// ============================================================================
// FOUNDATION: messages, verdicts, errors
// ============================================================================

pub use crate::foundation::{
    CallbackError, CallbackResult, DEFAULT_REQUIRED_FIELD_TEXT, FormError, MessageCode,
    OptionsError, Severity, ValidationMessage, Verdict,
};

// ============================================================================
// RULES AND FORMS
// ============================================================================

pub use crate::form::{
    FilledMap, Form, MessageMap, Values, are_required_fields_filled, has_messages_of_severity,
    initialize,
};
pub use crate::rules::{FieldRule, FormState, FormVerdict, MessageText, RuleSet};

// ============================================================================
// EVALUATION
// ============================================================================

pub use crate::evaluate::evaluate;
pub use crate::options::{EvaluationOptions, SetFilled};
pub use crate::preprocess::{is_falsy, preprocess};
pub use crate::required::resolve_required_message;
