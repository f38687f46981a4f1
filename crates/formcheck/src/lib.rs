//! # formcheck
//!
//! A synchronous, side-effect-free form validation engine.
//!
//! A [`Form`](form::Form) bundles field values, the set of fields the user has
//! interacted with ("filled") and a declarative [`RuleSet`](rules::RuleSet).
//! [`evaluate`](evaluate::evaluate) runs the rules and returns a new form with
//! preprocessed values, per-field messages, an optional form-level message and
//! an overall validity flag.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use formcheck::prelude::*;
//! use serde_json::json;
//!
//! let rules = RuleSet::new()
//!     .field("email", FieldRule::new().required().trim())
//!     .field(
//!         "nickname",
//!         FieldRule::new().validate(|value, _| {
//!             Verdict::check(value.as_str().is_some_and(|s| s.len() >= 3), ValidationMessage::warning("Short nickname"))
//!         }),
//!     );
//!
//! let form = Form::new(
//!     [("email".to_string(), json!("  ada@example.com "))].into_iter().collect(),
//!     rules,
//! );
//!
//! let result = form.evaluate(&EvaluationOptions::new().set_filled(SetFilled::keys(["email"])));
//! assert!(result.is_form_valid);
//! assert_eq!(result.values["email"], json!("ada@example.com"));
//! ```
//!
//! ## Messages and validity
//!
//! Each field has at most one [`ValidationMessage`](foundation::ValidationMessage).
//! Messages are only shown for filled fields, but every field counts towards
//! validity. Only error messages make the form invalid; warnings, hints and
//! internal validation-error messages never do. A rule callback that fails
//! invalidates the form on its own.

pub mod evaluate;
pub mod form;
pub mod foundation;
pub mod options;
pub mod prelude;
pub mod preprocess;
pub mod required;
pub mod rules;

pub use evaluate::evaluate;
pub use form::{Form, are_required_fields_filled, has_messages_of_severity, initialize};
