//! Core validation types
//!
//! - **Messages**: [`ValidationMessage`], [`Severity`], [`MessageCode`]
//! - **Errors**: [`OptionsError`], [`CallbackError`], [`FormError`]
//! - **Verdicts**: [`Verdict`], the result of a single field validator
//!
//! Everything else in the crate builds on these.

pub mod error;
pub mod message;
pub mod verdict;

pub use error::{CallbackError, FormError, OptionsError};
pub use message::{DEFAULT_REQUIRED_FIELD_TEXT, MessageCode, Severity, ValidationMessage};
pub use verdict::Verdict;

/// Result of a fallible rule callback.
pub type CallbackResult<T> = Result<T, CallbackError>;
