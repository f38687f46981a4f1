//! Evaluation options
//!
//! [`EvaluationOptions`] controls a single evaluation: whether preprocessing
//! runs, which fields to mark filled and which values to override before
//! validating, and the auxiliary data handed to validators.
//!
//! Options can be built in code or parsed from JSON. Parsing is the only
//! place where malformed shapes can appear; it rejects them with an
//! [`OptionsError`] instead of ignoring them.
//!
//! # Examples
//!
//! ```rust,ignore
//! use formcheck::options::{EvaluationOptions, SetFilled};
//!
//! let options = EvaluationOptions::new()
//!     .set_filled(SetFilled::keys(["a", "b"]))
//!     .with_data(serde_json::json!({ "locale": "fi" }));
//!
//! let parsed = EvaluationOptions::from_json_str(r#"{ "setFilled": "a", "usePreprocessor": false }"#)?;
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::foundation::OptionsError;
use crate::foundation::error::value_kind;
use crate::form::{FilledMap, Values};

// ============================================================================
// SET FILLED
// ============================================================================

/// Fields to mark filled before evaluating.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum SetFilled {
    /// Mark one field filled.
    Key(String),
    /// Mark every listed field filled.
    Keys(Vec<String>),
    /// Replace the filled-state wholesale. Allows explicit `false` entries.
    Map(FilledMap),
}

impl SetFilled {
    /// Marks one field filled.
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }

    /// Marks every listed field filled.
    pub fn keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self::Keys(keys.into_iter().map(Into::into).collect())
    }

    /// Replaces the filled-state with the given map.
    pub fn map<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, bool)>,
        K: Into<String>,
    {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Applies this setting to a filled-state map.
    pub fn apply(&self, filled: &mut FilledMap) {
        match self {
            Self::Key(key) => {
                filled.insert(key.clone(), true);
            }
            Self::Keys(keys) => {
                for key in keys {
                    filled.insert(key.clone(), true);
                }
            }
            Self::Map(map) => filled.clone_from(map),
        }
    }
}

impl TryFrom<Value> for SetFilled {
    type Error = OptionsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(key) => Ok(Self::Key(key)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(key) => Ok(key),
                    other => Err(OptionsError::invalid_set_filled(format!(
                        "a list containing a {}",
                        value_kind(&other)
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Keys),
            Value::Object(entries) => entries
                .into_iter()
                .map(|(key, flag)| match flag {
                    Value::Bool(flag) => Ok((key, flag)),
                    other => Err(OptionsError::invalid_set_filled(format!(
                        "a map with a {} entry for '{key}'",
                        value_kind(&other)
                    ))),
                })
                .collect::<Result<FilledMap, _>>()
                .map(Self::Map),
            other => Err(OptionsError::invalid_set_filled(value_kind(&other))),
        }
    }
}

impl From<&str> for SetFilled {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for SetFilled {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<Vec<String>> for SetFilled {
    fn from(keys: Vec<String>) -> Self {
        Self::Keys(keys)
    }
}

impl From<FilledMap> for SetFilled {
    fn from(map: FilledMap) -> Self {
        Self::Map(map)
    }
}

// ============================================================================
// EVALUATION OPTIONS
// ============================================================================

/// Options controlling one evaluation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct EvaluationOptions {
    /// Run preprocessing (trim and transforms). Defaults to `true`.
    pub use_preprocessor: bool,
    /// Fields to mark filled before evaluating.
    pub set_filled: Option<SetFilled>,
    /// Values merged over the form's values before evaluating. Top-level keys
    /// replace existing values; there is no nested merge.
    pub set_values: Option<Values>,
    /// Opaque data passed to field and whole-form validators.
    pub data: Option<Value>,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            use_preprocessor: true,
            set_filled: None,
            set_values: None,
            data: None,
        }
    }
}

impl EvaluationOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables preprocessing.
    #[must_use = "builder methods must be chained or built"]
    pub fn without_preprocessor(mut self) -> Self {
        self.use_preprocessor = false;
        self
    }

    /// Sets the fields to mark filled.
    #[must_use = "builder methods must be chained or built"]
    pub fn set_filled(mut self, set_filled: impl Into<SetFilled>) -> Self {
        self.set_filled = Some(set_filled.into());
        self
    }

    /// Sets the values to merge over the form's values.
    #[must_use = "builder methods must be chained or built"]
    pub fn set_values<I, K>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.set_values = Some(values.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }

    /// Sets the auxiliary data passed to validators.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Parses options from a JSON value.
    pub fn from_json(value: Value) -> Result<Self, OptionsError> {
        Self::try_from(value)
    }

    /// Parses options from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, OptionsError> {
        let value: Value = serde_json::from_str(text)?;
        Self::try_from(value)
    }
}

impl TryFrom<Value> for EvaluationOptions {
    type Error = OptionsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let entries = match value {
            Value::Object(entries) => entries,
            other => {
                return Err(OptionsError::NotAnObject {
                    found: value_kind(&other),
                });
            }
        };

        let mut options = Self::default();
        for (key, value) in entries {
            match key.as_str() {
                "usePreprocessor" => {
                    options.use_preprocessor = value.as_bool().ok_or_else(|| {
                        OptionsError::invalid_option("usePreprocessor", "a boolean", &value)
                    })?;
                }
                "setFilled" => options.set_filled = Some(SetFilled::try_from(value)?),
                "setValues" => match value {
                    Value::Object(values) => options.set_values = Some(values.into_iter().collect()),
                    other => {
                        return Err(OptionsError::invalid_option(
                            "setValues",
                            "an object",
                            &other,
                        ));
                    }
                },
                "data" => options.data = Some(value),
                _ => return Err(OptionsError::UnknownOption(key)),
            }
        }
        Ok(options)
    }
}
