//! Field validator results

use crate::foundation::ValidationMessage;

/// Outcome of a single field validator.
///
/// A validator either lets the value pass or attaches exactly one message to
/// the field. Whether that message invalidates the form depends on its
/// severity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Verdict {
    /// The value is acceptable; the field gets no message.
    #[default]
    Pass,
    /// The field gets this message.
    Message(ValidationMessage),
}

impl Verdict {
    /// Passes if `ok` holds, otherwise attaches `message`.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let verdict = Verdict::check(value == "123", ValidationMessage::error("Douh!"));
    /// ```
    pub fn check(ok: bool, message: ValidationMessage) -> Self {
        if ok { Self::Pass } else { Self::Message(message) }
    }

    /// Returns true for [`Verdict::Pass`].
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns the attached message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&ValidationMessage> {
        match self {
            Self::Pass => None,
            Self::Message(message) => Some(message),
        }
    }

    /// Consumes the verdict and returns the attached message, if any.
    #[must_use]
    pub fn into_message(self) -> Option<ValidationMessage> {
        match self {
            Self::Pass => None,
            Self::Message(message) => Some(message),
        }
    }
}

impl From<ValidationMessage> for Verdict {
    fn from(message: ValidationMessage) -> Self {
        Self::Message(message)
    }
}

impl From<Option<ValidationMessage>> for Verdict {
    fn from(message: Option<ValidationMessage>) -> Self {
        message.map_or(Self::Pass, Self::Message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_picks_pass_or_message() {
        assert!(Verdict::check(true, ValidationMessage::error("x")).is_pass());
        let verdict = Verdict::check(false, ValidationMessage::warning("careful"));
        assert_eq!(verdict.message().map(|m| m.text.as_ref()), Some("careful"));
    }

    #[test]
    fn option_conversion() {
        assert_eq!(Verdict::from(None), Verdict::Pass);
        assert_eq!(
            Verdict::from(Some(ValidationMessage::hint("h"))).into_message(),
            Some(ValidationMessage::hint("h"))
        );
    }
}
