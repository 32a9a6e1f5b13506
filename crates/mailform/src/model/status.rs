//! Status line model.

/// Feedback shown under the form after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Confirmation of a completed action.
    Info(String),
    /// Failure the user should see.
    Error(String),
}

impl Status {
    /// Creates a confirmation.
    pub fn info(message: impl Into<String>) -> Self {
        Self::Info(message.into())
    }

    /// Creates an error.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    /// The text to display.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Info(message) | Self::Error(message) => message,
        }
    }

    /// Whether this is an error.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}
