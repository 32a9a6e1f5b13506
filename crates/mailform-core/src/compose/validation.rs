//! Send-time validation of the compose form.

use super::model::ComposeState;

/// Validation error raised before a message is handed to the mail client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Recipient field is empty.
    EmptyRecipient,
    /// Subject field is empty.
    EmptySubject,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyRecipient => "Recipient is required",
            Self::EmptySubject => "Subject is required",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyRecipient => "recipient",
            Self::EmptySubject => "subject",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Result of validating the form.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Checks that the form can be sent.
///
/// Only presence is checked; address syntax is left to the mail client.
///
/// # Errors
///
/// Returns every `ValidationError` that applies.
pub fn validate_for_send(state: &ComposeState) -> ValidationResult {
    let mut errors = Vec::new();

    if state.recipient.trim().is_empty() {
        errors.push(ValidationError::EmptyRecipient);
    }
    if state.subject.trim().is_empty() {
        errors.push(ValidationError::EmptySubject);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
