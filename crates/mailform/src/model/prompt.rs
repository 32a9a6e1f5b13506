//! Template name prompt.

/// Inline prompt asking for a template name.
///
/// Closing it without confirming aborts the save.
#[derive(Debug, Clone, Default)]
pub struct NamePrompt {
    /// Name typed so far.
    pub name: String,
}

impl NamePrompt {
    /// Opens the prompt, pre-filled with `name`.
    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Whether the typed name can be submitted.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
