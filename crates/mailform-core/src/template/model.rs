//! Template model types.

use serde::{Deserialize, Serialize};

use super::repository::TemplateStore;

/// A named, persisted snapshot of every compose field.
///
/// Has the same shape as [`crate::ComposeState`]; fields missing from a
/// hand-edited file load as empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    /// Recipient addresses (To).
    pub recipient: String,
    /// CC addresses.
    pub cc: String,
    /// Subject line.
    pub subject: String,
    /// Plain text body.
    pub body: String,
    /// Attachment file paths, in order.
    pub attachments: Vec<String>,
}

/// The template the UI currently considers active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    /// No template is selected.
    #[default]
    None,
    /// A template stored under this name.
    Template(String),
}

impl Selection {
    /// Label shown for the "no template" entry.
    pub const NONE_LABEL: &'static str = "No template";

    /// Returns the selected template name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Template(name) => Some(name),
        }
    }

    /// Returns `true` for the "no template" sentinel.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Selection to fall back to after the store's key set changes.
    ///
    /// The first name in enumeration order, or [`Selection::None`] when the
    /// store is empty.
    #[must_use]
    pub fn fallback(store: &TemplateStore) -> Self {
        store
            .names()
            .next()
            .map_or(Self::None, |name| Self::Template(name.to_string()))
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str(Self::NONE_LABEL),
            // A hand-edited file may hold the label itself as a key.
            Self::Template(name) if name == Self::NONE_LABEL => write!(f, "\"{name}\""),
            Self::Template(name) => f.write_str(name),
        }
    }
}

impl From<&str> for Selection {
    fn from(name: &str) -> Self {
        Self::Template(name.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_load_as_empty() {
        let template: Template = serde_json::from_str(r#"{"subject": "Hi"}"#).unwrap();
        assert_eq!(template.subject, "Hi");
        assert_eq!(template.recipient, "");
        assert!(template.attachments.is_empty());
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(Template::default()).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, ["attachments", "body", "cc", "recipient", "subject"]);
    }

    #[test]
    fn test_selection_display() {
        assert_eq!(Selection::None.to_string(), "No template");
        assert_eq!(Selection::from("Invoice").to_string(), "Invoice");
        assert_eq!(Selection::from("Invoice").name(), Some("Invoice"));
        assert!(Selection::None.name().is_none());
    }

    #[test]
    fn test_template_named_like_label_displays_distinctly() {
        let stored = Selection::from(Selection::NONE_LABEL);
        assert_ne!(stored.to_string(), Selection::None.to_string());
        assert_eq!(stored.to_string(), "\"No template\"");
        assert_eq!(stored.name(), Some("No template"));
    }

    #[test]
    fn test_fallback_on_empty_store() {
        let store = TemplateStore::in_memory();
        assert_eq!(Selection::fallback(&store), Selection::None);
    }
}
