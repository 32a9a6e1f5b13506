//! Template controller.
//!
//! Mediates between the compose form and the template store and owns the
//! current selection, which is derived from the store's key set.

use crate::compose::ComposeState;
use crate::template::{PersistenceError, Selection, Template, TemplateStore};

/// Errors from template operations.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// No name was given.
    #[error("Template name is required")]
    EmptyName,

    /// The name collides with the "no template" entry.
    #[error("\"{0}\" is reserved")]
    ReservedName(String),

    /// No template is stored under the name.
    #[error("Template not found: {0}")]
    NotFound(String),

    /// The template file could not be written.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Keeps the template store, its visible name list and the selection
/// consistent.
#[derive(Debug, Clone)]
pub struct TemplateController {
    store: TemplateStore,
    names: Vec<String>,
    selection: Selection,
}

impl TemplateController {
    /// Creates a controller over `store`.
    ///
    /// The initial selection is the first stored name, or none when the
    /// store is empty.
    #[must_use]
    pub fn new(store: TemplateStore) -> Self {
        let mut controller = Self {
            store,
            names: Vec::new(),
            selection: Selection::None,
        };
        controller.refresh();
        controller
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &TemplateStore {
        &self.store
    }

    /// Template names for the selection menu, in enumeration order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The current selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Builds the form contents for the template stored under `name`.
    ///
    /// Every field is replaced; nothing is merged with the current form.
    /// Returns `None` if no such template exists.
    #[must_use]
    pub fn apply_template(&self, name: &str) -> Option<ComposeState> {
        self.store.get(name).map(ComposeState::from)
    }

    /// Builds the form contents for the current selection.
    ///
    /// The "no template" selection yields `None` without a lookup.
    #[must_use]
    pub fn apply_selection(&self) -> Option<ComposeState> {
        self.selection
            .name()
            .and_then(|name| self.apply_template(name))
    }

    /// Changes the selection on user request.
    ///
    /// Returns the form contents to show, or `None` when the new selection is
    /// "no template". Unknown names are ignored and leave the selection as is.
    pub fn select(&mut self, selection: Selection) -> Option<ComposeState> {
        if let Selection::Template(name) = &selection
            && !self.store.contains(name)
        {
            tracing::warn!("Ignoring selection of unknown template {:?}", name);
            return None;
        }

        tracing::debug!("Template selection changed to {}", selection);
        self.selection = selection;
        self.apply_selection()
    }

    /// Saves the form as a template under `name` and selects it.
    ///
    /// An existing template with the same name is replaced. Returns the
    /// name actually used (surrounding whitespace removed).
    ///
    /// # Errors
    ///
    /// Returns an error, with nothing changed, if the name is empty or
    /// reserved or if the template file cannot be written.
    pub fn save_as_template(
        &mut self,
        name: &str,
        compose: &ComposeState,
    ) -> Result<String, TemplateError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TemplateError::EmptyName);
        }
        if name == Selection::NONE_LABEL {
            return Err(TemplateError::ReservedName(name.to_string()));
        }

        let replaced = self.store.insert(name, compose.capture())?;
        if replaced.is_some() {
            tracing::info!("Template {:?} overwritten", name);
        } else {
            tracing::info!("Template {:?} saved", name);
        }

        self.refresh_names();
        self.selection = Selection::Template(name.to_string());
        Ok(name.to_string())
    }

    /// Deletes the template stored under `name`.
    ///
    /// The selection falls back to the first remaining name, or to "no
    /// template" once the store is empty. Returns the removed template.
    ///
    /// # Errors
    ///
    /// Returns an error, with nothing changed, if no such template exists or
    /// the template file cannot be written.
    pub fn delete_template(&mut self, name: &str) -> Result<Template, TemplateError> {
        let removed = self
            .store
            .delete(name)?
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;

        tracing::info!("Template {:?} deleted", name);
        self.refresh();
        Ok(removed)
    }

    /// Returns an empty form. The store and selection are untouched.
    #[must_use]
    pub fn clear_fields() -> ComposeState {
        ComposeState::new()
    }

    fn refresh_names(&mut self) {
        self.names = self.store.names().map(str::to_string).collect();
    }

    fn refresh(&mut self) {
        self.refresh_names();
        self.selection = Selection::fallback(&self.store);
    }
}
