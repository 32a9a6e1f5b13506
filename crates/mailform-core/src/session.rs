//! Application session.
//!
//! The single context object the presentation layer drives. It owns the
//! compose form and the template controller; every user intent maps to one
//! method here.

use crate::compose::{ComposeState, ValidationError, validate_for_send};
use crate::config::Config;
use crate::service::{TemplateController, TemplateError};
use crate::template::{PersistenceError, Selection, TemplateStore};

/// Form, template store and selection for one run of the application.
#[derive(Debug, Clone)]
pub struct Session {
    compose: ComposeState,
    templates: TemplateController,
}

impl Session {
    /// Opens the template store named by `config` and starts a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the template file exists but is unreadable or
    /// malformed.
    pub fn open(config: &Config) -> Result<Self, PersistenceError> {
        let store = TemplateStore::open(&config.templates_file)?;
        Ok(Self::new(store))
    }

    /// Starts a session over `store`.
    ///
    /// When the store is not empty its first template is selected and
    /// applied to the form.
    #[must_use]
    pub fn new(store: TemplateStore) -> Self {
        let templates = TemplateController::new(store);
        let compose = templates.apply_selection().unwrap_or_default();
        Self { compose, templates }
    }

    /// Current form values.
    #[must_use]
    pub const fn compose(&self) -> &ComposeState {
        &self.compose
    }

    /// Mutable access for direct field edits.
    pub const fn compose_mut(&mut self) -> &mut ComposeState {
        &mut self.compose
    }

    /// The template controller.
    #[must_use]
    pub const fn templates(&self) -> &TemplateController {
        &self.templates
    }

    /// The current template selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        self.templates.selection()
    }

    /// Saves the form as a template and selects it.
    ///
    /// Returns the name used.
    ///
    /// # Errors
    ///
    /// Returns an error, with nothing changed, if the name is empty or
    /// reserved or the template file cannot be written.
    pub fn save_as_template(&mut self, name: &str) -> Result<String, TemplateError> {
        let name = self.templates.save_as_template(name, &self.compose)?;
        self.apply_selection();
        Ok(name)
    }

    /// Changes the selection and applies the chosen template to the form.
    ///
    /// Selecting "no template" leaves the form as it is.
    pub fn select_template(&mut self, selection: Selection) {
        if let Some(applied) = self.templates.select(selection) {
            self.compose = applied;
        }
    }

    /// Deletes the selected template.
    ///
    /// Returns the deleted name.
    ///
    /// # Errors
    ///
    /// Returns an error if "no template" is selected or the template file
    /// cannot be written.
    pub fn delete_selected(&mut self) -> Result<String, TemplateError> {
        let name = self
            .selection()
            .name()
            .map(str::to_string)
            .ok_or_else(|| TemplateError::NotFound(Selection::NONE_LABEL.to_string()))?;
        self.delete_template(&name)?;
        Ok(name)
    }

    /// Deletes the template stored under `name`.
    ///
    /// The form is not cleared. If the selection falls back to another
    /// template, that template is applied to the form.
    ///
    /// # Errors
    ///
    /// Returns an error if no such template exists or the template file
    /// cannot be written.
    pub fn delete_template(&mut self, name: &str) -> Result<(), TemplateError> {
        self.templates.delete_template(name)?;
        self.apply_selection();
        Ok(())
    }

    /// Empties the form. Templates and selection are untouched.
    pub fn clear_fields(&mut self) {
        self.compose = TemplateController::clear_fields();
    }

    /// Appends attachment paths from the file picker or a drop.
    pub fn add_attachments<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compose.add_attachments(paths);
    }

    /// Removes the attachment at `index`.
    pub fn remove_attachment(&mut self, index: usize) -> Option<String> {
        self.compose.remove_attachment(index)
    }

    /// Validates the form and returns a snapshot to hand to a dispatcher.
    ///
    /// # Errors
    ///
    /// Returns every validation failure; nothing is changed.
    pub fn prepare_send(&self) -> Result<ComposeState, Vec<ValidationError>> {
        validate_for_send(&self.compose)?;
        Ok(self.compose.clone())
    }

    fn apply_selection(&mut self) {
        if let Some(applied) = self.templates.apply_selection() {
            self.compose = applied;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::template::Template;

    fn template(subject: &str) -> Template {
        Template {
            recipient: format!("{subject}@x.com"),
            subject: subject.to_string(),
            ..Template::default()
        }
    }

    fn store_with(names: &[&str]) -> TemplateStore {
        let mut store = TemplateStore::in_memory();
        for name in names {
            store.insert(*name, template(name)).unwrap();
        }
        store
    }

    #[test]
    fn test_new_session_applies_first_template() {
        let session = Session::new(store_with(&["B", "A"]));
        assert_eq!(session.selection(), &Selection::from("A"));
        assert_eq!(session.compose().subject, "A");
    }

    #[test]
    fn test_new_session_with_empty_store() {
        let session = Session::new(TemplateStore::in_memory());
        assert_eq!(session.selection(), &Selection::None);
        assert!(session.compose().is_blank());
    }

    #[test]
    fn test_save_keeps_form_and_selects() {
        let mut session = Session::new(store_with(&["A"]));
        session.compose_mut().subject = "Edited".to_string();

        session.save_as_template("Mine").unwrap();

        assert_eq!(session.selection(), &Selection::from("Mine"));
        assert_eq!(session.compose().subject, "Edited");
    }

    #[test]
    fn test_failed_save_changes_nothing() {
        let mut session = Session::new(store_with(&["A"]));
        session.compose_mut().body = "draft".to_string();
        let before = session.compose().clone();

        assert!(session.save_as_template("").is_err());

        assert_eq!(session.compose(), &before);
        assert_eq!(session.selection(), &Selection::from("A"));
        assert_eq!(session.templates().names(), ["A"]);
    }

    #[test]
    fn test_select_none_keeps_form() {
        let mut session = Session::new(store_with(&["A"]));
        session.select_template(Selection::None);
        assert_eq!(session.selection(), &Selection::None);
        assert_eq!(session.compose().subject, "A");
    }

    #[test]
    fn test_delete_selected_applies_fallback() {
        let mut session = Session::new(store_with(&["A", "B"]));

        assert_eq!(session.delete_selected().unwrap(), "A");
        assert_eq!(session.selection(), &Selection::from("B"));
        assert_eq!(session.compose().subject, "B");
    }

    #[test]
    fn test_delete_last_keeps_form() {
        let mut session = Session::new(store_with(&["A"]));
        session.compose_mut().body = "unsaved".to_string();

        session.delete_selected().unwrap();

        assert_eq!(session.selection(), &Selection::None);
        assert_eq!(session.compose().body, "unsaved");
        assert_eq!(session.compose().subject, "A");
    }

    #[test]
    fn test_delete_with_nothing_selected() {
        let mut session = Session::new(TemplateStore::in_memory());
        assert!(matches!(
            session.delete_selected(),
            Err(TemplateError::NotFound(_))
        ));
    }

    #[test]
    fn test_clear_keeps_templates() {
        let mut session = Session::new(store_with(&["A"]));
        session.clear_fields();
        assert!(session.compose().is_blank());
        assert_eq!(session.templates().store().len(), 1);
        assert_eq!(session.selection(), &Selection::from("A"));
    }

    #[test]
    fn test_prepare_send() {
        let mut session = Session::new(TemplateStore::in_memory());
        assert_eq!(
            session.prepare_send().unwrap_err(),
            vec![ValidationError::EmptyRecipient, ValidationError::EmptySubject]
        );

        session.compose_mut().recipient = "a@x.com".to_string();
        session.compose_mut().subject = "Hi".to_string();
        session.add_attachments(["/tmp/a.pdf"]);

        let snapshot = session.prepare_send().unwrap();
        assert_eq!(&snapshot, session.compose());
    }
}
