//! Compose form model.

use crate::template::Template;

/// Current values of the compose form.
///
/// No field is ever absent: an untouched field is the empty string and an
/// empty attachment list means no attachments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeState {
    /// Recipient addresses (To), as typed.
    pub recipient: String,
    /// CC addresses, as typed.
    pub cc: String,
    /// Subject line.
    pub subject: String,
    /// Plain text body.
    pub body: String,
    /// Attachment file paths in the order they were added.
    pub attachments: Vec<String>,
}

impl ComposeState {
    /// Creates a new empty compose state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets every field, attachments included.
    pub fn clear(&mut self) {
        self.recipient.clear();
        self.cc.clear();
        self.subject.clear();
        self.body.clear();
        self.attachments.clear();
    }

    /// Returns `true` when nothing has been entered.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.recipient.is_empty()
            && self.cc.is_empty()
            && self.subject.is_empty()
            && self.body.is_empty()
            && self.attachments.is_empty()
    }

    /// Snapshots all five fields into a template.
    #[must_use]
    pub fn capture(&self) -> Template {
        Template {
            recipient: self.recipient.clone(),
            cc: self.cc.clone(),
            subject: self.subject.clone(),
            body: self.body.clone(),
            attachments: self.attachments.clone(),
        }
    }

    /// Overwrites all five fields from a template.
    ///
    /// The attachment list is copied, so later edits to the form never reach
    /// the stored template.
    pub fn restore(&mut self, template: &Template) {
        self.recipient.clone_from(&template.recipient);
        self.cc.clone_from(&template.cc);
        self.subject.clone_from(&template.subject);
        self.body.clone_from(&template.body);
        self.attachments.clone_from(&template.attachments);
    }

    /// Appends one attachment path.
    pub fn add_attachment(&mut self, path: impl Into<String>) {
        self.attachments.push(path.into());
    }

    /// Appends several attachment paths, keeping their order.
    pub fn add_attachments<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attachments.extend(paths.into_iter().map(Into::into));
    }

    /// Removes the attachment at `index`, if any.
    pub fn remove_attachment(&mut self, index: usize) -> Option<String> {
        (index < self.attachments.len()).then(|| self.attachments.remove(index))
    }
}

impl From<&Template> for ComposeState {
    fn from(template: &Template) -> Self {
        let mut state = Self::new();
        state.restore(template);
        state
    }
}
