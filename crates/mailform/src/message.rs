//! Message types for application events.
//!
//! In the Elm architecture, Messages are events that trigger state changes.

use std::path::PathBuf;

use iced::widget::text_editor;
use mailform_core::Selection;

/// Application messages (events).
#[derive(Debug, Clone)]
pub enum Message {
    /// Compose form messages.
    Compose(ComposeMessage),
    /// Template bar messages.
    Template(TemplateMessage),
    /// Attachment list messages.
    Attachment(AttachmentMessage),
    /// Send the message.
    Send,
    /// Email sent result.
    EmailSent(Result<(), String>),
    /// Hide the status line.
    DismissStatus,
    /// Keyboard shortcut pressed.
    KeyPressed(KeyboardAction),
    /// Event with nothing to do.
    Ignored,
}

/// Messages for the compose fields.
#[derive(Debug, Clone)]
pub enum ComposeMessage {
    /// Recipient field changed.
    RecipientChanged(String),
    /// CC field changed.
    CcChanged(String),
    /// Subject changed.
    SubjectChanged(String),
    /// Body editor action.
    BodyEdited(text_editor::Action),
}

/// Messages for the template bar.
#[derive(Debug, Clone)]
pub enum TemplateMessage {
    /// A template (or "no template") was picked.
    Selected(Selection),
    /// Open the name prompt.
    StartSave,
    /// Name prompt text changed.
    NameChanged(String),
    /// Save under the prompted name.
    ConfirmSave,
    /// Close the name prompt without saving.
    CancelSave,
    /// Delete the selected template.
    DeleteSelected,
    /// Empty the form.
    ClearFields,
}

/// Messages for the attachment list.
#[derive(Debug, Clone)]
pub enum AttachmentMessage {
    /// Open the file picker.
    Pick,
    /// Files chosen in the picker (empty when cancelled).
    Picked(Vec<PathBuf>),
    /// A file was dropped onto the window.
    Dropped(PathBuf),
    /// Remove the attachment at this index.
    Remove(usize),
    /// Open the attachment at this index with the default application.
    Open(usize),
}

/// Keyboard actions that can be triggered by shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardAction {
    /// Send the message (Ctrl+Enter).
    Send,
    /// Save as template (Ctrl+S).
    SaveTemplate,
    /// Clear the form (Ctrl+L).
    Clear,
    /// Close the name prompt (Escape).
    Cancel,
}
