//! `Mailform` - Desktop form for composing email from reusable templates
//!
//! Built with the iced GUI framework on top of `mailform-core`.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod message;
mod model;
mod style;
mod view;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use iced::keyboard::{self, Key, Modifiers};
use iced::widget::{column, container, scrollable, text_editor};
use iced::{Element, Event, Length, Size, Subscription, Task, event, window};
use mailform_core::{Config, MailDispatcher, Session, dispatcher_from_config, send_message};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use message::{AttachmentMessage, ComposeMessage, KeyboardAction, Message, TemplateMessage};
use model::{NamePrompt, Status};
use style::palette::{self, ThemeMode};

/// Dispatcher shared with the send task.
type SharedDispatcher = Arc<dyn MailDispatcher + Send + Sync>;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailform=info,mailform_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mailform");

    if let Err(e) = run() {
        error!("{e:#}");
        return Err(e);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let config = Config::load_default().context("Failed to load configuration")?;
    let session = Session::open(&config).with_context(|| {
        format!(
            "Failed to open template file {}",
            config.templates_file.display()
        )
    })?;
    let dispatcher = dispatcher_from_config(&config).context("Failed to set up mail client")?;

    palette::set_theme(ThemeMode::from_dark(config.dark_mode));

    iced::application(
        move || Mailform::new(session.clone(), Arc::clone(&dispatcher)),
        Mailform::update,
        Mailform::view,
    )
    .title("Mailform")
    .subscription(Mailform::subscription)
    .window_size(Size::new(780.0, 760.0))
    .run()?;

    Ok(())
}

/// Main application state.
struct Mailform {
    /// Form and templates.
    session: Session,
    /// Where finished messages go.
    dispatcher: SharedDispatcher,
    /// Editor buffer mirroring the body field.
    body: text_editor::Content,
    /// Open while the user is naming a new template.
    name_prompt: Option<NamePrompt>,
    /// Feedback from the last action.
    status: Option<Status>,
    /// Whether a send is in flight.
    is_sending: bool,
}

impl Mailform {
    fn new(session: Session, dispatcher: SharedDispatcher) -> (Self, Task<Message>) {
        let body = text_editor::Content::with_text(&session.compose().body);
        let app = Self {
            session,
            dispatcher,
            body,
            name_prompt: None,
            status: None,
            is_sending: false,
        };
        (app, Task::none())
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Compose(msg) => self.handle_compose(msg),
            Message::Template(msg) => self.handle_template(msg),
            Message::Attachment(msg) => return self.handle_attachment(msg),
            Message::Send => return self.start_send(),
            Message::EmailSent(result) => {
                self.is_sending = false;
                match result {
                    Ok(()) => self.status = Some(Status::info("Message sent")),
                    Err(e) => {
                        error!("Send failed: {e}");
                        self.status = Some(Status::error(e));
                    }
                }
            }
            Message::DismissStatus => self.status = None,
            Message::KeyPressed(action) => return self.handle_keyboard(action),
            Message::Ignored => {}
        }
        Task::none()
    }

    fn handle_compose(&mut self, msg: ComposeMessage) {
        match msg {
            ComposeMessage::RecipientChanged(value) => self.session.compose_mut().recipient = value,
            ComposeMessage::CcChanged(value) => self.session.compose_mut().cc = value,
            ComposeMessage::SubjectChanged(value) => self.session.compose_mut().subject = value,
            ComposeMessage::BodyEdited(action) => {
                let is_edit = action.is_edit();
                self.body.perform(action);
                if is_edit {
                    self.session.compose_mut().body = editor_text(&self.body);
                }
            }
        }
    }

    fn handle_template(&mut self, msg: TemplateMessage) {
        match msg {
            TemplateMessage::Selected(selection) => {
                self.session.select_template(selection);
                self.sync_body();
            }
            TemplateMessage::StartSave => {
                let name = self.session.selection().name().unwrap_or_default();
                self.name_prompt = Some(NamePrompt::with_name(name));
            }
            TemplateMessage::NameChanged(name) => {
                if let Some(prompt) = &mut self.name_prompt {
                    prompt.name = name;
                }
            }
            TemplateMessage::ConfirmSave => {
                let Some(prompt) = self.name_prompt.take() else {
                    return;
                };
                match self.session.save_as_template(&prompt.name) {
                    Ok(name) => {
                        self.status = Some(Status::info(format!("Template '{name}' saved")));
                        self.sync_body();
                    }
                    Err(e) => {
                        warn!("Failed to save template: {e}");
                        self.status = Some(Status::error(e.to_string()));
                        self.name_prompt = Some(prompt);
                    }
                }
            }
            TemplateMessage::CancelSave => self.name_prompt = None,
            TemplateMessage::DeleteSelected => match self.session.delete_selected() {
                Ok(name) => {
                    self.status = Some(Status::info(format!("Template '{name}' deleted")));
                    self.sync_body();
                }
                Err(e) => {
                    warn!("Failed to delete template: {e}");
                    self.status = Some(Status::error(e.to_string()));
                }
            },
            TemplateMessage::ClearFields => {
                self.session.clear_fields();
                self.sync_body();
            }
        }
    }

    fn handle_attachment(&mut self, msg: AttachmentMessage) -> Task<Message> {
        match msg {
            AttachmentMessage::Pick => {
                return Task::perform(pick_files(), |paths| {
                    Message::Attachment(AttachmentMessage::Picked(paths))
                });
            }
            AttachmentMessage::Picked(paths) => {
                self.session
                    .add_attachments(paths.iter().map(|path| path_string(path)));
            }
            AttachmentMessage::Dropped(path) => {
                self.session.add_attachments([path_string(&path)]);
            }
            AttachmentMessage::Remove(index) => {
                self.session.remove_attachment(index);
            }
            AttachmentMessage::Open(index) => {
                if let Some(path) = self.session.compose().attachments.get(index) {
                    if let Err(e) = opener::open(path) {
                        warn!("Failed to open {path}: {e}");
                        self.status = Some(Status::error(format!("Cannot open {path}: {e}")));
                    }
                }
            }
        }
        Task::none()
    }

    fn handle_keyboard(&mut self, action: KeyboardAction) -> Task<Message> {
        match action {
            KeyboardAction::Send => return self.start_send(),
            KeyboardAction::SaveTemplate => {
                if self.name_prompt.is_none() {
                    self.handle_template(TemplateMessage::StartSave);
                }
            }
            KeyboardAction::Clear => self.handle_template(TemplateMessage::ClearFields),
            KeyboardAction::Cancel => self.name_prompt = None,
        }
        Task::none()
    }

    /// Validates the form and hands a snapshot to the send task.
    fn start_send(&mut self) -> Task<Message> {
        if self.is_sending {
            return Task::none();
        }
        match self.session.prepare_send() {
            Ok(snapshot) => {
                self.is_sending = true;
                self.status = Some(Status::info("Sending..."));
                Task::perform(
                    send_email(Arc::clone(&self.dispatcher), snapshot),
                    Message::EmailSent,
                )
            }
            Err(errors) => {
                let text = errors
                    .iter()
                    .map(mailform_core::ValidationError::message)
                    .collect::<Vec<_>>()
                    .join("; ");
                self.status = Some(Status::error(text));
                Task::none()
            }
        }
    }

    /// Reloads the editor after the body changed outside of it.
    fn sync_body(&mut self) {
        self.body = text_editor::Content::with_text(&self.session.compose().body);
    }

    fn view(&self) -> Element<'_, Message> {
        let compose = self.session.compose();

        let templates = view::view_template_bar(
            self.session.templates().names(),
            self.session.selection(),
            self.name_prompt.as_ref(),
        );
        let form = view::view_compose(compose, &self.body);
        let attachments = view::view_attachments(&compose.attachments);
        let send_bar = view::view_send_bar(self.status.as_ref(), self.is_sending);

        let card = container(
            column![templates, form, attachments, send_bar]
                .spacing(18)
                .padding(20),
        )
        .style(style::card_style)
        .width(Length::Fill);

        container(scrollable(container(card).padding(16)))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(style::window_style)
            .into()
    }

    /// Keyboard shortcuts and files dropped onto the window.
    #[allow(clippy::unused_self)] // Required signature for iced subscription
    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            keyboard::listen().map(|event| {
                if let keyboard::Event::KeyPressed { key, modifiers, .. } = event {
                    handle_key_press(key, modifiers).unwrap_or(Message::Ignored)
                } else {
                    Message::Ignored
                }
            }),
            event::listen_with(handle_window_event),
        ])
    }
}

/// Handle keyboard shortcuts and return appropriate message.
fn handle_key_press(key: Key, modifiers: Modifiers) -> Option<Message> {
    let ctrl = modifiers.command(); // Ctrl on Linux/Windows, Cmd on macOS

    match key {
        // Ctrl+Enter: Send
        Key::Named(keyboard::key::Named::Enter) if ctrl => {
            Some(Message::KeyPressed(KeyboardAction::Send))
        }
        // Ctrl+S: Save as template
        Key::Character(c) if ctrl && c.as_str().eq_ignore_ascii_case("s") => {
            Some(Message::KeyPressed(KeyboardAction::SaveTemplate))
        }
        // Ctrl+L: Clear fields
        Key::Character(c) if ctrl && c.as_str().eq_ignore_ascii_case("l") => {
            Some(Message::KeyPressed(KeyboardAction::Clear))
        }
        // Escape: Close the name prompt
        Key::Named(keyboard::key::Named::Escape) => {
            Some(Message::KeyPressed(KeyboardAction::Cancel))
        }
        _ => None,
    }
}

/// Turns dropped files into attachment messages.
fn handle_window_event(
    event: Event,
    _status: event::Status,
    _window: window::Id,
) -> Option<Message> {
    match event {
        Event::Window(window::Event::FileDropped(path)) => {
            Some(Message::Attachment(AttachmentMessage::Dropped(path)))
        }
        _ => None,
    }
}

/// Body text as stored in the form.
fn editor_text(content: &text_editor::Content) -> String {
    trim_body(content.text())
}

/// Drops trailing line breaks, including the one the editor appends.
fn trim_body(mut text: String) -> String {
    let len = text.trim_end_matches(['\n', '\r']).len();
    text.truncate(len);
    text
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Show the native file picker.
async fn pick_files() -> Vec<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Add attachments")
        .pick_files()
        .await
        .map(|files| {
            files
                .iter()
                .map(|file| file.path().to_path_buf())
                .collect()
        })
        .unwrap_or_default()
}

/// Send a message through the configured mail client.
async fn send_email(
    dispatcher: SharedDispatcher,
    message: mailform_core::ComposeState,
) -> Result<(), String> {
    tokio::task::spawn_blocking(move || send_message(&message, dispatcher.as_ref()))
        .await
        .map_err(|e| format!("Send task failed: {e}"))?
        .map_err(|e| e.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mailform_core::{ComposeState, DispatchError, Selection, TemplateStore};

    struct NoopDispatcher;

    impl MailDispatcher for NoopDispatcher {
        fn send(&self, _message: &ComposeState) -> Result<(), DispatchError> {
            Ok(())
        }
    }

    fn app_with_template() -> Mailform {
        let mut session = Session::new(TemplateStore::in_memory());
        session.compose_mut().recipient = "a@x.com".to_string();
        session.compose_mut().subject = "Invoice".to_string();
        session.compose_mut().body = "see attached".to_string();
        session.save_as_template("A").unwrap();
        session.compose_mut().subject = "Edited".to_string();

        let (app, _) = Mailform::new(session, Arc::new(NoopDispatcher));
        app
    }

    fn snapshot(app: &Mailform) -> (Vec<String>, Selection, ComposeState) {
        (
            app.session.templates().names().to_vec(),
            app.session.selection().clone(),
            app.session.compose().clone(),
        )
    }

    #[test]
    fn test_cancelled_name_prompt_changes_nothing() {
        let mut app = app_with_template();
        let before = snapshot(&app);

        let _ = app.update(Message::Template(TemplateMessage::StartSave));
        assert!(app.name_prompt.is_some());
        let _ = app.update(Message::Template(TemplateMessage::NameChanged(
            "X".to_string(),
        )));
        let _ = app.update(Message::Template(TemplateMessage::CancelSave));

        assert!(app.name_prompt.is_none());
        assert_eq!(snapshot(&app), before);
        assert!(app.session.templates().store().get("X").is_none());
    }

    #[test]
    fn test_escape_closes_name_prompt_without_saving() {
        let mut app = app_with_template();
        let before = snapshot(&app);

        let _ = app.update(Message::KeyPressed(KeyboardAction::SaveTemplate));
        let _ = app.update(Message::Template(TemplateMessage::NameChanged(
            "X".to_string(),
        )));
        let _ = app.update(Message::KeyPressed(KeyboardAction::Cancel));

        assert!(app.name_prompt.is_none());
        assert_eq!(snapshot(&app), before);
    }

    #[test]
    fn test_trim_body_drops_trailing_line_breaks() {
        assert_eq!(trim_body("line one\nline two\n".to_string()), "line one\nline two");
        assert_eq!(trim_body("ends blank\n\n\n".to_string()), "ends blank");
        assert_eq!(trim_body("  indented\n".to_string()), "  indented");
        assert_eq!(trim_body("\n".to_string()), "");
    }

    #[test]
    fn test_shortcuts_ignore_letter_case() {
        let msg = handle_key_press(Key::Character("S".into()), Modifiers::COMMAND);
        assert!(matches!(
            msg,
            Some(Message::KeyPressed(KeyboardAction::SaveTemplate))
        ));
        let msg = handle_key_press(Key::Character("L".into()), Modifiers::COMMAND);
        assert!(matches!(msg, Some(Message::KeyPressed(KeyboardAction::Clear))));
    }

    #[test]
    fn test_ctrl_enter_sends() {
        let msg = handle_key_press(
            Key::Named(keyboard::key::Named::Enter),
            Modifiers::COMMAND,
        );
        assert!(matches!(msg, Some(Message::KeyPressed(KeyboardAction::Send))));
    }

    #[test]
    fn test_plain_enter_is_ignored() {
        let msg = handle_key_press(Key::Named(keyboard::key::Named::Enter), Modifiers::empty());
        assert!(msg.is_none());
    }

    #[test]
    fn test_ctrl_s_saves_template() {
        let msg = handle_key_press(Key::Character("s".into()), Modifiers::COMMAND);
        assert!(matches!(
            msg,
            Some(Message::KeyPressed(KeyboardAction::SaveTemplate))
        ));
    }

    #[test]
    fn test_escape_cancels() {
        let msg = handle_key_press(Key::Named(keyboard::key::Named::Escape), Modifiers::empty());
        assert!(matches!(msg, Some(Message::KeyPressed(KeyboardAction::Cancel))));
    }
}
