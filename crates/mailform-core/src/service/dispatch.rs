//! Mail dispatch.
//!
//! A finished form is handed to the mail client step by step: create a
//! draft, set recipients, subject and body, attach each file in order, send.
//! The first failing step aborts the whole send.

use std::path::{Path, PathBuf};

use crate::compose::{ComposeState, ValidationError, validate_for_send};

/// Errors reported by the mail client.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The mail client could not be reached.
    #[error("Mail client unavailable: {0}")]
    Unavailable(String),

    /// The mail client refused the message or an address.
    #[error("Rejected by mail client: {0}")]
    Rejected(String),

    /// An attachment could not be read.
    #[error("Cannot attach {}: {source}", path.display())]
    Attachment {
        /// Attachment path as given.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The message could not be assembled.
    #[error("Failed to build message: {0}")]
    Build(String),

    /// The mail client failed while sending.
    #[error("Send failed: {0}")]
    Transport(String),
}

/// Errors from [`send_message`].
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// The form is incomplete; nothing was handed to the mail client.
    #[error("{}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// The mail client failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::message)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Something that can deliver a finished form.
pub trait MailDispatcher {
    /// Sends `message`, blocking until the mail client reports back.
    ///
    /// # Errors
    ///
    /// Returns an error if any step of the hand-off fails.
    fn send(&self, message: &ComposeState) -> Result<(), DispatchError>;
}

/// A mail client that builds messages as drafts.
pub trait MailClient {
    /// Draft type produced by this client.
    type Draft: Draft;

    /// Starts a new, empty draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the client is unavailable.
    fn create_draft(&self) -> Result<Self::Draft, DispatchError>;
}

/// A message being assembled inside a mail client.
#[allow(clippy::missing_errors_doc)]
pub trait Draft {
    /// Sets the To and CC fields as typed by the user.
    fn set_recipients(&mut self, to: &str, cc: &str) -> Result<(), DispatchError>;

    /// Sets the subject line.
    fn set_subject(&mut self, subject: &str) -> Result<(), DispatchError>;

    /// Sets the plain text body.
    fn set_body(&mut self, body: &str) -> Result<(), DispatchError>;

    /// Attaches the file at `path`.
    fn add_attachment(&mut self, path: &Path) -> Result<(), DispatchError>;

    /// Sends the draft.
    fn send(self) -> Result<(), DispatchError>;
}

/// Dispatcher that drives a [`MailClient`] through the draft steps.
#[derive(Debug, Clone)]
pub struct ClientDispatcher<C> {
    client: C,
}

impl<C: MailClient> ClientDispatcher<C> {
    /// Wraps a mail client.
    #[must_use]
    pub const fn new(client: C) -> Self {
        Self { client }
    }

    /// The wrapped client.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }
}

impl<C: MailClient> MailDispatcher for ClientDispatcher<C> {
    fn send(&self, message: &ComposeState) -> Result<(), DispatchError> {
        let mut draft = self.client.create_draft()?;
        draft.set_recipients(&message.recipient, &message.cc)?;
        draft.set_subject(&message.subject)?;
        draft.set_body(&message.body)?;
        for attachment in &message.attachments {
            draft.add_attachment(Path::new(attachment))?;
        }
        draft.send()
    }
}

/// Validates `message` and hands it to `dispatcher`.
///
/// The dispatcher is never called for an incomplete form.
///
/// # Errors
///
/// Returns [`SendError::Validation`] if recipient or subject is empty, or
/// [`SendError::Dispatch`] if the mail client fails.
pub fn send_message(
    message: &ComposeState,
    dispatcher: &dyn MailDispatcher,
) -> Result<(), SendError> {
    validate_for_send(message).map_err(SendError::Validation)?;

    tracing::info!(
        "Sending {:?} to {} with {} attachment(s)",
        message.subject,
        message.recipient,
        message.attachments.len()
    );
    dispatcher.send(message)?;
    tracing::info!("Message sent");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Dispatcher that only counts calls.
    #[derive(Default)]
    struct CountingDispatcher {
        calls: Cell<usize>,
    }

    impl MailDispatcher for CountingDispatcher {
        fn send(&self, _message: &ComposeState) -> Result<(), DispatchError> {
            self.calls.set(self.calls.get() + 1);
            Ok(())
        }
    }

    /// Client recording every draft step.
    #[derive(Default, Clone)]
    struct RecordingClient {
        steps: Rc<RefCell<Vec<String>>>,
        fail_on: Option<&'static str>,
    }

    struct RecordingDraft {
        steps: Rc<RefCell<Vec<String>>>,
        fail_on: Option<&'static str>,
    }

    impl RecordingDraft {
        fn record(&self, step: String) -> Result<(), DispatchError> {
            if self.fail_on.is_some_and(|f| step.starts_with(f)) {
                return Err(DispatchError::Rejected(step));
            }
            self.steps.borrow_mut().push(step);
            Ok(())
        }
    }

    impl MailClient for RecordingClient {
        type Draft = RecordingDraft;

        fn create_draft(&self) -> Result<RecordingDraft, DispatchError> {
            self.steps.borrow_mut().push("create".to_string());
            Ok(RecordingDraft {
                steps: Rc::clone(&self.steps),
                fail_on: self.fail_on,
            })
        }
    }

    impl Draft for RecordingDraft {
        fn set_recipients(&mut self, to: &str, cc: &str) -> Result<(), DispatchError> {
            self.record(format!("recipients {to} / {cc}"))
        }

        fn set_subject(&mut self, subject: &str) -> Result<(), DispatchError> {
            self.record(format!("subject {subject}"))
        }

        fn set_body(&mut self, body: &str) -> Result<(), DispatchError> {
            self.record(format!("body {body}"))
        }

        fn add_attachment(&mut self, path: &Path) -> Result<(), DispatchError> {
            self.record(format!("attach {}", path.display()))
        }

        fn send(self) -> Result<(), DispatchError> {
            self.record("send".to_string())
        }
    }

    fn message() -> ComposeState {
        ComposeState {
            recipient: "a@x.com".to_string(),
            cc: "b@x.com".to_string(),
            subject: "Inv #1".to_string(),
            body: "see attached".to_string(),
            attachments: vec!["/tmp/a.pdf".to_string(), "/tmp/b.pdf".to_string()],
        }
    }

    #[test]
    fn test_incomplete_form_never_reaches_dispatcher() {
        let dispatcher = CountingDispatcher::default();

        for (recipient, subject) in [("", "Subject"), ("a@x.com", ""), ("", "")] {
            let form = ComposeState {
                recipient: recipient.to_string(),
                subject: subject.to_string(),
                ..message()
            };
            let err = send_message(&form, &dispatcher).unwrap_err();
            assert!(matches!(err, SendError::Validation(_)));
        }

        assert_eq!(dispatcher.calls.get(), 0);
    }

    #[test]
    fn test_complete_form_is_dispatched_once() {
        let dispatcher = CountingDispatcher::default();
        send_message(&message(), &dispatcher).unwrap();
        assert_eq!(dispatcher.calls.get(), 1);
    }

    #[test]
    fn test_validation_error_message() {
        let err = send_message(&ComposeState::new(), &CountingDispatcher::default()).unwrap_err();
        assert_eq!(err.to_string(), "Recipient is required; Subject is required");
    }

    #[test]
    fn test_steps_run_in_order() {
        let client = RecordingClient::default();
        let steps = Rc::clone(&client.steps);

        ClientDispatcher::new(client).send(&message()).unwrap();

        assert_eq!(
            *steps.borrow(),
            [
                "create",
                "recipients a@x.com / b@x.com",
                "subject Inv #1",
                "body see attached",
                "attach /tmp/a.pdf",
                "attach /tmp/b.pdf",
                "send",
            ]
        );
    }

    #[test]
    fn test_failing_attachment_aborts_send() {
        let client = RecordingClient {
            fail_on: Some("attach /tmp/b.pdf"),
            ..RecordingClient::default()
        };
        let steps = Rc::clone(&client.steps);

        let err = ClientDispatcher::new(client).send(&message()).unwrap_err();

        assert!(matches!(err, DispatchError::Rejected(_)));
        assert!(!steps.borrow().iter().any(|s| s == "send"));
    }
}
