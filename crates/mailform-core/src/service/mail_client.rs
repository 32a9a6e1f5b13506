//! Mail clients backed by `lettre`.
//!
//! [`SendmailClient`] hands messages to the locally installed
//! sendmail-compatible mail program. [`OutboxClient`] writes `.eml` files
//! into a directory watched by a desktop mail client.

use std::path::Path;
use std::sync::Arc;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::{FileTransport, Message, SendmailTransport, Transport};

use super::dispatch::{ClientDispatcher, DispatchError, Draft, MailClient, MailDispatcher};
use crate::config::{Config, TransportConfig};

/// Builds the dispatcher selected by the configuration.
///
/// # Errors
///
/// Returns an error if the sender address cannot be parsed.
pub fn dispatcher_from_config(
    config: &Config,
) -> Result<Arc<dyn MailDispatcher + Send + Sync>, DispatchError> {
    let sender = config.sender();
    match &config.transport {
        TransportConfig::Sendmail { command } => {
            let client = SendmailClient::new(&sender, command.as_deref())?;
            tracing::info!("Using sendmail transport");
            Ok(Arc::new(ClientDispatcher::new(client)))
        }
        TransportConfig::Outbox { directory } => {
            let client = OutboxClient::new(&sender, directory)?;
            tracing::info!("Using outbox directory {}", directory.display());
            Ok(Arc::new(ClientDispatcher::new(client)))
        }
    }
}

/// Client that pipes messages into the local sendmail program.
#[derive(Debug, Clone)]
pub struct SendmailClient {
    transport: SendmailTransport,
    sender: Mailbox,
}

impl SendmailClient {
    /// Creates a client sending as `sender`.
    ///
    /// Uses `command` as the mail program, or the platform default.
    ///
    /// # Errors
    ///
    /// Returns an error if `sender` is not a valid address.
    pub fn new(sender: &str, command: Option<&Path>) -> Result<Self, DispatchError> {
        let transport = command.map_or_else(SendmailTransport::new, |command| {
            SendmailTransport::new_with_command(command.as_os_str())
        });
        Ok(Self {
            transport,
            sender: parse_sender(sender)?,
        })
    }
}

impl MailClient for SendmailClient {
    type Draft = LettreDraft<SendmailTransport>;

    fn create_draft(&self) -> Result<Self::Draft, DispatchError> {
        Ok(LettreDraft::new(self.transport.clone(), self.sender.clone()))
    }
}

/// Client that writes each message as an `.eml` file.
#[derive(Debug, Clone)]
pub struct OutboxClient {
    transport: FileTransport,
    directory: std::path::PathBuf,
    sender: Mailbox,
}

impl OutboxClient {
    /// Creates a client writing into `directory` as `sender`.
    ///
    /// # Errors
    ///
    /// Returns an error if `sender` is not a valid address.
    pub fn new(sender: &str, directory: &Path) -> Result<Self, DispatchError> {
        Ok(Self {
            transport: FileTransport::new(directory),
            directory: directory.to_path_buf(),
            sender: parse_sender(sender)?,
        })
    }
}

impl MailClient for OutboxClient {
    type Draft = LettreDraft<FileTransport>;

    fn create_draft(&self) -> Result<Self::Draft, DispatchError> {
        if !self.directory.is_dir() {
            return Err(DispatchError::Unavailable(format!(
                "outbox directory {} does not exist",
                self.directory.display()
            )));
        }
        Ok(LettreDraft::new(self.transport.clone(), self.sender.clone()))
    }
}

/// Draft assembled in memory and handed to a `lettre` transport on send.
#[derive(Debug)]
pub struct LettreDraft<T> {
    transport: T,
    sender: Mailbox,
    to: Vec<Mailbox>,
    cc: Vec<Mailbox>,
    subject: String,
    body: String,
    attachments: Vec<SinglePart>,
}

impl<T> LettreDraft<T> {
    const fn new(transport: T, sender: Mailbox) -> Self {
        Self {
            transport,
            sender,
            to: Vec::new(),
            cc: Vec::new(),
            subject: String::new(),
            body: String::new(),
            attachments: Vec::new(),
        }
    }

    fn build(self) -> Result<(T, Message), DispatchError> {
        let mut builder = Message::builder()
            .from(self.sender)
            .subject(self.subject);
        for mailbox in self.to {
            builder = builder.to(mailbox);
        }
        for mailbox in self.cc {
            builder = builder.cc(mailbox);
        }

        let built = if self.attachments.is_empty() {
            builder.header(ContentType::TEXT_PLAIN).body(self.body)
        } else {
            let mut multipart = MultiPart::mixed().singlepart(SinglePart::plain(self.body));
            for part in self.attachments {
                multipart = multipart.singlepart(part);
            }
            builder.multipart(multipart)
        };
        let message = built.map_err(|e| DispatchError::Build(e.to_string()))?;

        Ok((self.transport, message))
    }
}

impl<T> Draft for LettreDraft<T>
where
    T: Transport,
    T::Error: std::fmt::Display,
{
    fn set_recipients(&mut self, to: &str, cc: &str) -> Result<(), DispatchError> {
        let to = parse_mailboxes(to)?;
        if to.is_empty() {
            return Err(DispatchError::Rejected("no recipients".to_string()));
        }
        self.to = to;
        self.cc = parse_mailboxes(cc)?;
        Ok(())
    }

    fn set_subject(&mut self, subject: &str) -> Result<(), DispatchError> {
        subject.clone_into(&mut self.subject);
        Ok(())
    }

    fn set_body(&mut self, body: &str) -> Result<(), DispatchError> {
        body.clone_into(&mut self.body);
        Ok(())
    }

    fn add_attachment(&mut self, path: &Path) -> Result<(), DispatchError> {
        let content = std::fs::read(path).map_err(|source| DispatchError::Attachment {
            path: path.to_path_buf(),
            source,
        })?;
        let filename = path.file_name().map_or_else(
            || "attachment".to_string(),
            |name| name.to_string_lossy().into_owned(),
        );
        let content_type = ContentType::parse("application/octet-stream")
            .map_err(|e| DispatchError::Build(e.to_string()))?;

        tracing::debug!("Attaching {} ({} bytes)", path.display(), content.len());
        self.attachments
            .push(Attachment::new(filename).body(content, content_type));
        Ok(())
    }

    fn send(self) -> Result<(), DispatchError> {
        let (transport, message) = self.build()?;
        transport
            .send(&message)
            .map_err(|e| DispatchError::Transport(e.to_string()))?;
        Ok(())
    }
}

fn parse_sender(sender: &str) -> Result<Mailbox, DispatchError> {
    sender
        .trim()
        .parse()
        .map_err(|e| DispatchError::Rejected(format!("invalid sender {sender:?}: {e}")))
}

/// Splits a recipient field on `,` and `;`, skipping blank entries.
fn parse_mailboxes(field: &str) -> Result<Vec<Mailbox>, DispatchError> {
    field
        .split([',', ';'])
        .map(str::trim)
        .filter(|addr| !addr.is_empty())
        .map(|addr| {
            addr.parse()
                .map_err(|e| DispatchError::Rejected(format!("invalid address {addr:?}: {e}")))
        })
        .collect()
}
