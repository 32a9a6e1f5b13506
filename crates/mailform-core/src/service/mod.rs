//! Services layer.
//!
//! Template management on top of the store, and message dispatch through
//! the local mail client.

mod dispatch;
mod mail_client;
mod templates;

pub use dispatch::{
    ClientDispatcher, DispatchError, Draft, MailClient, MailDispatcher, SendError, send_message,
};
pub use mail_client::{LettreDraft, OutboxClient, SendmailClient, dispatcher_from_config};
pub use templates::{TemplateController, TemplateError};
