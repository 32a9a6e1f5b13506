//! # mailform-core
//!
//! Core logic for the `mailform` desktop composer.
//!
//! This crate provides:
//! - **Compose state** - the live form values and send-time validation
//! - **Templates** - named snapshots of the form persisted to a JSON file
//! - **Template controller** - keeps the form, the store and the current
//!   selection consistent under save, apply and delete
//! - **Session** - the application context object the GUI drives
//! - **Dispatch** - hands finished messages to the local mail program
//! - **Configuration** - user settings loaded from the config directory

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod compose;
pub mod config;
mod error;
pub mod service;
mod session;
pub mod template;

pub use compose::{ComposeState, ValidationError, ValidationResult, validate_for_send};
pub use config::{Config, TransportConfig};
pub use error::{Error, Result};
pub use service::{
    ClientDispatcher, DispatchError, Draft, MailClient, MailDispatcher, OutboxClient, SendError,
    SendmailClient, TemplateController, TemplateError, dispatcher_from_config, send_message,
};
pub use session::Session;
pub use template::{PersistenceError, Selection, Template, TemplateStore, Templates};
