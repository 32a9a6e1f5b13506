//! UI-only state that sits next to the core session.

mod prompt;
mod status;

pub use prompt::NamePrompt;
pub use status::Status;
