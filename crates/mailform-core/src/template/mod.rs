//! Template module.
//!
//! Named snapshots of the compose form, the selection the UI considers
//! active, and the file-backed store that keeps them.

mod model;
mod repository;

pub use model::{Selection, Template};
pub use repository::{PersistenceError, TemplateStore, Templates, load, save};
