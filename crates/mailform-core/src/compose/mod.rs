//! Compose form module.
//!
//! Provides the in-memory form values and the checks run before sending.

mod model;
mod validation;

pub use model::ComposeState;
pub use validation::{ValidationError, ValidationResult, validate_for_send};
