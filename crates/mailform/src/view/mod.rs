//! View functions for rendering UI.

mod attachments;
mod compose;
mod status;
mod templates;

pub use attachments::view_attachments;
pub use compose::view_compose;
pub use status::view_send_bar;
pub use templates::view_template_bar;
