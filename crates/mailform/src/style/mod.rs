//! Styling for the compose window.

mod buttons;
mod inputs;
pub mod palette;

pub use buttons::{
    danger_button_style, ghost_button_style, primary_button_style, secondary_button_style,
};
pub use inputs::{card_style, field_input_style, list_style, window_style};
