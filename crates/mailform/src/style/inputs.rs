//! Input and container style functions.

use iced::widget::{container, text_input};
use iced::{Background, Border};

use super::buttons::RADIUS;
use super::palette;

/// Form field input style.
pub fn field_input_style(_theme: &iced::Theme, status: text_input::Status) -> text_input::Style {
    let p = palette::current();

    let base = text_input::Style {
        background: Background::Color(p.surface),
        border: Border {
            color: p.border_subtle,
            width: 1.0,
            radius: RADIUS.into(),
        },
        icon: p.text_muted,
        placeholder: p.text_muted,
        value: p.text_primary,
        selection: p.selected,
    };

    match status {
        text_input::Status::Active => base,
        text_input::Status::Hovered => text_input::Style {
            border: Border {
                color: p.border_medium,
                ..base.border
            },
            ..base
        },
        text_input::Status::Focused { .. } => text_input::Style {
            border: Border {
                color: p.primary,
                ..base.border
            },
            ..base
        },
        text_input::Status::Disabled => text_input::Style {
            background: Background::Color(p.surface_sunken),
            value: p.text_muted,
            ..base
        },
    }
}

/// Window background.
pub fn window_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();
    container::Style {
        background: Some(Background::Color(p.background)),
        text_color: Some(p.text_primary),
        ..Default::default()
    }
}

/// Card holding a group of controls.
pub fn card_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();
    container::Style {
        background: Some(Background::Color(p.surface)),
        border: Border {
            color: p.border_subtle,
            width: 1.0,
            radius: (RADIUS * 1.5).into(),
        },
        ..Default::default()
    }
}

/// Attachment list background.
pub fn list_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();
    container::Style {
        background: Some(Background::Color(p.surface_sunken)),
        border: Border {
            color: p.border_subtle,
            width: 1.0,
            radius: RADIUS.into(),
        },
        ..Default::default()
    }
}
