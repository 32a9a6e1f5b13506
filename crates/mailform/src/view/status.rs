//! Status line and send bar.

use iced::widget::{button, row, text};
use iced::{Alignment, Element, Length};

use crate::message::Message;
use crate::model::Status;
use crate::style::{self, palette};

/// Renders the status text next to the Send button.
pub fn view_send_bar(status: Option<&Status>, is_sending: bool) -> Element<'_, Message> {
    let p = palette::current();

    let status_el: Element<'_, Message> = match status {
        Some(status) => {
            let color = if status.is_error() {
                p.accent_red
            } else {
                p.accent_green
            };
            row![
                text(status.text()).size(13).color(color),
                button(text("x").size(12))
                    .padding([2, 6])
                    .style(style::ghost_button_style)
                    .on_press(Message::DismissStatus),
            ]
            .spacing(6)
            .align_y(Alignment::Center)
            .into()
        }
        None => text("").into(),
    };

    let label = if is_sending { "Sending..." } else { "Send" };
    let send_btn = button(text(label).size(14))
        .padding([10, 24])
        .style(style::primary_button_style)
        .on_press_maybe((!is_sending).then_some(Message::Send));

    row![
        iced::widget::container(status_el).width(Length::Fill),
        send_btn
    ]
    .spacing(12)
    .align_y(Alignment::Center)
    .into()
}
