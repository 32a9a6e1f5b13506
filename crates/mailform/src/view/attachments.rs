//! Attachment list view.

use std::path::Path;

use iced::widget::{Column, button, column, container, row, text};
use iced::{Alignment, Element, Length};

use crate::message::{AttachmentMessage, Message};
use crate::style::{self, palette};

/// Renders the attached files with their actions.
pub fn view_attachments(attachments: &[String]) -> Element<'_, Message> {
    let p = palette::current();

    let header = row![
        text("Attachments").size(14).color(p.text_secondary),
        iced::widget::Space::new().width(Length::Fill),
        button(text("Add attachments").size(13))
            .padding([6, 12])
            .style(style::secondary_button_style)
            .on_press(Message::Attachment(AttachmentMessage::Pick)),
    ]
    .align_y(Alignment::Center);

    let list: Element<'_, Message> = if attachments.is_empty() {
        text("Drop files here or use Add attachments")
            .size(13)
            .color(p.text_muted)
            .into()
    } else {
        attachments
            .iter()
            .enumerate()
            .fold(Column::new().spacing(4), |col, (index, path)| {
                col.push(attachment_row(index, path))
            })
            .into()
    };

    column![
        header,
        container(list)
            .padding(8)
            .width(Length::Fill)
            .style(style::list_style),
    ]
    .spacing(8)
    .into()
}

fn attachment_row(index: usize, path: &str) -> Element<'_, Message> {
    let p = palette::current();
    let file_name = Path::new(path)
        .file_name()
        .map_or_else(|| path.to_string(), |name| name.to_string_lossy().into_owned());

    row![
        text(file_name).size(13).color(p.text_primary),
        text(path).size(11).color(p.text_muted).width(Length::Fill),
        button(text("Open").size(12))
            .padding([4, 8])
            .style(style::ghost_button_style)
            .on_press(Message::Attachment(AttachmentMessage::Open(index))),
        button(text("Remove").size(12))
            .padding([4, 8])
            .style(style::ghost_button_style)
            .on_press(Message::Attachment(AttachmentMessage::Remove(index))),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}
