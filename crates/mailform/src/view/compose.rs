//! Compose form view.

use iced::widget::{column, row, text, text_editor, text_input};
use iced::{Alignment, Element, Length};

use mailform_core::ComposeState;

use crate::message::{ComposeMessage, Message};
use crate::style::{self, palette};

/// Width of the label column.
const LABEL_WIDTH: f32 = 90.0;

/// Renders the recipient, cc, subject and body fields.
pub fn view_compose<'a>(
    state: &'a ComposeState,
    body: &'a text_editor::Content,
) -> Element<'a, Message> {
    let p = palette::current();

    let recipient_row = create_field_row("To:", &state.recipient, "recipient@example.com", |s| {
        Message::Compose(ComposeMessage::RecipientChanged(s))
    });

    let cc_row = create_field_row("Cc:", &state.cc, "cc@example.com", |s| {
        Message::Compose(ComposeMessage::CcChanged(s))
    });

    let subject_row = create_field_row("Subject:", &state.subject, "Enter subject", |s| {
        Message::Compose(ComposeMessage::SubjectChanged(s))
    });

    let body_label = text("Message:")
        .size(14)
        .color(p.text_secondary)
        .width(Length::Fixed(LABEL_WIDTH));

    let body_editor = text_editor(body)
        .placeholder("Write your message here...")
        .on_action(|action| Message::Compose(ComposeMessage::BodyEdited(action)))
        .padding(10)
        .size(14)
        .height(Length::Fixed(220.0));

    let body_row = row![body_label, body_editor]
        .spacing(12)
        .align_y(Alignment::Start);

    column![recipient_row, cc_row, subject_row, body_row]
        .spacing(12)
        .into()
}

/// Creates a labeled input field row.
fn create_field_row<'a>(
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    on_change: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    let p = palette::current();
    let label_text = text(label)
        .size(14)
        .color(p.text_secondary)
        .width(Length::Fixed(LABEL_WIDTH));

    let input = text_input(placeholder, value)
        .on_input(on_change)
        .padding(10)
        .size(14)
        .style(style::field_input_style)
        .width(Length::Fill);

    row![label_text, input]
        .spacing(12)
        .align_y(Alignment::Center)
        .into()
}
