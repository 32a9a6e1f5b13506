//! Template bar view.

use iced::widget::{button, column, pick_list, row, text, text_input};
use iced::{Alignment, Element, Length};

use mailform_core::Selection;

use crate::message::{Message, TemplateMessage};
use crate::model::NamePrompt;
use crate::style::{self, palette};

/// Renders the template picker, its actions and the name prompt.
pub fn view_template_bar<'a>(
    names: &'a [String],
    selection: &'a Selection,
    prompt: Option<&'a NamePrompt>,
) -> Element<'a, Message> {
    let p = palette::current();

    let options: Vec<Selection> = std::iter::once(Selection::None)
        .chain(names.iter().map(|name| Selection::Template(name.clone())))
        .collect();

    let picker = pick_list(options, Some(selection.clone()), |choice| {
        Message::Template(TemplateMessage::Selected(choice))
    })
    .placeholder(Selection::NONE_LABEL)
    .padding(8)
    .text_size(14)
    .width(Length::Fill);

    let save_btn = button(text("Save as template").size(14))
        .padding([8, 14])
        .style(style::secondary_button_style)
        .on_press_maybe(
            prompt
                .is_none()
                .then_some(Message::Template(TemplateMessage::StartSave)),
        );

    let delete_btn = button(text("Delete template").size(14))
        .padding([8, 14])
        .style(style::danger_button_style)
        .on_press_maybe(
            (!selection.is_none()).then_some(Message::Template(TemplateMessage::DeleteSelected)),
        );

    let clear_btn = button(text("Clear").size(14))
        .padding([8, 14])
        .style(style::secondary_button_style)
        .on_press(Message::Template(TemplateMessage::ClearFields));

    let label = text("Template:")
        .size(14)
        .color(p.text_secondary)
        .width(Length::Fixed(90.0));

    let bar = row![label, picker, save_btn, delete_btn, clear_btn]
        .spacing(10)
        .align_y(Alignment::Center);

    match prompt {
        Some(prompt) => column![bar, view_name_prompt(prompt)].spacing(10).into(),
        None => bar.into(),
    }
}

/// Inline prompt for the new template's name.
fn view_name_prompt(prompt: &NamePrompt) -> Element<'_, Message> {
    let p = palette::current();

    let label = text("Name:")
        .size(14)
        .color(p.text_secondary)
        .width(Length::Fixed(90.0));

    let input = text_input("Template name", &prompt.name)
        .on_input(|name| Message::Template(TemplateMessage::NameChanged(name)))
        .on_submit(Message::Template(TemplateMessage::ConfirmSave))
        .padding(8)
        .size(14)
        .style(style::field_input_style)
        .width(Length::Fill);

    let confirm_btn = button(text("Save").size(14))
        .padding([8, 14])
        .style(style::primary_button_style)
        .on_press_maybe(
            prompt
                .can_submit()
                .then_some(Message::Template(TemplateMessage::ConfirmSave)),
        );

    let cancel_btn = button(text("Cancel").size(14))
        .padding([8, 14])
        .style(style::secondary_button_style)
        .on_press(Message::Template(TemplateMessage::CancelSave));

    row![label, input, confirm_btn, cancel_btn]
        .spacing(10)
        .align_y(Alignment::Center)
        .into()
}
