//! Preview overlay
//!
//! Drawn on top of the gallery. Clicking the dimmed backdrop closes it
//! the same way the Close button does.

use iced::widget::image::Handle;
use iced::widget::{
    button, center, column, container, horizontal_space, image, mouse_area, opaque, row, stack,
    text,
};
use iced::{Alignment, Color, ContentFit, Element, Length, Theme};

use crate::state::data::Photo;
use crate::Message;

const DIALOG_WIDTH: f32 = 900.0;
const PREVIEW_HEIGHT: f32 = 520.0;

type ButtonStyle = fn(&Theme, button::Status) -> button::Style;

pub fn view<'a>(
    base: impl Into<Element<'a, Message>>,
    photo: &'a Photo,
    preview: Option<&Handle>,
    favorite: bool,
) -> Element<'a, Message> {
    let header = row![
        text(photo.title()).size(20).width(Length::Fill),
        button("✕")
            .style(button::text)
            .on_press(Message::ModalClosed),
    ]
    .align_y(Alignment::Center);

    let body: Element<'a, Message> = match preview {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
        None => center(text("Loading...").size(16)).into(),
    };

    let credit = text(format!(
        "Photo by {}  ·  {} × {}",
        photo.photographer, photo.width, photo.height
    ))
    .size(13);

    let (favorite_label, favorite_style): (&str, ButtonStyle) = if favorite {
        ("Unfavorite", button::danger)
    } else {
        ("Favorite", button::secondary)
    };

    let footer = row![
        credit,
        horizontal_space(),
        button(favorite_label)
            .style(favorite_style)
            .on_press(Message::FavoriteToggled),
        button("Download")
            .style(button::primary)
            .on_press(Message::DownloadRequested),
        button("Close")
            .style(button::secondary)
            .on_press(Message::ModalClosed),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let dialog = container(
        column![
            header,
            container(body)
                .width(Length::Fill)
                .height(Length::Fixed(PREVIEW_HEIGHT)),
            footer,
        ]
        .spacing(12),
    )
    .width(Length::Fixed(DIALOG_WIDTH))
    .padding(20)
    .style(container::rounded_box);

    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(dialog)).style(|_theme| container::Style {
                background: Some(
                    Color {
                        a: 0.8,
                        ..Color::BLACK
                    }
                    .into(),
                ),
                ..container::Style::default()
            }))
            .on_press(Message::ModalClosed)
        )
    ]
    .into()
}
