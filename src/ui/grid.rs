//! Thumbnail grid
//!
//! Cards flow left to right and wrap with the window width.

use iced::widget::image::Handle;
use iced::widget::{button, center, column, container, image, row, text};
use iced::{ContentFit, Element, Length, Pixels};
use iced_aw::Wrap;

use crate::state::data::{Photo, Resolution};
use crate::state::favorites::Favorites;
use crate::thumbnails::ImageCache;
use crate::Message;

const CARD_WIDTH: f32 = 300.0;
const CARD_IMAGE_HEIGHT: f32 = 200.0;
const CARD_SPACING: f32 = 16.0;

pub fn view<'a>(
    photos: &'a [Photo],
    images: &'a ImageCache,
    favorites: &'a Favorites,
) -> Element<'a, Message> {
    let cards: Vec<Element<'a, Message>> = photos
        .iter()
        .map(|photo| {
            card(
                photo,
                images.get(photo.id, Resolution::Medium),
                favorites.contains(photo.id),
            )
        })
        .collect();

    Wrap::with_elements(cards)
        .spacing(Pixels(CARD_SPACING))
        .line_spacing(Pixels(CARD_SPACING))
        .into()
}

fn card<'a>(photo: &'a Photo, thumbnail: Option<&Handle>, favorite: bool) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match thumbnail {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Cover)
            .into(),
        None => center(text("...").size(14)).into(),
    };

    let caption = row![
        text(photo.title()).size(14).width(Length::Fill),
        text(if favorite { "♥" } else { "" }).size(14),
    ]
    .spacing(6);

    let content = column![
        container(picture)
            .width(Length::Fill)
            .height(Length::Fixed(CARD_IMAGE_HEIGHT)),
        caption,
    ]
    .spacing(8);

    button(content)
        .width(Length::Fixed(CARD_WIDTH))
        .padding(8)
        .style(button::secondary)
        .on_press(Message::PhotoClicked(photo.id))
        .into()
}
