//! Top bar: brand, category shortcuts, search box and favorites count

use std::fmt;

use iced::widget::{button, container, horizontal_space, pick_list, row, text, text_input};
use iced::{Alignment, Element, Length};

use crate::Message;

/// Preset searches offered in the Categories menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Nature,
    Animals,
    Technology,
    Architecture,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Nature,
        Category::Animals,
        Category::Technology,
        Category::Architecture,
    ];

    /// Query sent to the API for this category
    pub fn query(self) -> &'static str {
        match self {
            Category::Nature => "nature",
            Category::Animals => "animals",
            Category::Technology => "technology",
            Category::Architecture => "architecture",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Nature => "Nature",
            Category::Animals => "Animals",
            Category::Technology => "Technology",
            Category::Architecture => "Architecture",
        };
        f.write_str(label)
    }
}

pub fn view<'a>(draft: &'a str, status: String, favorites: usize) -> Element<'a, Message> {
    let categories = pick_list(Category::ALL, None::<Category>, Message::CategorySelected)
        .placeholder("Categories");

    let search = text_input("Search images", draft)
        .on_input(Message::QueryChanged)
        .on_submit(Message::SearchSubmitted)
        .padding(8)
        .width(Length::Fixed(320.0));

    let bar = row![
        text("Pexels").size(28),
        categories,
        text(status).size(14),
        horizontal_space(),
        search,
        button("Search")
            .padding(8)
            .style(button::success)
            .on_press(Message::SearchSubmitted),
        text(format!("♥ {}", favorites)).size(16),
    ]
    .spacing(16)
    .align_y(Alignment::Center);

    container(bar)
        .width(Length::Fill)
        .padding(12)
        .style(container::rounded_box)
        .into()
}
