//! Infinite-scroll trigger
//!
//! The sentinel sits after the last grid row. The sensor looks at the
//! scroll viewport and reports when the sentinel comes into view.

use iced::widget::scrollable::Viewport;
use iced::widget::{button, container, text};
use iced::{Element, Length};

use crate::Message;

/// Height reserved for the sentinel row
pub const SENTINEL_HEIGHT: f32 = 60.0;

/// Whether the last `sentinel_extent` pixels of the content are on screen
pub fn is_visible(offset_y: f32, viewport_height: f32, content_height: f32, sentinel_extent: f32) -> bool {
    let viewport_bottom = offset_y + viewport_height;
    let sentinel_top = (content_height - sentinel_extent).max(0.0);
    viewport_bottom >= sentinel_top
}

/// Whether the sentinel row is on screen in a scroll viewport whose
/// content ends with `bottom_padding` pixels of padding
pub fn in_view(viewport: &Viewport, bottom_padding: f32) -> bool {
    is_visible(
        viewport.absolute_offset().y,
        viewport.bounds().height,
        viewport.content_bounds().height,
        SENTINEL_HEIGHT + bottom_padding,
    )
}

/// Edge detector over successive visibility readings
#[derive(Debug, Default)]
pub struct VisibilitySensor {
    visible: bool,
}

impl VisibilitySensor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a reading; returns `true` only on a hidden -> visible transition
    pub fn observe(&mut self, visible: bool) -> bool {
        let entered = visible && !self.visible;
        self.visible = visible;
        entered
    }

    /// Forget the last reading so a still-visible sentinel fires again
    pub fn rearm(&mut self) {
        self.visible = false;
    }
}

pub fn view<'a>(loading: bool, has_more: bool) -> Element<'a, Message> {
    let content: Element<'a, Message> = if loading {
        text("Loading...").size(16).into()
    } else if has_more {
        button("Load more")
            .padding(10)
            .style(button::secondary)
            .on_press(Message::LoadMore)
            .into()
    } else {
        text("No more images").size(14).into()
    };

    container(content)
        .center_x(Length::Fill)
        .center_y(Length::Fixed(SENTINEL_HEIGHT))
        .into()
}
