use std::path::PathBuf;

use iced::widget::scrollable::{AbsoluteOffset, RelativeOffset, Viewport};
use iced::widget::{column, container, scrollable};
use iced::{Element, Length, Task, Theme};
use tracing::{info, warn};

mod api;
mod config;
mod download;
mod logging;
mod state;
mod thumbnails;
mod ui;

use api::{ApiError, PexelsClient};
use config::Config;
use download::{Destination, DownloadError};
use state::data::{PhotoId, Resolution, SearchPage};
use state::gallery::{Effect, Event, GalleryState};
use state::search::FetchTicket;
use thumbnails::ImageCache;
use ui::navbar::Category;
use ui::sentinel::VisibilitySensor;

/// Padding around the scrolled grid; the sensor needs it to locate the sentinel
const CONTENT_PADDING: f32 = 20.0;

/// Main application state
struct Gallery {
    /// Query, results, selection and favorites
    state: GalleryState,
    client: PexelsClient,
    config: Config,
    /// Fetched thumbnails and previews for the current search
    images: ImageCache,
    /// Watches the end of the grid for infinite scroll
    sensor: VisibilitySensor,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Search box text changed
    QueryChanged(String),
    /// Search form submitted
    SearchSubmitted,
    /// A category shortcut was picked
    CategorySelected(Category),
    /// The grid was scrolled
    Scrolled(Viewport),
    /// "Load more" pressed on the sentinel
    LoadMore,
    /// A search request completed
    SearchFinished(FetchTicket, Result<SearchPage, ApiError>),
    /// Thumbnail or preview bytes arrived
    ImageLoaded {
        generation: u64,
        id: PhotoId,
        resolution: Resolution,
        outcome: Result<Vec<u8>, ApiError>,
    },
    /// A card was clicked
    PhotoClicked(PhotoId),
    /// Overlay dismissed
    ModalClosed,
    FavoriteToggled,
    DownloadRequested,
    /// Background download completed
    DownloadFinished(Result<PathBuf, DownloadError>),
}

impl Gallery {
    /// Create the application and kick off the first search
    fn new(config: Config, client: PexelsClient) -> (Self, Task<Message>) {
        let (state, effect) = GalleryState::new(config.initial_query.clone());
        info!(query = %state.query(), "Pexels gallery started");

        let mut gallery = Gallery {
            state,
            client,
            config,
            images: ImageCache::new(),
            sensor: VisibilitySensor::new(),
        };
        gallery.images.reset(gallery.state.generation());
        let task = gallery.run(effect);
        (gallery, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::QueryChanged(text) => self.dispatch(Event::QueryEdited(text)),
            Message::SearchSubmitted => self.dispatch(Event::SearchSubmitted),
            Message::CategorySelected(category) => {
                self.dispatch(Event::CategoryChosen(category.query().to_string()))
            }
            Message::Scrolled(viewport) => {
                let effect = self.on_sentinel(ui::sentinel::in_view(&viewport, CONTENT_PADDING));
                self.run(effect)
            }
            Message::LoadMore => self.dispatch(Event::SentinelVisible),
            Message::SearchFinished(ticket, outcome) => {
                let first_new = self.state.results().len();
                let task = self.dispatch(Event::FetchCompleted {
                    ticket,
                    outcome: outcome.map_err(|e| e.to_string()),
                });
                // Ask for a fresh viewport so a sentinel that is still on
                // screen after the new rows are laid out fires again
                self.sensor.rearm();
                let recheck = scrollable::scroll_by(grid_id(), AbsoluteOffset { x: 0.0, y: 0.0 });
                Task::batch([task, self.load_thumbnails(first_new), recheck])
            }
            Message::ImageLoaded {
                generation,
                id,
                resolution,
                outcome,
            } => {
                self.images.finish(generation, id, resolution, outcome);
                Task::none()
            }
            Message::PhotoClicked(id) => {
                let task = self.dispatch(Event::PhotoSelected(id));
                Task::batch([task, self.load_image(id, Resolution::Large)])
            }
            Message::ModalClosed => self.dispatch(Event::ModalClosed),
            Message::FavoriteToggled => self.dispatch(Event::FavoriteToggled),
            Message::DownloadRequested => self.dispatch(Event::DownloadRequested),
            Message::DownloadFinished(Err(DownloadError::Cancelled)) => {
                info!("Save dialog cancelled");
                Task::none()
            }
            Message::DownloadFinished(outcome) => {
                self.dispatch(Event::DownloadFinished(outcome.map_err(|e| e.to_string())))
            }
        }
    }

    /// Feed an event to the gallery state and run whatever it asks for
    fn dispatch(&mut self, event: Event) -> Task<Message> {
        let effect = self.state.update(event);

        let mut tasks = vec![self.run(effect)];
        if self.state.generation() != self.images.generation() {
            // A new search started: drop old images and jump back to the top
            self.images.reset(self.state.generation());
            self.sensor.rearm();
            tasks.push(scrollable::snap_to(grid_id(), RelativeOffset::START));
        }
        Task::batch(tasks)
    }

    /// Feed a sentinel visibility reading to the sensor. Coming into view
    /// asks the gallery for the next page.
    fn on_sentinel(&mut self, visible: bool) -> Effect {
        if self.sensor.observe(visible) {
            self.state.update(Event::SentinelVisible)
        } else {
            Effect::None
        }
    }

    fn run(&self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::None => Task::none(),
            Effect::Fetch(ticket) => {
                let client = self.client.clone();
                let query = ticket.query.clone();
                let page = ticket.page;
                Task::perform(
                    async move { client.search(&query, page).await },
                    move |outcome| Message::SearchFinished(ticket.clone(), outcome),
                )
            }
            Effect::Download { url } => match Destination::from_config(&self.config.download) {
                Ok(destination) => Task::perform(
                    download::download(self.client.clone(), url, destination),
                    Message::DownloadFinished,
                ),
                Err(e) => {
                    warn!("Download skipped: {}", e);
                    Task::none()
                }
            },
        }
    }

    /// Request medium thumbnails for results from `first` onwards
    fn load_thumbnails(&mut self, first: usize) -> Task<Message> {
        let ids: Vec<PhotoId> = self
            .state
            .results()
            .iter()
            .skip(first)
            .map(|photo| photo.id)
            .collect();
        Task::batch(
            ids.into_iter()
                .map(|id| self.load_image(id, Resolution::Medium))
                .collect::<Vec<_>>(),
        )
    }

    fn load_image(&mut self, id: PhotoId, resolution: Resolution) -> Task<Message> {
        let Some(photo) = self.state.results().iter().find(|photo| photo.id == id) else {
            return Task::none();
        };
        if !self.images.request(id, resolution) {
            return Task::none();
        }

        let url = photo.url(resolution).to_string();
        let generation = self.images.generation();
        let client = self.client.clone();
        Task::perform(
            async move { client.fetch_bytes(&url).await },
            move |outcome| Message::ImageLoaded {
                generation,
                id,
                resolution,
                outcome,
            },
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let navbar = ui::navbar::view(
            self.state.draft(),
            self.status(),
            self.state.favorites().len(),
        );

        let grid = ui::grid::view(self.state.results(), &self.images, self.state.favorites());
        let sentinel = ui::sentinel::view(self.state.is_loading(), self.state.has_more());

        let body = scrollable(
            column![grid, sentinel]
                .spacing(20)
                .padding(CONTENT_PADDING)
                .width(Length::Fill),
        )
        .id(grid_id())
        .on_scroll(Message::Scrolled)
        .height(Length::Fill);

        let page = container(column![navbar, body]).width(Length::Fill).height(Length::Fill);

        match self.state.selection().photo() {
            Some(photo) => ui::modal::view(
                page,
                photo,
                self.images.get(photo.id, Resolution::Large),
                self.state.favorites().contains(photo.id),
            ),
            None => page.into(),
        }
    }

    /// Summary shown next to the categories menu
    fn status(&self) -> String {
        if self.state.results().is_empty() {
            if self.state.is_loading() {
                format!("Searching for \"{}\"...", self.state.query())
            } else {
                String::new()
            }
        } else {
            format!(
                "{} of {} results for \"{}\"",
                self.state.results().len(),
                self.state.total_results(),
                self.state.query()
            )
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn grid_id() -> scrollable::Id {
    scrollable::Id::new("gallery-grid")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::from_env(), Some(e)),
    };
    logging::init(&config.logging);
    if let Some(e) = config_error {
        warn!("{}; using defaults", e);
    }

    let client = PexelsClient::new(&config.api)?;

    iced::application("Pexels Gallery", Gallery::update, Gallery::view)
        .theme(Gallery::theme)
        .centered()
        .run_with(move || Gallery::new(config, client))?;
    Ok(())
}
