//! Gallery state and its update function
//!
//! All gallery behaviour is expressed as `GalleryState::update(event)`,
//! which mutates the state and returns the side effect the shell should
//! run. Nothing in here knows about iced or HTTP.

use std::path::PathBuf;

use tracing::{debug, error, info};

use super::data::{Photo, PhotoId, Resolution, SearchPage};
use super::favorites::Favorites;
use super::search::{FetchTicket, Pager};
use super::selection::Selection;

/// Inputs to the gallery
#[derive(Debug, Clone)]
pub enum Event {
    /// The search box text changed
    QueryEdited(String),
    /// The search form was submitted with the current draft
    SearchSubmitted,
    /// A category shortcut was chosen
    CategoryChosen(String),
    /// The scroll sentinel entered the viewport
    SentinelVisible,
    /// A search request finished
    FetchCompleted {
        ticket: FetchTicket,
        outcome: Result<SearchPage, String>,
    },
    /// A grid card was clicked
    PhotoSelected(PhotoId),
    /// The preview overlay was dismissed
    ModalClosed,
    /// Favorite button in the preview overlay
    FavoriteToggled,
    /// Download button in the preview overlay
    DownloadRequested,
    /// A download finished, successfully or not
    DownloadFinished(Result<PathBuf, String>),
}

/// Work the caller must perform after an update
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Issue a search request
    Fetch(FetchTicket),
    /// Fetch and save the given asset
    Download { url: String },
}

#[derive(Debug, Clone, Default)]
pub struct GalleryState {
    /// Text currently in the search box
    draft: String,
    pager: Pager,
    results: Vec<Photo>,
    total_results: u64,
    selection: Selection,
    favorites: Favorites,
}

impl GalleryState {
    /// Create the state and the request for the first page of `query`
    pub fn new(query: impl Into<String>) -> (Self, Effect) {
        let mut state = GalleryState {
            draft: query.into(),
            ..Default::default()
        };
        let effect = state.update(Event::SearchSubmitted);
        (state, effect)
    }

    pub fn update(&mut self, event: Event) -> Effect {
        match event {
            Event::QueryEdited(text) => {
                self.draft = text;
                Effect::None
            }
            Event::SearchSubmitted => self.submit(),
            Event::CategoryChosen(query) => {
                self.draft = query;
                self.submit()
            }
            Event::SentinelVisible => match self.pager.advance() {
                Some(ticket) => {
                    debug!(query = %ticket.query, page = ticket.page, "Loading next page");
                    Effect::Fetch(ticket)
                }
                None => Effect::None,
            },
            Event::FetchCompleted { ticket, outcome } => {
                self.finish_fetch(ticket, outcome);
                Effect::None
            }
            Event::PhotoSelected(id) => {
                // Only photos currently in the grid can be previewed
                if let Some(photo) = self.results.iter().find(|photo| photo.id == id) {
                    self.selection = Selection::Open(photo.clone());
                }
                Effect::None
            }
            Event::ModalClosed => {
                self.selection = Selection::Closed;
                Effect::None
            }
            Event::FavoriteToggled => {
                if let Selection::Open(photo) = &self.selection {
                    let now_favorite = self.favorites.toggle(photo);
                    debug!(id = photo.id, now_favorite, "Toggled favorite");
                }
                Effect::None
            }
            Event::DownloadRequested => match self.selection.photo() {
                Some(photo) => Effect::Download {
                    url: photo.url(Resolution::Original).to_string(),
                },
                None => Effect::None,
            },
            Event::DownloadFinished(outcome) => {
                match outcome {
                    Ok(path) => info!(path = %path.display(), "Saved image"),
                    Err(e) => error!("Error downloading the image: {}", e),
                }
                Effect::None
            }
        }
    }

    fn submit(&mut self) -> Effect {
        self.results.clear();
        self.total_results = 0;
        self.selection = Selection::Closed;
        let ticket = self.pager.restart(self.draft.clone());
        info!(query = %ticket.query, "New search");
        Effect::Fetch(ticket)
    }

    fn finish_fetch(&mut self, ticket: FetchTicket, outcome: Result<SearchPage, String>) {
        if !self.pager.is_current(&ticket) {
            debug!(
                query = %ticket.query,
                page = ticket.page,
                "Discarding response for a superseded search"
            );
            return;
        }

        match outcome {
            Ok(page) => {
                debug!(
                    query = %ticket.query,
                    page = ticket.page,
                    reported_page = page.page,
                    count = page.photos.len(),
                    "Appending search results"
                );
                self.pager.complete(&ticket, Some(page.next_page.is_some()));
                self.total_results = page.total_results;
                self.results.extend(page.photos);
            }
            Err(e) => {
                error!(query = %ticket.query, page = ticket.page, "Error fetching images: {}", e);
                self.pager.complete(&ticket, None);
            }
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn query(&self) -> &str {
        self.pager.query()
    }

    pub fn generation(&self) -> u64 {
        self.pager.generation()
    }

    pub fn is_loading(&self) -> bool {
        self.pager.is_loading()
    }

    pub fn has_more(&self) -> bool {
        !self.pager.is_exhausted()
    }

    pub fn results(&self) -> &[Photo] {
        &self.results
    }

    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }
}
