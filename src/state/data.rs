//! Shared data structures for the application state
//!
//! These structs mirror the JSON returned by the Pexels search endpoint
//! and flow unchanged from the HTTP layer into the reducer and the UI.

use serde::Deserialize;

/// Pexels photo identifier
pub type PhotoId = u64;

/// Represents a single photo returned by the search API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Photo {
    /// Unique photo ID assigned by Pexels
    pub id: PhotoId,
    /// Descriptive text (frequently empty)
    #[serde(default)]
    pub alt: String,
    /// Display name of the photographer
    #[serde(default)]
    pub photographer: String,
    /// Original pixel dimensions
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    /// URLs of the available renditions
    pub src: PhotoSources,
}

impl Photo {
    /// Title used for cards and the preview overlay
    pub fn title(&self) -> &str {
        if self.alt.trim().is_empty() {
            "Image"
        } else {
            &self.alt
        }
    }

    /// URL for the given rendition
    pub fn url(&self, resolution: Resolution) -> &str {
        match resolution {
            Resolution::Medium => &self.src.medium,
            Resolution::Large => &self.src.large,
            Resolution::Original => &self.src.original,
        }
    }
}

/// Rendition URLs keyed by resolution name
///
/// Pexels also sends `large2x`, `small`, `portrait`, `landscape` and `tiny`,
/// which the gallery never displays.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PhotoSources {
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub large: String,
    #[serde(default)]
    pub medium: String,
}

/// The renditions the gallery asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Grid thumbnails
    Medium,
    /// Preview overlay
    Large,
    /// Downloads
    Original,
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub page: u32,
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub total_results: u64,
    /// Link to the following page, absent on the last one
    #[serde(default)]
    pub next_page: Option<String>,
}
