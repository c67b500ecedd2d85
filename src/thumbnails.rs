//! In-memory image handles for grid cards and the preview overlay
//!
//! A browser loads `<img src>` on its own; here every rendition is fetched
//! explicitly and kept as an iced image handle until the next search.

use std::collections::{HashMap, HashSet};

use iced::widget::image::Handle;
use tracing::warn;

use crate::api::ApiError;
use crate::state::data::{PhotoId, Resolution};

type Key = (PhotoId, Resolution);

/// Loaded and in-flight renditions for the current search
#[derive(Debug, Default)]
pub struct ImageCache {
    generation: u64,
    handles: HashMap<Key, Handle>,
    pending: HashSet<Key>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: PhotoId, resolution: Resolution) -> Option<&Handle> {
        self.handles.get(&(id, resolution))
    }

    /// Record a request for a rendition.
    /// Returns `false` when it is already loaded or loading.
    pub fn request(&mut self, id: PhotoId, resolution: Resolution) -> bool {
        let key = (id, resolution);
        if self.handles.contains_key(&key) {
            return false;
        }
        self.pending.insert(key)
    }

    /// Store a fetched rendition; results from an older search are dropped
    pub fn finish(
        &mut self,
        generation: u64,
        id: PhotoId,
        resolution: Resolution,
        outcome: Result<Vec<u8>, ApiError>,
    ) {
        if generation != self.generation {
            return;
        }
        let key = (id, resolution);
        self.pending.remove(&key);
        match outcome {
            Ok(bytes) => {
                self.handles.insert(key, Handle::from_bytes(bytes));
            }
            Err(e) => warn!(id, ?resolution, "Failed to load image: {}", e),
        }
    }

    /// Forget everything; called when a new search starts
    pub fn reset(&mut self, generation: u64) {
        self.generation = generation;
        self.handles.clear();
        self.pending.clear();
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
