//! In-memory favorites
//!
//! Favorites live only as long as the window is open. Membership is keyed
//! by photo id and kept in the order photos were first favorited.

use super::data::{Photo, PhotoId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Favorites {
    photos: Vec<Photo>,
}

impl Favorites {
    /// Add the photo if absent, remove it if present.
    /// Returns `true` when the photo is a favorite afterwards.
    pub fn toggle(&mut self, photo: &Photo) -> bool {
        if let Some(index) = self.position(photo.id) {
            self.photos.remove(index);
            false
        } else {
            self.photos.push(photo.clone());
            true
        }
    }

    pub fn contains(&self, id: PhotoId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    fn position(&self, id: PhotoId) -> Option<usize> {
        self.photos.iter().position(|fav| fav.id == id)
    }
}
