//! State management module
//!
//! This module holds everything the gallery remembers while the window is open:
//! - API data structures (data.rs)
//! - Query, page counter and request tickets (search.rs)
//! - The previewed photo (selection.rs)
//! - Favorites (favorites.rs)
//! - The update function tying them together (gallery.rs)

pub mod data;
pub mod favorites;
pub mod gallery;
pub mod search;
pub mod selection;
