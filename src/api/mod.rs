//! Pexels HTTP access
//!
//! - `client.rs` - search requests and raw image fetches
//! - `error.rs` - failure kinds surfaced to the rest of the app

pub mod client;
pub mod error;

pub use client::PexelsClient;
pub use error::ApiError;
