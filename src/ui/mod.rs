//! View functions
//!
//! Everything here is a pure function of gallery state to an iced element.

pub mod grid;
pub mod modal;
pub mod navbar;
pub mod sentinel;
