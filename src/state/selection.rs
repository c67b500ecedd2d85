//! The photo shown in the preview overlay

use super::data::Photo;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    #[default]
    Closed,
    Open(Photo),
}

impl Selection {
    pub fn photo(&self) -> Option<&Photo> {
        match self {
            Selection::Closed => None,
            Selection::Open(photo) => Some(photo),
        }
    }
}
