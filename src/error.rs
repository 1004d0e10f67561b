// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    Gallery(GalleryError),
}

/// Configuration and caller defects around galleries.
///
/// None of these are user-recoverable: they point at a broken portfolio file
/// or at a trigger wired to a gallery/position that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryError {
    /// No gallery is registered under this name.
    NotFound(String),

    /// The gallery exists but holds no items, so it cannot be opened.
    Empty(String),

    /// The requested position resolves past the end of the gallery.
    PositionOutOfRange {
        gallery: String,
        index: usize,
        len: usize,
    },

    /// Two galleries were declared with the same name.
    DuplicateName(String),
}

impl fmt::Display for GalleryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GalleryError::NotFound(name) => write!(f, "Unknown gallery: {}", name),
            GalleryError::Empty(name) => write!(f, "Gallery '{}' has no items", name),
            GalleryError::PositionOutOfRange {
                gallery,
                index,
                len,
            } => write!(
                f,
                "Index {} is out of range for gallery '{}' ({} items)",
                index, gallery, len
            ),
            GalleryError::DuplicateName(name) => {
                write!(f, "Gallery '{}' is declared more than once", name)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Gallery(e) => write!(f, "Gallery Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<GalleryError> for Error {
    fn from(err: GalleryError) -> Self {
        Error::Gallery(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
