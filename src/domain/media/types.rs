// SPDX-License-Identifier: MPL-2.0
//! Core media types for the domain layer.
//!
//! These types represent pure data without any presentation dependencies.

use std::fmt;

/// Marker that classifies a path as a video, matched case-insensitively.
const VIDEO_MARKER: &str = ".mp4";

/// Represents different types of media formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// Static image (JPEG, PNG, ...).
    Image,
    /// MP4 video.
    Video,
}

impl MediaType {
    /// Classifies a resource locator.
    ///
    /// Any path containing `.mp4` (case-insensitive) is a video; everything
    /// else is treated as an image.
    ///
    /// # Example
    ///
    /// ```
    /// use folio_gallery::domain::media::MediaType;
    ///
    /// assert_eq!(MediaType::classify("clips/Demo.MP4"), MediaType::Video);
    /// assert_eq!(MediaType::classify("shots/logo.png"), MediaType::Image);
    /// ```
    #[must_use]
    pub fn classify(path: &str) -> Self {
        if path.to_lowercase().contains(VIDEO_MARKER) {
            MediaType::Video
        } else {
            MediaType::Image
        }
    }

    #[must_use]
    pub fn is_video(self) -> bool {
        matches!(self, MediaType::Video)
    }
}

/// A reference to one piece of media inside a gallery.
///
/// Only the locator is stored; the media type is derived from it on demand,
/// so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaItem {
    path: String,
}

impl MediaItem {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the relative resource locator.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the media type derived from the locator.
    #[must_use]
    pub fn kind(&self) -> MediaType {
        MediaType::classify(&self.path)
    }

    /// Returns the last path segment, used for captions and placeholders.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path.rsplit(['/', '\\']).next().unwrap_or(&self.path)
    }
}

impl From<&str> for MediaItem {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl fmt::Display for MediaItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
