// SPDX-License-Identifier: MPL-2.0
//! Display positions and their resolution to gallery indices.
//!
//! Clickable elements on the page address media by *display position*: the
//! cover photo uses a sentinel, thumbnails are numbered from zero. The gallery
//! itself stores the cover at index 0, so thumbnail `p` lives at index `p + 1`.

use std::fmt;

/// Raw attribute value that designates the cover item.
pub const COVER_SENTINEL: i64 = -1;

/// Where a click asked the gallery to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// The gallery's cover item.
    Cover,
    /// Zero-based thumbnail number, in display order.
    Thumbnail(usize),
}

impl Position {
    /// Parses a raw position attribute.
    ///
    /// [`COVER_SENTINEL`] maps to [`Position::Cover`], non-negative values to
    /// thumbnails, anything else is rejected.
    #[must_use]
    pub fn from_raw(raw: i64) -> Option<Self> {
        if raw == COVER_SENTINEL {
            Some(Position::Cover)
        } else {
            usize::try_from(raw).ok().map(Position::Thumbnail)
        }
    }

    /// Parses a `GALLERY:POSITION` target where the position is a raw
    /// attribute value, e.g. `devotion:-1` or `orgconnect:4`.
    #[must_use]
    pub fn parse_target(raw: &str) -> Option<(&str, Self)> {
        let (gallery, position) = raw.rsplit_once(':')?;
        let gallery = gallery.trim();
        if gallery.is_empty() {
            return None;
        }
        let position = position.trim().parse::<i64>().ok()?;
        Some((gallery, Self::from_raw(position)?))
    }

    /// Resolves the position to a 0-based index into the gallery's items.
    ///
    /// Saturates instead of overflowing, so `Thumbnail(usize::MAX)` resolves
    /// past the end of every gallery.
    ///
    /// # Example
    ///
    /// ```
    /// use folio_gallery::domain::gallery::Position;
    ///
    /// assert_eq!(Position::Cover.resolve(), 0);
    /// assert_eq!(Position::Thumbnail(3).resolve(), 4);
    /// ```
    #[must_use]
    pub fn resolve(self) -> usize {
        match self {
            Position::Cover => 0,
            Position::Thumbnail(p) => p.saturating_add(1),
        }
    }

    /// Inverse of [`resolve`](Self::resolve).
    #[cfg(test)]
    #[must_use]
    pub(crate) fn from_index(index: usize) -> Self {
        match index {
            0 => Position::Cover,
            n => Position::Thumbnail(n - 1),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Cover => f.write_str("cover"),
            Position::Thumbnail(p) => write!(f, "thumbnail {}", p),
        }
    }
}
