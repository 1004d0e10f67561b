// SPDX-License-Identifier: MPL-2.0
//! Gallery value type.

use crate::domain::media::MediaItem;

/// A named, ordered sequence of media items for one project.
///
/// Position 0 is the cover; positions `1..len` are the thumbnails in display
/// order. Storage stays one flat sequence, the split is a display convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    name: String,
    items: Vec<MediaItem>,
}

impl Gallery {
    #[must_use]
    pub fn new(name: impl Into<String>, items: Vec<MediaItem>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    /// Builds a gallery from plain path strings.
    #[must_use]
    pub fn from_paths<I, S>(name: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, paths.into_iter().map(MediaItem::new).collect())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    /// The representative first item.
    #[must_use]
    pub fn cover(&self) -> Option<&MediaItem> {
        self.items.first()
    }

    /// Items shown as thumbnails under the cover.
    #[must_use]
    pub fn thumbnails(&self) -> &[MediaItem] {
        self.items.get(1..).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_and_thumbnails_split_the_sequence() {
        let gallery = Gallery::from_paths("demo", ["cover.png", "a.png", "b.mp4"]);

        assert_eq!(gallery.cover().map(MediaItem::path), Some("cover.png"));
        let thumbs: Vec<_> = gallery.thumbnails().iter().map(MediaItem::path).collect();
        assert_eq!(thumbs, vec!["a.png", "b.mp4"]);
    }

    #[test]
    fn empty_gallery_has_no_cover_or_thumbnails() {
        let gallery = Gallery::new("empty", Vec::new());
        assert!(gallery.is_empty());
        assert!(gallery.cover().is_none());
        assert!(gallery.thumbnails().is_empty());
    }

    #[test]
    fn single_item_gallery_has_no_thumbnails() {
        let gallery = Gallery::from_paths("solo", ["only.png"]);
        assert_eq!(gallery.len(), 1);
        assert!(gallery.thumbnails().is_empty());
    }
}
