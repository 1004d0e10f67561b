// SPDX-License-Identifier: MPL-2.0
//! Name-indexed lookup of the galleries declared by the portfolio.

use crate::content::Portfolio;
use crate::domain::gallery::Gallery;
use crate::error::{GalleryError, Result};
use std::collections::HashMap;

/// Static mapping from gallery name to gallery.
///
/// Built once at startup and never mutated while the app runs. Declaration
/// order is remembered so listings stay stable.
#[derive(Debug, Clone, Default)]
pub struct GalleryRegistry {
    galleries: HashMap<String, Gallery>,
    order: Vec<String>,
}

impl GalleryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry from portfolio content.
    ///
    /// # Errors
    ///
    /// Fails on a duplicate gallery name or a gallery without items; both
    /// are defects in the portfolio file.
    pub fn from_portfolio(portfolio: &Portfolio) -> Result<Self> {
        let mut registry = Self::new();
        for entry in &portfolio.galleries {
            if entry.items.is_empty() {
                return Err(GalleryError::Empty(entry.name.clone()).into());
            }
            registry.insert(entry.to_gallery())?;
        }
        Ok(registry)
    }

    /// Registry over the built-in portfolio.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_portfolio(&Portfolio::builtin()).unwrap_or_default()
    }

    /// Registers a gallery.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::DuplicateName`] if the name is taken.
    pub fn insert(&mut self, gallery: Gallery) -> std::result::Result<(), GalleryError> {
        let name = gallery.name().to_string();
        if self.galleries.contains_key(&name) {
            return Err(GalleryError::DuplicateName(name));
        }
        self.order.push(name.clone());
        self.galleries.insert(name, gallery);
        Ok(())
    }

    /// Returns the named gallery.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::NotFound`] if nothing is registered under
    /// `name`.
    pub fn lookup(&self, name: &str) -> std::result::Result<&Gallery, GalleryError> {
        self.galleries
            .get(name)
            .ok_or_else(|| GalleryError::NotFound(name.to_string()))
    }

    /// Gallery names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
