// SPDX-License-Identifier: MPL-2.0
//! Portfolio page content: the projects shown on the page and the media
//! galleries behind them.
//!
//! Content is static for the process lifetime. It comes either from the
//! built-in portfolio or from a TOML file passed on the command line:
//!
//! ```toml
//! [[project]]
//! title = "OrgConnect"
//! description = "Organization management platform"
//! gallery = "orgconnect"
//!
//! [[gallery]]
//! name = "orgconnect"
//! items = ["OrgConnect/Org Logo.png", "OrgConnect/admin_login.png"]
//! ```

mod builtin;

use crate::domain::gallery::Gallery;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One project card on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Name of the gallery opened by the card's cover and thumbnails.
    pub gallery: String,
}

/// Gallery declaration as written in the portfolio file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryEntry {
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl GalleryEntry {
    #[must_use]
    pub fn to_gallery(&self) -> Gallery {
        Gallery::from_paths(self.name.clone(), self.items.iter().cloned())
    }
}

/// The whole page content.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(default, rename = "project")]
    pub projects: Vec<Project>,
    #[serde(default, rename = "gallery")]
    pub galleries: Vec<GalleryEntry>,
}

impl Portfolio {
    /// The portfolio compiled into the binary.
    #[must_use]
    pub fn builtin() -> Self {
        builtin::portfolio()
    }

    /// Parses portfolio content from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the text is not a valid portfolio.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads portfolio content from a file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a config error if
    /// it cannot be parsed.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Checks that every project points at a declared gallery.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first project whose gallery is
    /// missing.
    pub fn validate(&self) -> Result<()> {
        for project in &self.projects {
            if !self.galleries.iter().any(|g| g.name == project.gallery) {
                return Err(Error::Config(format!(
                    "project '{}' references unknown gallery '{}'",
                    project.title, project.gallery
                )));
            }
        }
        Ok(())
    }
}
