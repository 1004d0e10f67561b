// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`gallery`]: Gallery registry and the modal viewer state machine
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Presentation layer drives application services and renders their state
//! - Nothing here knows about widgets, files or the event loop
//!
//! # Example
//!
//! ```
//! use folio_gallery::application::gallery::{GalleryModalController, GalleryRegistry};
//! use folio_gallery::content::Portfolio;
//! use folio_gallery::domain::gallery::Position;
//!
//! let registry = GalleryRegistry::from_portfolio(&Portfolio::builtin()).unwrap();
//! let mut controller = GalleryModalController::new(registry);
//! let request = controller.open("orgconnect", Position::Thumbnail(3)).unwrap();
//! assert_eq!(request.index, 4);
//! ```

pub mod gallery;
