// SPDX-License-Identifier: MPL-2.0
//! Gallery modal use cases: the gallery registry, the modal controller and
//! the media surfaces it renders.

pub mod controller;
pub mod registry;
pub mod surface;

pub use controller::{
    ClickTarget, GalleryKey, GalleryModalController, GalleryViewState, ModalPresentation,
    Transition, DEFAULT_FADE_IN,
};
pub use registry::GalleryRegistry;
pub use surface::{LoadRequest, LoadState, MediaSurface, SurfaceId, SurfaceKind};
