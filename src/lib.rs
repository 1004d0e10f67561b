// SPDX-License-Identifier: MPL-2.0
//! `folio_gallery` is a portfolio page with a media gallery modal, built with
//! the Iced GUI framework.
//!
//! Projects open their gallery in a layered modal with keyboard and click
//! navigation, muted video playback and localized labels through Fluent.

pub mod app;
pub mod application;
pub mod content;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod ui;
pub mod video_player;

pub use app::config;

#[cfg(test)]
mod test_utils;
