// SPDX-License-Identifier: MPL-2.0
//! User interface components following the Elm-style "state down, messages
//! up" pattern.
//!
//! # Screens
//!
//! - [`portfolio`] - Project cards with cover and thumbnail tiles
//! - [`gallery_modal`] - Layered modal showing one gallery item at a time
//!
//! # Shared Infrastructure
//!
//! - [`styles`] - Centralized styling (buttons, containers, overlays)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management
//! - [`notifications`] - Toast notification system for startup warnings

pub mod design_tokens;
pub mod gallery_modal;
pub mod notifications;
pub mod portfolio;
pub mod styles;
pub mod theming;
