// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and shared fixtures.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

pub use approx::assert_abs_diff_eq;

use crate::application::gallery::{GalleryModalController, GalleryRegistry};

/// Controller over the built-in portfolio.
pub fn builtin_controller() -> GalleryModalController {
    GalleryModalController::new(GalleryRegistry::builtin())
}
