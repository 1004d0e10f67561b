// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration constants.
//!
//! # Categories
//!
//! - **Fade**: Image fade-in duration
//! - **Layout**: Size of the modal content region

// ==========================================================================
// Fade Defaults
// ==========================================================================

/// Default fade-in duration for images, in milliseconds.
pub const DEFAULT_FADE_IN_MS: u64 = 300;

/// Minimum fade-in duration (0 disables the fade).
pub const MIN_FADE_IN_MS: u64 = 0;

/// Maximum fade-in duration, in milliseconds.
pub const MAX_FADE_IN_MS: u64 = 2000;

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Default width of the modal content, as a share of the window.
pub const DEFAULT_CONTENT_WIDTH_PERCENT: u16 = 60;

/// Default height of the modal content, as a share of the window.
pub const DEFAULT_CONTENT_HEIGHT_PERCENT: u16 = 70;

/// Smallest content size share.
pub const MIN_CONTENT_PERCENT: u16 = 20;

/// Largest content size share.
pub const MAX_CONTENT_PERCENT: u16 = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_default_within_bounds() {
        assert!((MIN_FADE_IN_MS..=MAX_FADE_IN_MS).contains(&DEFAULT_FADE_IN_MS));
    }

    #[test]
    fn content_defaults_within_bounds() {
        let bounds = MIN_CONTENT_PERCENT..=MAX_CONTENT_PERCENT;
        assert!(bounds.contains(&DEFAULT_CONTENT_WIDTH_PERCENT));
        assert!(bounds.contains(&DEFAULT_CONTENT_HEIGHT_PERCENT));
    }
}
