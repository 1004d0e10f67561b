// SPDX-License-Identifier: MPL-2.0
//! Gallery domain types.

pub mod position;
pub mod types;

pub use position::{Position, COVER_SENTINEL};
pub use types::Gallery;
