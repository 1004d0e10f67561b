// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core business logic with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`gallery`]: Galleries and the cover/thumbnail position convention
//!   ([`Gallery`](gallery::Gallery), [`Position`](gallery::Position))
//! - [`media`]: Media types ([`MediaType`](media::MediaType), [`MediaItem`](media::MediaItem))

pub mod gallery;
pub mod media;
