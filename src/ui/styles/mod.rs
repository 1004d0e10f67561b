// SPDX-License-Identifier: MPL-2.0
//! Centralized styles for the portfolio page and the gallery modal.

pub mod button;
pub mod container;
pub mod overlay;
