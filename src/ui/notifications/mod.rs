// SPDX-License-Identifier: MPL-2.0
//! Toast notifications for startup problems.
//!
//! A broken `settings.toml` or portfolio file does not stop the app: it
//! falls back to defaults and says so with a toast in the bottom-right corner.
//!
//! # Components
//!
//! - [`notification`] - `Notification` with severity levels and i18n keys
//! - [`manager`] - `Manager` for queuing and lifecycle management
//! - [`toast`] - Toast widget rendering the visible notifications
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::notifications::{Manager, Notification, Toast};
//!
//! let mut manager = Manager::new();
//! manager.push(Notification::warning("notification-config-load-error"));
//!
//! // In your view function, render toasts
//! let toast_overlay = Toast::view_overlay(&manager, &i18n).map(Message::Notification);
//! ```
//!
//! # Design Considerations
//!
//! - Toast duration: 5s for warnings, manual dismiss for errors
//! - Max visible toasts: 3 (others are queued)

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
