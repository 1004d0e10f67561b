// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::application::gallery::{GalleryKey, SurfaceId};
use crate::error::Error;
use crate::ui::gallery_modal;
use crate::ui::notifications;
use crate::ui::portfolio;
use crate::video_player::PlaybackMessage;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Portfolio(portfolio::Message),
    Modal(gallery_modal::Message),
    Notification(notifications::NotificationMessage),
    /// A key the gallery modal reacts to was pressed.
    KeyPressed(GalleryKey),
    /// Bytes of an image surface's file, or why they could not be read.
    ImageLoaded {
        surface: SurfaceId,
        result: Result<Vec<u8>, Error>,
    },
    /// Event from the decoder of a video surface.
    Playback(PlaybackMessage),
    /// Periodic tick driving the fade-in and toast auto-dismiss.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `FOLIO_GALLERY_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Optional directory media paths are resolved against.
    pub media_root: Option<String>,
    /// Optional portfolio TOML file replacing the built-in content.
    pub portfolio_path: Option<String>,
    /// Gallery to open at startup, as `GALLERY:POSITION`.
    pub open: Option<String>,
}
