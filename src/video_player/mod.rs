// SPDX-License-Identifier: MPL-2.0
//! Muted video playback for gallery video surfaces.
//!
//! An FFmpeg decoder runs on a blocking thread and streams RGBA frames to the
//! UI through an Iced subscription. Only the video stream is decoded, so
//! playback is silent regardless of what the file carries.

pub mod decoder;
pub mod subscription;

pub use decoder::{AsyncDecoder, DecodedFrame, DecoderCommand, DecoderEvent, StreamInfo};
pub use subscription::{video_playback, DecoderCommandSender, PlaybackEvent, PlaybackMessage};

use crate::error::{Error, Result};
use std::sync::OnceLock;

static FFMPEG_INIT: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// Initializes FFmpeg once per process and silences its warnings.
pub fn init_ffmpeg() -> Result<()> {
    FFMPEG_INIT
        .get_or_init(|| {
            ffmpeg_next::init().map_err(|e| format!("FFmpeg initialization failed: {e}"))?;
            // SAFETY: av_log_set_level only stores the global log threshold.
            unsafe {
                ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
            }
            Ok(())
        })
        .clone()
        .map_err(Error::Io)
}
