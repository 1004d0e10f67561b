// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Keyboard events are only listened to while the gallery modal is open, so
//! Escape and the arrow keys do nothing on the bare page.

use super::Message;
use crate::application::gallery::SurfaceId;
use crate::ui::gallery_modal;
use crate::video_player;
use iced::{event, keyboard, time, Subscription};
use std::path::PathBuf;
use std::time::Duration;

/// Frame interval while an image fades in.
const ANIMATION_FRAME: Duration = Duration::from_millis(16);

/// Tick interval for toast auto-dismiss.
const NOTIFICATION_TICK: Duration = Duration::from_millis(100);

/// Creates the keyboard subscription routing modal keys.
pub fn create_keyboard_subscription(modal_open: bool) -> Subscription<Message> {
    if !modal_open {
        return Subscription::none();
    }
    event::listen_with(|event, _status, _window_id| match event {
        iced::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
            gallery_modal::gallery_key(&key).map(Message::KeyPressed)
        }
        _ => None,
    })
}

/// Creates a periodic tick subscription for the image fade-in and
/// notification auto-dismiss.
pub fn create_tick_subscription(animating: bool, has_notifications: bool) -> Subscription<Message> {
    if animating {
        time::every(ANIMATION_FRAME).map(Message::Tick)
    } else if has_notifications {
        time::every(NOTIFICATION_TICK).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

/// Creates the decoder subscription for the video surface on screen.
///
/// The subscription is keyed by surface id, so a new surface always starts
/// a new decoder and a dropped one stops it.
pub fn create_video_subscription(target: Option<(SurfaceId, PathBuf)>) -> Subscription<Message> {
    match target {
        Some((surface, path)) => video_player::video_playback(path, surface).map(Message::Playback),
        None => Subscription::none(),
    }
}
