// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Handlers translate component events into controller calls and into the
//! asynchronous tasks that fetch media for freshly created surfaces.

use super::{LoadedImage, Message, VideoSession};
use crate::application::gallery::{GalleryKey, GalleryModalController, LoadRequest, SurfaceId};
use crate::domain::media::MediaType;
use crate::error::Error;
use crate::ui::gallery_modal::{self, Event as ModalEvent};
use crate::ui::notifications;
use crate::ui::portfolio::{self, Event as PortfolioEvent};
use crate::video_player::{DecoderCommand, PlaybackEvent, PlaybackMessage};
use iced::widget::image::Handle;
use iced::Task;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Mutable application state touched by the handlers.
pub struct UpdateContext<'a> {
    pub gallery: &'a mut GalleryModalController,
    pub image: &'a mut Option<LoadedImage>,
    pub video: &'a mut Option<VideoSession>,
    pub notifications: &'a mut notifications::Manager,
    pub media_root: &'a Path,
    pub now: &'a mut Instant,
}

pub fn handle_portfolio_message(
    ctx: &mut UpdateContext<'_>,
    message: portfolio::Message,
) -> Task<Message> {
    match portfolio::update(message) {
        PortfolioEvent::OpenGallery { gallery, position } => {
            match ctx.gallery.open(&gallery, position) {
                Ok(request) => load_surface(ctx, request),
                Err(err) => {
                    tracing::error!(%err, "cannot open gallery");
                    Task::none()
                }
            }
        }
    }
}

pub fn handle_modal_message(
    ctx: &mut UpdateContext<'_>,
    message: gallery_modal::Message,
) -> Task<Message> {
    let event = gallery_modal::update(ctx.gallery, message);
    handle_modal_event(ctx, event)
}

pub fn handle_key(ctx: &mut UpdateContext<'_>, key: GalleryKey) -> Task<Message> {
    let event: ModalEvent = ctx.gallery.handle_key(key).into();
    handle_modal_event(ctx, event)
}

fn handle_modal_event(ctx: &mut UpdateContext<'_>, event: ModalEvent) -> Task<Message> {
    match event {
        ModalEvent::None => Task::none(),
        ModalEvent::Load(request) => load_surface(ctx, request),
        ModalEvent::Playback { surface, playing } => {
            let command = if playing {
                DecoderCommand::Play
            } else {
                DecoderCommand::Pause
            };
            if let Some(session) = ctx.video.as_ref().filter(|s| s.surface == surface) {
                session.send(command);
            }
            Task::none()
        }
        ModalEvent::Closed => {
            *ctx.image = None;
            *ctx.video = None;
            Task::none()
        }
    }
}

/// Drops whatever the previous surface held, then fetches the new one.
fn load_surface(ctx: &mut UpdateContext<'_>, request: LoadRequest) -> Task<Message> {
    *ctx.image = None;
    *ctx.video = None;
    load_task(ctx.media_root, request)
}

pub fn handle_image_loaded(
    ctx: &mut UpdateContext<'_>,
    surface: SurfaceId,
    result: Result<Vec<u8>, Error>,
) -> Task<Message> {
    match result {
        Ok(bytes) => {
            let at = Instant::now();
            if ctx.gallery.resource_loaded(surface, at) {
                *ctx.image = Some(LoadedImage {
                    surface,
                    handle: Handle::from_bytes(bytes),
                });
                *ctx.now = at;
            }
        }
        Err(err) => {
            tracing::debug!(%err, surface = surface.value(), "image read failed");
            ctx.gallery.resource_failed(surface);
        }
    }
    Task::none()
}

/// Applies a decoder event to the video surface it was started for.
/// Events from superseded surfaces are dropped.
pub fn handle_playback(ctx: &mut UpdateContext<'_>, message: PlaybackMessage) -> Task<Message> {
    let PlaybackMessage { surface, event } = message;
    let current = ctx.gallery.surface().map(|s| s.id()) == Some(surface);
    if !current {
        tracing::trace!(surface = surface.value(), "stale playback event");
        return Task::none();
    }

    match event {
        PlaybackEvent::Started(commands) => {
            let session = VideoSession::new(surface, commands);
            let playing = ctx
                .gallery
                .surface()
                .and_then(|s| s.as_video())
                .is_some_and(|video| video.is_playing());
            if playing {
                session.send(DecoderCommand::Play);
            }
            *ctx.video = Some(session);
        }
        PlaybackEvent::Opened(info) => {
            tracing::debug!(
                surface = surface.value(),
                width = info.width,
                height = info.height,
                duration = ?info.duration_secs,
                "video opened"
            );
            let at = Instant::now();
            if ctx.gallery.resource_loaded(surface, at) {
                *ctx.now = at;
            }
        }
        PlaybackEvent::FrameReady(frame) => {
            if let Some(session) = ctx.video.as_mut().filter(|s| s.surface == surface) {
                session.frame = Some(Handle::from_rgba(
                    frame.width,
                    frame.height,
                    Arc::unwrap_or_clone(frame.rgba_data),
                ));
            }
        }
        PlaybackEvent::EndOfStream => {
            ctx.gallery.video_playback_ended(surface);
        }
        PlaybackEvent::Error(err) => {
            tracing::warn!(%err, surface = surface.value(), "video playback failed");
            ctx.gallery.resource_failed(surface);
        }
    }
    Task::none()
}

pub fn handle_tick(ctx: &mut UpdateContext<'_>, now: Instant) -> Task<Message> {
    *ctx.now = now;
    ctx.notifications.tick(now);
    Task::none()
}

/// Reads an image's bytes off the UI thread. Videos are opened by their
/// playback subscription instead.
fn load_task(media_root: &Path, request: LoadRequest) -> Task<Message> {
    let path = media_root.join(&request.path);
    let surface = request.surface;
    tracing::debug!(
        surface = surface.value(),
        index = request.index,
        path = %path.display(),
        "loading gallery media"
    );

    match request.kind {
        MediaType::Image => Task::perform(
            async move { tokio::fs::read(&path).await.map_err(Error::from) },
            move |result| Message::ImageLoaded { surface, result },
        ),
        MediaType::Video => Task::none(),
    }
}
