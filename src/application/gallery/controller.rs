// SPDX-License-Identifier: MPL-2.0
//! Gallery modal state machine.
//!
//! The controller has two states, closed and open on `(gallery, index)`.
//! Every transition is a plain state change followed by one render step
//! that swaps in a fresh [`MediaSurface`]; the presentation layer then
//! fulfils the returned [`LoadRequest`] and reports back with the surface id.

use super::registry::GalleryRegistry;
use super::surface::{LoadRequest, MediaSurface, SurfaceId};
use crate::domain::gallery::{Gallery, Position};
use crate::domain::media::MediaItem;
use crate::error::GalleryError;
use std::time::{Duration, Instant};

/// Default fade-in duration of image surfaces.
pub const DEFAULT_FADE_IN: Duration = Duration::from_millis(300);

/// Viewing state, reset on every open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryViewState {
    active_gallery: Option<String>,
    current_index: usize,
}

impl GalleryViewState {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.active_gallery.is_some()
    }

    #[must_use]
    pub fn active_gallery(&self) -> Option<&str> {
        self.active_gallery.as_deref()
    }

    /// Current index, only meaningful while open.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.active_gallery.as_ref().map(|_| self.current_index)
    }
}

/// Keys the modal reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryKey {
    Escape,
    ArrowLeft,
    ArrowRight,
}

/// Where a click inside the modal host landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed area around the content.
    Backdrop,
    /// The content region, including the media surface.
    Content,
    CloseButton,
    PreviousButton,
    NextButton,
}

/// Result of routing a key or click through the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A new surface was rendered and needs loading.
    Render(LoadRequest),
    Closed,
    Unchanged,
}

/// Flags the presentation layer derives its visuals from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModalPresentation {
    /// Whether the modal is shown.
    pub active: bool,
    /// Whether the page underneath must stop scrolling.
    pub scroll_locked: bool,
    /// Whether previous/next affordances are shown.
    pub navigation_visible: bool,
}

/// Owner of the gallery modal's viewing state.
#[derive(Debug, Clone)]
pub struct GalleryModalController {
    registry: GalleryRegistry,
    state: GalleryViewState,
    surface: Option<MediaSurface>,
    next_surface_id: u64,
    fade_in: Duration,
}

impl GalleryModalController {
    #[must_use]
    pub fn new(registry: GalleryRegistry) -> Self {
        Self {
            registry,
            state: GalleryViewState::default(),
            surface: None,
            next_surface_id: 0,
            fade_in: DEFAULT_FADE_IN,
        }
    }

    #[must_use]
    pub fn with_fade_in(mut self, fade_in: Duration) -> Self {
        self.fade_in = fade_in;
        self
    }

    #[must_use]
    pub fn fade_in(&self) -> Duration {
        self.fade_in
    }

    #[must_use]
    pub fn registry(&self) -> &GalleryRegistry {
        &self.registry
    }

    #[must_use]
    pub fn state(&self) -> &GalleryViewState {
        &self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index()
    }

    /// The gallery being viewed, if open.
    #[must_use]
    pub fn active_gallery(&self) -> Option<&Gallery> {
        self.state
            .active_gallery()
            .and_then(|name| self.registry.lookup(name).ok())
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&MediaItem> {
        let index = self.current_index()?;
        self.active_gallery()?.get(index)
    }

    /// The surface in the content region. `None` exactly when closed.
    #[must_use]
    pub fn surface(&self) -> Option<&MediaSurface> {
        self.surface.as_ref()
    }

    /// Whether previous/next are offered: only for galleries with more than
    /// one item.
    #[must_use]
    pub fn navigation_visible(&self) -> bool {
        self.active_gallery().is_some_and(|gallery| gallery.len() > 1)
    }

    #[must_use]
    pub fn presentation(&self) -> ModalPresentation {
        let open = self.is_open();
        ModalPresentation {
            active: open,
            scroll_locked: open,
            navigation_visible: self.navigation_visible(),
        }
    }

    /// Item index shown for a display position: the cover is item 0 and
    /// thumbnail `p` is item `p + 1`.
    #[must_use]
    pub fn resolve_index(position: Position) -> usize {
        position.resolve()
    }

    /// Opens `gallery` at a display position, replacing whatever was shown.
    ///
    /// # Errors
    ///
    /// Fails without touching the current state if the gallery is unknown,
    /// has no items, or the position lies past its end.
    pub fn open(
        &mut self,
        gallery: &str,
        position: Position,
    ) -> Result<LoadRequest, GalleryError> {
        let target = self.registry.lookup(gallery)?;
        if target.is_empty() {
            return Err(GalleryError::Empty(gallery.to_string()));
        }
        let index = Self::resolve_index(position);
        if index >= target.len() {
            return Err(GalleryError::PositionOutOfRange {
                gallery: gallery.to_string(),
                index,
                len: target.len(),
            });
        }

        tracing::debug!(gallery, %position, index, "opening gallery");
        self.state = GalleryViewState {
            active_gallery: Some(gallery.to_string()),
            current_index: index,
        };
        self.render()
            .ok_or_else(|| GalleryError::NotFound(gallery.to_string()))
    }

    /// Closes the modal. Returns `false` if it was already closed.
    pub fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        tracing::debug!(gallery = ?self.state.active_gallery(), "closing gallery");
        self.state = GalleryViewState::default();
        self.surface = None;
        true
    }

    /// Advances to the next item, wrapping past the last one.
    pub fn next(&mut self) -> Option<LoadRequest> {
        let len = self.active_gallery()?.len();
        let index = (self.state.current_index + 1) % len;
        self.navigate_to(index)
    }

    /// Steps back to the previous item, wrapping before the first one.
    pub fn prev(&mut self) -> Option<LoadRequest> {
        let len = self.active_gallery()?.len();
        let index = (self.state.current_index + len - 1) % len;
        self.navigate_to(index)
    }

    /// Routes a key press. Keys do nothing while the modal is closed.
    pub fn handle_key(&mut self, key: GalleryKey) -> Transition {
        if !self.is_open() {
            return Transition::Unchanged;
        }
        match key {
            GalleryKey::Escape => self.close_transition(),
            GalleryKey::ArrowLeft => Self::render_transition(self.prev()),
            GalleryKey::ArrowRight => Self::render_transition(self.next()),
        }
    }

    /// Routes a click on the modal host.
    ///
    /// Clicks on the content region never close the modal, so its controls
    /// stay usable.
    pub fn handle_click(&mut self, target: ClickTarget) -> Transition {
        if !self.is_open() {
            return Transition::Unchanged;
        }
        match target {
            ClickTarget::Backdrop | ClickTarget::CloseButton => self.close_transition(),
            ClickTarget::Content => Transition::Unchanged,
            ClickTarget::PreviousButton => Self::render_transition(self.prev()),
            ClickTarget::NextButton => Self::render_transition(self.next()),
        }
    }

    /// Records that the resource of `surface` finished loading at `at`.
    ///
    /// Returns `false` for stale surfaces, which are left alone.
    pub fn resource_loaded(&mut self, surface: SurfaceId, at: Instant) -> bool {
        match self.surface_mut(surface) {
            Some(current) => {
                current.mark_loaded(at);
                true
            }
            None => {
                tracing::trace!(surface = surface.value(), "ignoring stale load completion");
                false
            }
        }
    }

    /// Records that the resource of `surface` failed to load.
    pub fn resource_failed(&mut self, surface: SurfaceId) -> bool {
        match self.surface_mut(surface) {
            Some(current) => {
                tracing::warn!(path = current.path(), "media failed to load");
                current.mark_failed();
                true
            }
            None => false,
        }
    }

    /// Handles a volume change from the video controls. Audio stays off.
    pub fn video_volume_requested(&mut self, surface: SurfaceId, volume: f32) -> bool {
        self.with_video(surface, |video| {
            video.request_volume(volume);
        })
    }

    /// Handles a mute toggle from the video controls. Audio stays off.
    pub fn video_mute_toggled(&mut self, surface: SurfaceId) -> bool {
        self.with_video(surface, |video| {
            video.request_toggle_mute();
        })
    }

    /// Flips play/pause on the current video and returns whether it now
    /// plays. `None` for stale or non-video surfaces.
    pub fn video_playback_toggled(&mut self, surface: SurfaceId) -> Option<bool> {
        let video = self.surface_mut(surface)?.as_video_mut()?;
        video.toggle_playback();
        Some(video.is_playing())
    }

    /// The decoder reached the end of the current video.
    pub fn video_playback_ended(&mut self, surface: SurfaceId) -> bool {
        self.with_video(surface, super::surface::VideoSurface::playback_ended)
    }

    /// Opacity of the current surface at `now`.
    #[must_use]
    pub fn surface_opacity(&self, now: Instant) -> f32 {
        self.surface
            .as_ref()
            .map_or(0.0, |surface| surface.opacity(now, self.fade_in))
    }

    /// Whether an image fade-in is in progress and needs animation frames.
    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.surface
            .as_ref()
            .and_then(MediaSurface::as_image)
            .is_some_and(|image| image.is_fading(now, self.fade_in))
    }

    fn navigate_to(&mut self, index: usize) -> Option<LoadRequest> {
        if index == self.state.current_index && self.surface.is_some() {
            return None;
        }
        self.state.current_index = index;
        self.render()
    }

    /// Replaces the surface with one for the current item.
    fn render(&mut self) -> Option<LoadRequest> {
        let index = self.state.current_index;
        let item = self.active_gallery()?.get(index)?;
        let (path, kind) = (item.path().to_string(), item.kind());

        self.next_surface_id += 1;
        let surface = MediaSurface::new(SurfaceId::new(self.next_surface_id), index, &path, kind);
        let request = surface.request();
        self.surface = Some(surface);
        Some(request)
    }

    fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut MediaSurface> {
        self.surface.as_mut().filter(|surface| surface.id() == id)
    }

    fn with_video(
        &mut self,
        id: SurfaceId,
        f: impl FnOnce(&mut super::surface::VideoSurface),
    ) -> bool {
        match self.surface_mut(id).and_then(MediaSurface::as_video_mut) {
            Some(video) => {
                f(video);
                true
            }
            None => false,
        }
    }

    fn close_transition(&mut self) -> Transition {
        if self.close() {
            Transition::Closed
        } else {
            Transition::Unchanged
        }
    }

    fn render_transition(request: Option<LoadRequest>) -> Transition {
        request.map_or(Transition::Unchanged, Transition::Render)
    }
}
