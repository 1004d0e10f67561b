// SPDX-License-Identifier: MPL-2.0
//! Media surfaces: the single on-screen element showing the active item.
//!
//! A surface is created for every render and carries a [`SurfaceId`]. Load
//! completions are delivered with the id they were issued for, so a callback
//! that arrives after the user moved on finds a different id and is dropped
//! instead of touching the newer surface.

use crate::domain::media::MediaType;
use std::time::{Duration, Instant};

/// Identity of one rendered surface. Never reused within a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u64);

impl SurfaceId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Resource loading progress of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded(Instant),
    Failed,
}

/// Work the presentation layer must do after a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub surface: SurfaceId,
    pub index: usize,
    pub path: String,
    pub kind: MediaType,
}

/// Image surface. Invisible until its resource has loaded, then fades in.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSurface {
    load: LoadState,
}

impl ImageSurface {
    fn new() -> Self {
        Self {
            load: LoadState::Pending,
        }
    }

    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.load
    }

    /// Opacity at `now` for a fade lasting `fade`.
    ///
    /// Zero until loaded, then an ease-out ramp to one.
    #[must_use]
    pub fn opacity(&self, now: Instant, fade: Duration) -> f32 {
        match self.load {
            LoadState::Pending | LoadState::Failed => 0.0,
            LoadState::Loaded(at) => {
                if fade.is_zero() {
                    return 1.0;
                }
                let elapsed = now.saturating_duration_since(at).as_secs_f32();
                let t = (elapsed / fade.as_secs_f32()).clamp(0.0, 1.0);
                1.0 - (1.0 - t).powi(3)
            }
        }
    }

    /// Whether the fade-in is still running at `now`.
    #[must_use]
    pub fn is_fading(&self, now: Instant, fade: Duration) -> bool {
        match self.load {
            LoadState::Loaded(at) => now.saturating_duration_since(at) < fade,
            LoadState::Pending | LoadState::Failed => false,
        }
    }
}

/// Video surface with playback controls and audio forced off.
///
/// Volume and mute requests are accepted only to be reverted: the surface
/// always ends a call muted at zero volume.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSurface {
    controls: bool,
    muted: bool,
    volume: f32,
    playing: bool,
    load: LoadState,
}

impl VideoSurface {
    fn new() -> Self {
        Self {
            controls: true,
            muted: true,
            volume: 0.0,
            playing: false,
            load: LoadState::Pending,
        }
    }

    #[must_use]
    pub fn controls(&self) -> bool {
        self.controls
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.volume
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.load
    }

    /// Applies a volume change coming from the controls, then reverts it.
    ///
    /// Returns `true` if the request would have made the video audible.
    pub fn request_volume(&mut self, volume: f32) -> bool {
        self.volume = volume;
        let audible = self.volume > 0.0;
        self.silence();
        audible
    }

    /// Applies a mute toggle coming from the controls, then reverts it.
    ///
    /// Returns `true` if the request would have unmuted the video.
    pub fn request_toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        let unmuted = !self.muted;
        self.silence();
        unmuted
    }

    pub fn toggle_playback(&mut self) {
        self.playing = !self.playing;
    }

    /// The decoder ran out of frames; the next play restarts from the top.
    pub fn playback_ended(&mut self) {
        self.playing = false;
    }

    fn on_metadata_loaded(&mut self, at: Instant) {
        self.load = LoadState::Loaded(at);
        self.silence();
    }

    fn silence(&mut self) {
        self.muted = true;
        self.volume = 0.0;
    }
}

/// Kind-specific part of a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceKind {
    Image(ImageSurface),
    Video(VideoSurface),
}

/// The one surface currently placed in the modal's content region.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSurface {
    id: SurfaceId,
    index: usize,
    path: String,
    kind: SurfaceKind,
}

impl MediaSurface {
    pub(crate) fn new(id: SurfaceId, index: usize, path: &str, media_type: MediaType) -> Self {
        let kind = match media_type {
            MediaType::Image => SurfaceKind::Image(ImageSurface::new()),
            MediaType::Video => SurfaceKind::Video(VideoSurface::new()),
        };
        Self {
            id,
            index,
            path: path.to_string(),
            kind,
        }
    }

    #[must_use]
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// Gallery index this surface was rendered for.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn kind(&self) -> &SurfaceKind {
        &self.kind
    }

    #[must_use]
    pub fn media_type(&self) -> MediaType {
        match self.kind {
            SurfaceKind::Image(_) => MediaType::Image,
            SurfaceKind::Video(_) => MediaType::Video,
        }
    }

    #[must_use]
    pub fn load_state(&self) -> LoadState {
        match &self.kind {
            SurfaceKind::Image(image) => image.load_state(),
            SurfaceKind::Video(video) => video.load_state(),
        }
    }

    #[must_use]
    pub fn as_video(&self) -> Option<&VideoSurface> {
        match &self.kind {
            SurfaceKind::Video(video) => Some(video),
            SurfaceKind::Image(_) => None,
        }
    }

    pub fn as_video_mut(&mut self) -> Option<&mut VideoSurface> {
        match &mut self.kind {
            SurfaceKind::Video(video) => Some(video),
            SurfaceKind::Image(_) => None,
        }
    }

    #[must_use]
    pub fn as_image(&self) -> Option<&ImageSurface> {
        match &self.kind {
            SurfaceKind::Image(image) => Some(image),
            SurfaceKind::Video(_) => None,
        }
    }

    /// Marks the resource as loaded. Videos re-assert silence at this point.
    pub(crate) fn mark_loaded(&mut self, at: Instant) {
        match &mut self.kind {
            SurfaceKind::Image(image) => image.load = LoadState::Loaded(at),
            SurfaceKind::Video(video) => video.on_metadata_loaded(at),
        }
    }

    pub(crate) fn mark_failed(&mut self) {
        match &mut self.kind {
            SurfaceKind::Image(image) => image.load = LoadState::Failed,
            SurfaceKind::Video(video) => video.load = LoadState::Failed,
        }
    }

    /// Opacity of the surface at `now`. Videos are always fully opaque.
    #[must_use]
    pub fn opacity(&self, now: Instant, fade: Duration) -> f32 {
        match &self.kind {
            SurfaceKind::Image(image) => image.opacity(now, fade),
            SurfaceKind::Video(_) => 1.0,
        }
    }

    #[must_use]
    pub fn request(&self) -> LoadRequest {
        LoadRequest {
            surface: self.id,
            index: self.index,
            path: self.path.clone(),
            kind: self.media_type(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    const FADE: Duration = Duration::from_millis(300);

    fn image_surface() -> MediaSurface {
        MediaSurface::new(SurfaceId::new(1), 0, "a.png", MediaType::Image)
    }

    fn video_surface() -> MediaSurface {
        MediaSurface::new(SurfaceId::new(2), 3, "clip.mp4", MediaType::Video)
    }

    #[test]
    fn image_starts_transparent() {
        let surface = image_surface();
        assert_abs_diff_eq!(surface.opacity(Instant::now(), FADE), 0.0);
        assert_eq!(surface.load_state(), LoadState::Pending);
    }

    #[test]
    fn image_fades_to_opaque_after_load() {
        let mut surface = image_surface();
        let loaded_at = Instant::now();
        surface.mark_loaded(loaded_at);

        assert_abs_diff_eq!(surface.opacity(loaded_at, FADE), 0.0);
        let midway = surface.opacity(loaded_at + FADE / 2, FADE);
        assert!(midway > 0.0 && midway < 1.0, "midway opacity {midway}");
        assert_abs_diff_eq!(surface.opacity(loaded_at + FADE, FADE), 1.0);
        assert_abs_diff_eq!(surface.opacity(loaded_at + FADE * 4, FADE), 1.0);
    }

    #[test]
    fn fade_is_monotonic() {
        let mut surface = image_surface();
        let loaded_at = Instant::now();
        surface.mark_loaded(loaded_at);

        let mut previous = 0.0;
        for step in 0..=30 {
            let opacity = surface.opacity(loaded_at + Duration::from_millis(step * 10), FADE);
            assert!(opacity >= previous);
            previous = opacity;
        }
    }

    #[test]
    fn zero_fade_is_immediately_opaque() {
        let mut surface = image_surface();
        let loaded_at = Instant::now();
        surface.mark_loaded(loaded_at);
        assert_abs_diff_eq!(surface.opacity(loaded_at, Duration::ZERO), 1.0);
    }

    #[test]
    fn is_fading_only_during_the_ramp() {
        let mut surface = image_surface();
        let loaded_at = Instant::now();
        let image = surface.as_image().cloned().expect("image surface");
        assert!(!image.is_fading(loaded_at, FADE));

        surface.mark_loaded(loaded_at);
        let image = surface.as_image().expect("image surface");
        assert!(image.is_fading(loaded_at + FADE / 3, FADE));
        assert!(!image.is_fading(loaded_at + FADE, FADE));
    }

    #[test]
    fn failed_image_stays_transparent() {
        let mut surface = image_surface();
        surface.mark_failed();
        assert_eq!(surface.load_state(), LoadState::Failed);
        assert_abs_diff_eq!(surface.opacity(Instant::now(), FADE), 0.0);
    }

    #[test]
    fn video_starts_muted_with_controls() {
        let surface = video_surface();
        let video = surface.as_video().expect("video surface");
        assert!(video.controls());
        assert!(video.is_muted());
        assert_abs_diff_eq!(video.volume(), 0.0);
        assert!(!video.is_playing());
    }

    #[test]
    fn volume_requests_are_reverted() {
        let mut surface = video_surface();
        let video = surface.as_video_mut().expect("video surface");

        assert!(video.request_volume(0.8));
        assert!(video.is_muted());
        assert_abs_diff_eq!(video.volume(), 0.0);

        assert!(!video.request_volume(0.0));
        assert_abs_diff_eq!(video.volume(), 0.0);
    }

    #[test]
    fn unmute_requests_are_reverted() {
        let mut surface = video_surface();
        let video = surface.as_video_mut().expect("video surface");

        assert!(video.request_toggle_mute());
        assert!(video.is_muted());
        assert!(video.request_toggle_mute());
        assert!(video.is_muted());
    }

    #[test]
    fn metadata_load_reasserts_silence() {
        let mut surface = video_surface();
        if let Some(video) = surface.as_video_mut() {
            video.volume = 0.5;
            video.muted = false;
        }
        surface.mark_loaded(Instant::now());

        let video = surface.as_video().expect("video surface");
        assert!(video.is_muted());
        assert_abs_diff_eq!(video.volume(), 0.0);
        assert!(matches!(video.load_state(), LoadState::Loaded(_)));
    }

    #[test]
    fn videos_are_always_opaque() {
        let surface = video_surface();
        assert_abs_diff_eq!(surface.opacity(Instant::now(), FADE), 1.0);
    }

    #[test]
    fn playback_toggles() {
        let mut surface = video_surface();
        let video = surface.as_video_mut().expect("video surface");
        video.toggle_playback();
        assert!(video.is_playing());
        video.toggle_playback();
        assert!(!video.is_playing());

        video.toggle_playback();
        video.playback_ended();
        assert!(!video.is_playing());
    }

    #[test]
    fn request_mirrors_surface() {
        let surface = video_surface();
        let request = surface.request();
        assert_eq!(request.surface, surface.id());
        assert_eq!(request.index, 3);
        assert_eq!(request.path, "clip.mp4");
        assert_eq!(request.kind, MediaType::Video);
    }
}
