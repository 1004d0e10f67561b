// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the portfolio page and
//! the gallery modal.
//!
//! The `App` struct wires together the content (portfolio and gallery
//! registry), localization and settings, and translates messages into side
//! effects like reading media files off the UI thread.

pub mod config;
mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::application::gallery::{GalleryModalController, GalleryRegistry, SurfaceId};
use crate::content::Portfolio;
use crate::domain::gallery::Position;
use crate::i18n::fluent::I18n;
use crate::ui::notifications::{self, Notification};
use crate::ui::portfolio;
use crate::ui::theming::{ColorScheme, ThemeMode};
use crate::video_player::{DecoderCommand, DecoderCommandSender};
use iced::widget::image::Handle;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const WINDOW_DEFAULT_WIDTH: u32 = 1200;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;
pub const MIN_WINDOW_WIDTH: u32 = 640;
pub const MIN_WINDOW_HEIGHT: u32 = 480;

/// Notification key shown when the portfolio file cannot be read.
const PORTFOLIO_LOAD_WARNING_KEY: &str = "notification-portfolio-load-error";

/// Notification key shown when the portfolio file references unknown galleries.
const PORTFOLIO_INVALID_KEY: &str = "notification-portfolio-invalid";

/// Decoded bytes of an image surface.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub surface: SurfaceId,
    pub handle: Handle,
}

/// Playback session of the current video surface.
#[derive(Debug, Clone)]
pub struct VideoSession {
    pub surface: SurfaceId,
    commands: DecoderCommandSender,
    /// Latest decoded frame; the poster until playback starts.
    pub frame: Option<Handle>,
}

impl VideoSession {
    #[must_use]
    pub fn new(surface: SurfaceId, commands: DecoderCommandSender) -> Self {
        Self {
            surface,
            commands,
            frame: None,
        }
    }

    pub fn send(&self, command: DecoderCommand) {
        if let Err(err) = self.commands.send(command) {
            tracing::debug!(
                %err,
                surface = self.surface.value(),
                ?command,
                "playback command dropped"
            );
        }
    }
}

/// Root Iced application state that bridges UI components, localization, and
/// persisted preferences.
pub struct App {
    pub i18n: I18n,
    portfolio: Portfolio,
    gallery: GalleryModalController,
    /// Bytes of the current image surface, once read.
    image: Option<LoadedImage>,
    /// Decoder session of the current video surface, once started.
    video: Option<VideoSession>,
    media_root: PathBuf,
    theme_mode: ThemeMode,
    colors: ColorScheme,
    content_width: f32,
    content_height: f32,
    /// Clock sampled on ticks and loads, used for the fade-in.
    now: Instant,
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("gallery", &self.gallery.state())
            .field("media_root", &self.media_root)
            .field("theme_mode", &self.theme_mode)
            .finish_non_exhaustive()
    }
}

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a Fn boot closure; the flags are consumed once
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Loads the portfolio named on the command line, falling back to the
/// built-in content when it is unreadable or inconsistent.
fn load_portfolio(path: Option<&Path>) -> (Portfolio, GalleryRegistry, Option<Notification>) {
    let (portfolio, warning) = match path {
        None => (Portfolio::builtin(), None),
        Some(path) => match Portfolio::load_from_path(path) {
            Ok(portfolio) => (portfolio, None),
            Err(err) => {
                tracing::warn!(%err, path = %path.display(), "failed to load portfolio");
                let warning = Notification::warning(PORTFOLIO_LOAD_WARNING_KEY)
                    .with_arg("path", path.display().to_string());
                (Portfolio::builtin(), Some(warning))
            }
        },
    };

    match portfolio
        .validate()
        .and_then(|()| GalleryRegistry::from_portfolio(&portfolio))
    {
        Ok(registry) => (portfolio, registry, warning),
        Err(err) => {
            tracing::error!(%err, "invalid portfolio, using built-in content");
            (
                Portfolio::builtin(),
                GalleryRegistry::builtin(),
                Some(Notification::error(PORTFOLIO_INVALID_KEY)),
            )
        }
    }
}

impl App {
    /// Initializes application state from the settings file and the flags
    /// received from the launcher.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let open = flags.open.clone();
        let mut app = Self::with_config(flags, &config, config_warning);
        let task = match open {
            Some(raw) => app.open_target(&raw),
            None => Task::none(),
        };
        (app, task)
    }

    /// Opens the gallery named by a `GALLERY:POSITION` target, the way a
    /// click on the matching tile would.
    fn open_target(&mut self, raw: &str) -> Task<Message> {
        let Some((gallery, position)) = Position::parse_target(raw) else {
            tracing::error!(raw, "invalid open target, expected GALLERY:POSITION");
            return Task::none();
        };
        self.update(Message::Portfolio(portfolio::Message::OpenGallery {
            gallery: gallery.to_string(),
            position,
        }))
    }

    fn with_config(flags: Flags, config: &config::Config, config_warning: Option<String>) -> Self {
        let i18n = I18n::new(flags.lang.clone(), config);
        let portfolio_path = flags.portfolio_path.as_deref().map(Path::new);
        let (portfolio, registry, portfolio_warning) = load_portfolio(portfolio_path);

        let media_root = paths::resolve_media_root(
            flags.media_root.map(PathBuf::from),
            config.gallery.media_root.as_deref(),
            portfolio_path,
        );
        tracing::info!(
            galleries = registry.len(),
            projects = portfolio.projects.len(),
            media_root = %media_root.display(),
            "portfolio ready"
        );

        let theme_mode = config.general.theme_mode;
        let mut notifications = notifications::Manager::new();
        if let Some(key) = config_warning {
            notifications.push(Notification::warning(key));
        }
        if let Some(warning) = portfolio_warning {
            notifications.push(warning);
        }

        Self {
            i18n,
            portfolio,
            gallery: GalleryModalController::new(registry).with_fade_in(config.gallery.fade_in()),
            image: None,
            video: None,
            media_root,
            theme_mode,
            colors: ColorScheme::for_mode(theme_mode),
            content_width: config.gallery.content_width_fraction(),
            content_height: config.gallery.content_height_fraction(),
            now: Instant::now(),
            notifications,
        }
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.gallery.current_item() {
            Some(item) => format!("{} - {app_name}", item.file_name()),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let keyboard_sub = subscription::create_keyboard_subscription(self.gallery.is_open());
        let tick_sub = subscription::create_tick_subscription(
            self.gallery.is_animating(self.now),
            self.notifications.has_notifications(),
        );
        let video_sub = subscription::create_video_subscription(self.video_target());

        Subscription::batch([keyboard_sub, tick_sub, video_sub])
    }

    /// Surface id and file of the video on screen, if any.
    fn video_target(&self) -> Option<(SurfaceId, PathBuf)> {
        let surface = self.gallery.surface().filter(|s| s.as_video().is_some())?;
        Some((surface.id(), self.media_root.join(surface.path())))
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            gallery: &mut self.gallery,
            image: &mut self.image,
            video: &mut self.video,
            notifications: &mut self.notifications,
            media_root: &self.media_root,
            now: &mut self.now,
        };

        match message {
            Message::Portfolio(portfolio_message) => {
                update::handle_portfolio_message(&mut ctx, portfolio_message)
            }
            Message::Modal(modal_message) => update::handle_modal_message(&mut ctx, modal_message),
            Message::KeyPressed(key) => update::handle_key(&mut ctx, key),
            Message::ImageLoaded { surface, result } => {
                update::handle_image_loaded(&mut ctx, surface, result)
            }
            Message::Playback(playback) => update::handle_playback(&mut ctx, playback),
            Message::Notification(notification_message) => {
                self.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::Tick(now) => update::handle_tick(&mut ctx, now),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            portfolio: &self.portfolio,
            gallery: &self.gallery,
            image: self.image.as_ref(),
            video: self.video.as_ref(),
            media_root: &self.media_root,
            colors: &self.colors,
            content_width: self.content_width,
            content_height: self.content_height,
            now: self.now,
            notifications: &self.notifications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::gallery::{ClickTarget, GalleryKey};
    use crate::ui::gallery_modal;
    use std::fs;
    use tempfile::tempdir;

    fn english_flags() -> Flags {
        Flags {
            lang: Some("en-US".to_string()),
            ..Flags::default()
        }
    }

    fn app() -> App {
        App::with_config(english_flags(), &config::Config::default(), None)
    }

    fn open(app: &mut App, gallery: &str, position: Position) {
        let _ = app.update(Message::Portfolio(portfolio::Message::OpenGallery {
            gallery: gallery.to_string(),
            position,
        }));
    }

    #[test]
    fn starts_closed_on_the_builtin_portfolio() {
        let app = app();
        assert!(!app.gallery.is_open());
        assert_eq!(app.portfolio, Portfolio::builtin());
        assert!(!app.notifications.has_notifications());
    }

    #[test]
    fn config_warning_becomes_a_toast() {
        let app = App::with_config(
            english_flags(),
            &config::Config::default(),
            Some(config::LOAD_WARNING_KEY.to_string()),
        );
        assert_eq!(app.notifications.visible_count(), 1);
    }

    #[test]
    fn title_shows_app_name_when_closed() {
        assert_eq!(app().title(), "Folio Gallery");
    }

    #[test]
    fn title_shows_current_file_name() {
        let mut app = app();
        open(&mut app, "orgconnect", Position::Cover);
        assert_eq!(app.title(), "Org Logo.png - Folio Gallery");
    }

    #[test]
    fn keys_drive_the_modal() {
        let mut app = app();
        open(&mut app, "orgconnect", Position::Cover);

        let _ = app.update(Message::KeyPressed(GalleryKey::ArrowLeft));
        assert_eq!(app.gallery.current_index(), Some(11));

        let _ = app.update(Message::KeyPressed(GalleryKey::Escape));
        assert!(!app.gallery.is_open());
    }

    #[test]
    fn close_button_clears_the_image() {
        let mut app = app();
        open(&mut app, "orgconnect", Position::Cover);
        let surface = app.gallery.surface().expect("surface").id();
        let _ = app.update(Message::ImageLoaded {
            surface,
            result: Ok(vec![0]),
        });
        assert!(app.image.is_some());

        let _ = app.update(Message::Modal(gallery_modal::Message::Click(
            ClickTarget::CloseButton,
        )));

        assert!(!app.gallery.is_open());
        assert!(app.image.is_none());
    }

    #[test]
    fn open_target_starts_on_the_requested_item() {
        let mut app = app();

        let _ = app.open_target("devotion:-1");
        assert_eq!(app.gallery.current_index(), Some(0));

        let _ = app.open_target("orgconnect:10");
        assert_eq!(app.gallery.current_index(), Some(11));
    }

    #[test]
    fn bad_open_targets_leave_the_modal_closed() {
        let mut app = app();

        let _ = app.open_target("orgconnect");
        let _ = app.open_target("orgconnect:11");
        let _ = app.open_target("nowhere:0");

        assert!(!app.gallery.is_open());
    }

    #[test]
    fn video_decoder_follows_the_current_surface() {
        let mut app = app();
        assert!(app.video_target().is_none());

        open(&mut app, "devotion", Position::Thumbnail(7));
        let surface = app.gallery.surface().expect("surface").id();
        let (target, path) = app.video_target().expect("video target");
        assert_eq!(target, surface);
        assert!(path.ends_with("Devotion Camacop/Screenrecording_20240524_130339.mp4"));

        open(&mut app, "orgconnect", Position::Cover);
        assert!(app.video_target().is_none());
    }

    #[test]
    fn dismissing_a_toast_removes_it() {
        let mut app = App::with_config(
            english_flags(),
            &config::Config::default(),
            Some(config::LOAD_WARNING_KEY.to_string()),
        );
        let id = app.notifications.visible().next().expect("toast").id();

        let _ = app.update(Message::Notification(
            notifications::NotificationMessage::Dismiss(id),
        ));

        assert!(!app.notifications.has_notifications());
    }

    #[test]
    fn missing_portfolio_file_falls_back_with_a_warning() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("missing.toml");

        let (portfolio, registry, warning) = load_portfolio(Some(&path));

        assert_eq!(portfolio, Portfolio::builtin());
        assert!(registry.lookup("orgconnect").is_ok());
        let warning = warning.expect("warning");
        assert_eq!(warning.message_key(), PORTFOLIO_LOAD_WARNING_KEY);
    }

    #[test]
    fn dangling_gallery_reference_falls_back_with_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("portfolio.toml");
        fs::write(
            &path,
            "[[project]]\ntitle = \"Broken\"\ngallery = \"nowhere\"\n",
        )
        .expect("write portfolio");

        let (portfolio, _registry, warning) = load_portfolio(Some(&path));

        assert_eq!(portfolio, Portfolio::builtin());
        let warning = warning.expect("notification");
        assert_eq!(warning.message_key(), PORTFOLIO_INVALID_KEY);
        assert_eq!(warning.severity(), notifications::Severity::Error);
    }

    #[test]
    fn portfolio_file_sets_the_media_root() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("portfolio.toml");
        fs::write(
            &path,
            "[[project]]\ntitle = \"Demo\"\ngallery = \"demo\"\n\n[[gallery]]\nname = \"demo\"\nitems = [\"a.png\"]\n",
        )
        .expect("write portfolio");

        let flags = Flags {
            portfolio_path: Some(path.display().to_string()),
            ..english_flags()
        };
        let app = App::with_config(flags, &config::Config::default(), None);

        assert_eq!(app.media_root, dir.path());
        assert!(app.gallery.registry().lookup("demo").is_ok());
        assert!(!app.notifications.has_notifications());
    }
}
