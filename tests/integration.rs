// SPDX-License-Identifier: MPL-2.0
use folio_gallery::application::gallery::{
    ClickTarget, GalleryKey, GalleryModalController, GalleryRegistry, LoadState, MediaSurface,
    Transition,
};
use folio_gallery::config::{self, Config};
use folio_gallery::content::Portfolio;
use folio_gallery::domain::gallery::{Gallery, Position};
use folio_gallery::domain::media::MediaType;
use folio_gallery::error::GalleryError;
use folio_gallery::i18n::fluent::I18n;
use std::fs;
use std::time::{Duration, Instant};
use tempfile::tempdir;

fn builtin() -> GalleryModalController {
    let registry = GalleryRegistry::from_portfolio(&Portfolio::builtin()).expect("builtin");
    GalleryModalController::new(registry)
}

#[test]
fn browsing_a_gallery_from_its_cover() {
    let mut controller = builtin();

    let request = controller
        .open("orgconnect", Position::Cover)
        .expect("open cover");
    assert_eq!(request.index, 0);
    assert_eq!(request.path, "OrgConnect/Org Logo.png");
    assert!(controller.presentation().scroll_locked);
    assert!(controller.presentation().navigation_visible);

    // Wrap backwards from the first item
    assert!(matches!(
        controller.handle_key(GalleryKey::ArrowLeft),
        Transition::Render(ref r) if r.index == 11
    ));
    assert!(matches!(
        controller.handle_key(GalleryKey::ArrowRight),
        Transition::Render(ref r) if r.index == 0
    ));

    assert_eq!(
        controller.handle_click(ClickTarget::Backdrop),
        Transition::Closed
    );
    assert!(!controller.is_open());
    assert!(!controller.presentation().scroll_locked);
    assert!(controller.surface().is_none());
}

#[test]
fn thumbnail_opens_one_past_its_position() {
    let mut controller = builtin();
    let request = controller
        .open("orgconnect", Position::Thumbnail(2))
        .expect("open thumbnail");

    assert_eq!(request.index, 3);
    assert_eq!(request.path, "OrgConnect/Finance Details.png");
}

#[test]
fn keys_are_ignored_while_closed() {
    let mut controller = builtin();
    for key in [GalleryKey::Escape, GalleryKey::ArrowLeft, GalleryKey::ArrowRight] {
        assert_eq!(controller.handle_key(key), Transition::Unchanged);
    }
    assert!(!controller.is_open());
}

#[test]
fn invalid_open_keeps_the_modal_closed() {
    let mut controller = builtin();

    assert!(matches!(
        controller.open("nope", Position::Cover),
        Err(GalleryError::NotFound(_))
    ));
    assert!(matches!(
        controller.open("orgconnect", Position::Thumbnail(40)),
        Err(GalleryError::PositionOutOfRange { .. })
    ));
    assert!(!controller.is_open());
}

#[test]
fn last_thumbnail_opens_and_the_next_one_does_not() {
    let mut controller = builtin();
    let len = controller
        .registry()
        .lookup("orgconnect")
        .expect("orgconnect")
        .len();

    let request = controller
        .open("orgconnect", Position::Thumbnail(len - 2))
        .expect("last thumbnail");
    assert_eq!(request.index, len - 1);

    assert_eq!(
        controller.open("orgconnect", Position::Thumbnail(len - 1)),
        Err(GalleryError::PositionOutOfRange {
            gallery: "orgconnect".to_string(),
            index: len,
            len,
        })
    );
    assert_eq!(controller.current_index(), Some(len - 1));
}

#[test]
fn huge_position_is_an_error_not_a_panic() {
    let mut controller = builtin();

    assert_eq!(
        controller.open("orgconnect", Position::Thumbnail(usize::MAX)),
        Err(GalleryError::PositionOutOfRange {
            gallery: "orgconnect".to_string(),
            index: usize::MAX,
            len: 12,
        })
    );
    assert!(!controller.is_open());
    assert!(controller.surface().is_none());
}

#[test]
fn videos_stay_silent() {
    let mut controller = builtin();
    let request = controller
        .open("devotion", Position::Thumbnail(8))
        .expect("open video");
    assert_eq!(request.kind, MediaType::Video);

    controller.video_volume_requested(request.surface, 1.0);
    controller.video_mute_toggled(request.surface);

    let video = controller
        .surface()
        .and_then(MediaSurface::as_video)
        .expect("video surface");
    assert!(video.controls());
    assert!(video.is_muted());
    assert!(video.volume() <= 0.0);
}

#[test]
fn image_fades_in_after_loading() {
    let mut controller = builtin().with_fade_in(Duration::from_millis(300));
    let request = controller
        .open("orgconnect", Position::Cover)
        .expect("open");
    let loaded_at = Instant::now();

    assert!(controller.surface_opacity(loaded_at) <= 0.0);
    assert!(controller.resource_loaded(request.surface, loaded_at));
    assert!(matches!(
        controller.surface().map(MediaSurface::load_state),
        Some(LoadState::Loaded(_))
    ));
    assert!(controller.is_animating(loaded_at + Duration::from_millis(100)));
    assert!(controller.surface_opacity(loaded_at + Duration::from_millis(300)) >= 1.0);
}

#[test]
fn single_item_gallery_hides_navigation() {
    let mut registry = GalleryRegistry::new();
    registry
        .insert(Gallery::from_paths("solo", ["solo/only.png"]))
        .expect("insert");
    let mut controller = GalleryModalController::new(registry);
    controller.open("solo", Position::Cover).expect("open");

    assert!(!controller.presentation().navigation_visible);
    assert!(controller.next().is_none());
    assert_eq!(controller.current_index(), Some(0));
}

#[test]
fn portfolio_file_round_trips_through_the_registry() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("portfolio.toml");
    fs::write(
        &path,
        r#"
[[project]]
title = "Demo"
gallery = "demo"

[[gallery]]
name = "demo"
items = ["demo/cover.png", "demo/one.png", "demo/clip.mp4"]
"#,
    )
    .expect("write portfolio");

    let portfolio = Portfolio::load_from_path(&path).expect("load portfolio");
    portfolio.validate().expect("valid");
    let registry = GalleryRegistry::from_portfolio(&portfolio).expect("registry");
    let mut controller = GalleryModalController::new(registry);

    let request = controller
        .open("demo", Position::Thumbnail(1))
        .expect("open");
    assert_eq!(request.kind, MediaType::Video);
}

#[test]
fn language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let mut config = Config::default();
    config.general.language = Some("fr".to_string());
    config::save_to_path(&config, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config");
    let i18n = I18n::new(None, &loaded);
    assert_eq!(i18n.current_locale().to_string(), "fr");
    assert_eq!(i18n.tr("modal-close"), "Fermer");

    // CLI wins over config
    let i18n = I18n::new(Some("en-US".to_string()), &loaded);
    assert_eq!(i18n.tr("modal-close"), "Close");
}

#[test]
fn gallery_settings_survive_a_save() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("nested").join("settings.toml");

    let mut config = Config::default();
    config.gallery.fade_in_ms = Some(500);
    config.gallery.content_width_percent = Some(80);
    config::save_to_path(&config, &path).expect("save");

    let loaded = config::load_from_path(&path).expect("load");
    assert_eq!(loaded.gallery.fade_in(), Duration::from_millis(500));
    assert!((loaded.gallery.content_width_fraction() - 0.8).abs() < f32::EPSILON);
}
