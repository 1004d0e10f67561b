// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[gallery]` - Modal layout, image fade-in and media root
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` or set the `FOLIO_GALLERY_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use folio_gallery::config::{self, Config};
//!
//! let (mut config, _warning) = config::load();
//! config.gallery.fade_in_ms = Some(150);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Warning key pushed as a toast when `settings.toml` cannot be read.
pub const LOAD_WARNING_KEY: &str = "notification-config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Gallery modal settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryConfig {
    /// Image fade-in duration in milliseconds.
    #[serde(default = "default_fade_in_ms", skip_serializing_if = "Option::is_none")]
    pub fade_in_ms: Option<u64>,

    /// Width of the content region, as a percentage of the window width.
    #[serde(
        default = "default_content_width_percent",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_width_percent: Option<u16>,

    /// Height of the content region, as a percentage of the window height.
    #[serde(
        default = "default_content_height_percent",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_height_percent: Option<u16>,

    /// Directory that relative media paths are resolved against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_root: Option<String>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            fade_in_ms: default_fade_in_ms(),
            content_width_percent: default_content_width_percent(),
            content_height_percent: default_content_height_percent(),
            media_root: None,
        }
    }
}

impl GalleryConfig {
    /// Fade-in duration, clamped to the supported range.
    #[must_use]
    pub fn fade_in(&self) -> Duration {
        let ms = self
            .fade_in_ms
            .unwrap_or(DEFAULT_FADE_IN_MS)
            .clamp(MIN_FADE_IN_MS, MAX_FADE_IN_MS);
        Duration::from_millis(ms)
    }

    /// Content width as a fraction of the window, clamped.
    #[must_use]
    pub fn content_width_fraction(&self) -> f32 {
        clamp_content_percent(self.content_width_percent, DEFAULT_CONTENT_WIDTH_PERCENT)
    }

    /// Content height as a fraction of the window, clamped.
    #[must_use]
    pub fn content_height_fraction(&self) -> f32 {
        clamp_content_percent(self.content_height_percent, DEFAULT_CONTENT_HEIGHT_PERCENT)
    }
}

fn clamp_content_percent(value: Option<u16>, default: u16) -> f32 {
    let percent = value
        .unwrap_or(default)
        .clamp(MIN_CONTENT_PERCENT, MAX_CONTENT_PERCENT);
    f32::from(percent) / 100.0
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Gallery modal settings.
    #[serde(default)]
    pub gallery: GalleryConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_fade_in_ms() -> Option<u64> {
    Some(DEFAULT_FADE_IN_MS)
}

fn default_content_width_percent() -> Option<u16> {
    Some(DEFAULT_CONTENT_WIDTH_PERCENT)
}

fn default_content_height_percent() -> Option<u16> {
    Some(DEFAULT_CONTENT_HEIGHT_PERCENT)
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with an i18n warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "falling back to default settings");
                    return (Config::default(), Some(LOAD_WARNING_KEY.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_utils::assert_abs_diff_eq;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
                theme_mode: ThemeMode::Light,
            },
            gallery: GalleryConfig {
                fade_in_ms: Some(500),
                content_width_percent: Some(80),
                content_height_percent: Some(90),
                media_root: Some("/srv/portfolio".to_string()),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        assert!(matches!(
            load_from_path(&config_path),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn invalid_theme_mode_is_rejected() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[general]\ntheme_mode = \"sepia\"\n").expect("write file");

        match load_from_path(&config_path) {
            Err(Error::Config(message)) => assert!(message.contains("sepia")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn theme_mode_is_case_insensitive() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[general]\ntheme_mode = \"Dark\"\n").expect("write file");

        let loaded = load_from_path(&config_path).expect("failed to load config");
        assert_eq!(loaded.general.theme_mode, ThemeMode::Dark);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[general]\nlanguage = \"fr\"\n").expect("write file");

        let loaded = load_from_path(&config_path).expect("failed to load config");
        assert_eq!(loaded.general.language.as_deref(), Some("fr"));
        assert_eq!(loaded.gallery, GalleryConfig::default());
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.general.theme_mode, ThemeMode::System);
        assert_eq!(config.gallery.fade_in_ms, Some(DEFAULT_FADE_IN_MS));
        assert_eq!(config.gallery.fade_in(), Duration::from_millis(300));
        assert_abs_diff_eq!(config.gallery.content_width_fraction(), 0.6);
        assert_abs_diff_eq!(config.gallery.content_height_fraction(), 0.7);
        assert!(config.gallery.media_root.is_none());
    }

    #[test]
    fn fade_in_is_clamped() {
        let gallery = GalleryConfig {
            fade_in_ms: Some(60_000),
            ..GalleryConfig::default()
        };
        assert_eq!(gallery.fade_in(), Duration::from_millis(MAX_FADE_IN_MS));

        let disabled = GalleryConfig {
            fade_in_ms: Some(0),
            ..GalleryConfig::default()
        };
        assert_eq!(disabled.fade_in(), Duration::ZERO);
    }

    #[test]
    fn content_size_is_clamped() {
        let gallery = GalleryConfig {
            content_width_percent: Some(5),
            content_height_percent: Some(250),
            ..GalleryConfig::default()
        };
        assert_abs_diff_eq!(gallery.content_width_fraction(), 0.2);
        assert_abs_diff_eq!(gallery.content_height_fraction(), 1.0);
    }

    #[test]
    fn unset_gallery_values_fall_back_to_defaults() {
        let gallery = GalleryConfig {
            fade_in_ms: None,
            content_width_percent: None,
            content_height_percent: None,
            media_root: None,
        };
        assert_eq!(gallery.fade_in(), Duration::from_millis(DEFAULT_FADE_IN_MS));
        assert_abs_diff_eq!(gallery.content_width_fraction(), 0.6);
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn save_with_override_and_load_with_override_round_trip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let config = Config {
            general: GeneralConfig {
                language: Some("en-US".to_string()),
                theme_mode: ThemeMode::Dark,
            },
            gallery: GalleryConfig {
                fade_in_ms: Some(0),
                ..GalleryConfig::default()
            },
        };

        save_with_override(&config, Some(base_dir.clone())).expect("save should succeed");
        assert!(base_dir.join("settings.toml").exists(), "config file should exist");

        let (loaded, warning) = load_with_override(Some(base_dir));
        assert!(warning.is_none(), "load should succeed without warning");
        assert_eq!(loaded.general.theme_mode, ThemeMode::Dark);
        assert_eq!(loaded.gallery.fade_in_ms, Some(0));
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none(), "should not warn for missing file");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        fs::write(base_dir.join("settings.toml"), "not = valid = toml").expect("write file");

        let (config, warning) = load_with_override(Some(base_dir));
        assert_eq!(warning.as_deref(), Some(LOAD_WARNING_KEY));
        assert_eq!(config, Config::default());
    }
}
