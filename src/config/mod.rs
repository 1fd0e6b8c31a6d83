// SPDX-License-Identifier: MPL-2.0
//! Playback configuration and its optional `playback.toml` persistence.
//!
//! A [`PlaybackConfiguration`] is a validated value handed to a controller at
//! construction. Hosts that want to persist defaults can use the sectioned
//! [`Config`] file format; the controller itself never reads files.
//!
//! # Configuration Sections
//!
//! - `[engine]` - Rasterizer setup (worker threads)
//! - `[playback]` - Loop mode, speed, tick rate, content mode, pixel format
//!
//! # Examples
//!
//! ```no_run
//! use lottie_lens::config::{self, Config, LoopKind};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.playback.loop_mode = Some(LoopKind::AutoReverse);
//!
//! // Validate into a controller configuration
//! let playback = config.playback.resolve().expect("invalid playback settings");
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
mod playback;

pub use defaults::*;
pub use playback::PlaybackConfiguration;

use crate::domain::animation::{FrameRate, LoopMode, PlaybackSpeed, RepeatCount};
use crate::error::{ConfigError, Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "playback.toml";
const APP_NAME: &str = "LottieLens";

// =============================================================================
// Enums (shared between sections and the renderer)
// =============================================================================

/// Policy for fitting the animation into a differently shaped target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ContentMode {
    /// Show the whole animation; the rasterizer letterboxes it.
    #[default]
    AspectFit,
    /// Crop the animation so it covers the whole target.
    AspectFill,
}

/// Memory layout of the 32-bit pixels written by the rasterizer.
///
/// Both layouts hold premultiplied alpha. Pixels are read as native `u32`
/// words, so the channel positions below are bit positions in the word.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PixelFormat {
    /// Word `0xAARRGGBB`; bytes `B, G, R, A` on little-endian hosts.
    #[default]
    ArgbPremultipliedLe,
    /// Word `0xAABBGGRR`; bytes `R, G, B, A` in big-endian byte order.
    AbgrPremultipliedBe,
}

/// Loop mode as written in a config file. The repeat count lives in its
/// own key so that the section stays flat.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LoopKind {
    PlayOnce,
    #[default]
    Loop,
    Repeat,
    AutoReverse,
}

// =============================================================================
// Section Structs
// =============================================================================

/// Rasterizer engine settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Worker threads handed to the rasterizer at init (0 = caller thread).
    #[serde(default = "default_threads", skip_serializing_if = "Option::is_none")]
    pub threads: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
        }
    }
}

impl EngineConfig {
    /// Returns the thread count, clamped to [`MAX_ENGINE_THREADS`].
    #[must_use]
    pub fn thread_count(&self) -> u32 {
        self.threads
            .unwrap_or(DEFAULT_ENGINE_THREADS)
            .min(MAX_ENGINE_THREADS)
    }
}

/// Playback settings as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_mode: Option<LoopKind>,

    /// Only read when `loop_mode = "repeat"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_count: Option<u32>,

    #[serde(default = "default_speed", skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,

    #[serde(
        default = "default_frame_rate_hz",
        skip_serializing_if = "Option::is_none"
    )]
    pub frame_rate_hz: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_mode: Option<ContentMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixel_format: Option<PixelFormat>,

    #[serde(
        default = "default_rotation_degrees",
        skip_serializing_if = "Option::is_none"
    )]
    pub rotation_degrees: Option<f32>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            loop_mode: Some(LoopKind::default()),
            repeat_count: None,
            speed: default_speed(),
            frame_rate_hz: default_frame_rate_hz(),
            content_mode: Some(ContentMode::default()),
            pixel_format: Some(PixelFormat::default()),
            rotation_degrees: default_rotation_degrees(),
        }
    }
}

impl PlaybackConfig {
    /// Validates the section into a [`PlaybackConfiguration`].
    ///
    /// Absent keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a non-positive speed, frame rate or
    /// repeat count.
    pub fn resolve(&self) -> std::result::Result<PlaybackConfiguration, ConfigError> {
        let loop_mode = match self.loop_mode.unwrap_or_default() {
            LoopKind::PlayOnce => LoopMode::PlayOnce,
            LoopKind::Loop => LoopMode::Loop,
            LoopKind::AutoReverse => LoopMode::AutoReverse,
            LoopKind::Repeat => LoopMode::Repeat(RepeatCount::new(
                self.repeat_count.unwrap_or(DEFAULT_REPEAT_COUNT),
            )?),
        };

        Ok(PlaybackConfiguration {
            loop_mode,
            speed: PlaybackSpeed::new(self.speed.unwrap_or(DEFAULT_SPEED))?,
            content_mode: self.content_mode.unwrap_or_default(),
            frame_rate: FrameRate::new(self.frame_rate_hz.unwrap_or(DEFAULT_FRAME_RATE_HZ))?,
            pixel_format: self.pixel_format.unwrap_or_default(),
            rotation_degrees: self.rotation_degrees.unwrap_or(DEFAULT_ROTATION_DEGREES),
        })
    }
}

impl From<&PlaybackConfiguration> for PlaybackConfig {
    fn from(config: &PlaybackConfiguration) -> Self {
        let (loop_mode, repeat_count) = match config.loop_mode {
            LoopMode::PlayOnce => (LoopKind::PlayOnce, None),
            LoopMode::Loop => (LoopKind::Loop, None),
            LoopMode::AutoReverse => (LoopKind::AutoReverse, None),
            LoopMode::Repeat(count) => (LoopKind::Repeat, Some(count.get())),
        };
        Self {
            loop_mode: Some(loop_mode),
            repeat_count,
            speed: Some(config.speed.value()),
            frame_rate_hz: Some(config.frame_rate.hz()),
            content_mode: Some(config.content_mode),
            pixel_format: Some(config.pixel_format),
            rotation_degrees: Some(config.rotation_degrees),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Persisted configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_threads() -> Option<u32> {
    Some(DEFAULT_ENGINE_THREADS)
}

fn default_speed() -> Option<f64> {
    Some(DEFAULT_SPEED)
}

fn default_frame_rate_hz() -> Option<f64> {
    Some(DEFAULT_FRAME_RATE_HZ)
}

fn default_rotation_degrees() -> Option<f32> {
    Some(DEFAULT_ROTATION_DEGREES)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path, rooted at `base_dir` when given.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    let dir = base_dir.or_else(|| {
        dirs::config_dir().map(|mut path| {
            path.push(APP_NAME);
            path
        })
    })?;
    Some(dir.join(CONFIG_FILE))
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
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
                    log::warn!("ignoring unreadable config {}: {}", path.display(), err);
                    return (Config::default(), Some(err.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    from_toml_str(&content)
}

/// Parses configuration from TOML text.
pub fn from_toml_str(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
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
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            engine: EngineConfig { threads: Some(4) },
            playback: PlaybackConfig {
                loop_mode: Some(LoopKind::Repeat),
                repeat_count: Some(3),
                speed: Some(2.0),
                frame_rate_hz: Some(60.0),
                content_mode: Some(ContentMode::AspectFill),
                pixel_format: Some(PixelFormat::AbgrPremultipliedBe),
                rotation_degrees: Some(90.0),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("playback.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("playback.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let result = load_from_path(&config_path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_falls_back_to_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[playback]\nspeed = \"fast\"")
            .expect("failed to write config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn load_with_override_missing_file_is_silent_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn save_with_override_writes_into_directory() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base = temp_dir.path().join("deep").join("path");

        save_with_override(&Config::default(), Some(base.clone())).expect("save should work");
        assert!(base.join(CONFIG_FILE).exists());
    }

    #[test]
    fn missing_sections_take_defaults() {
        let config = from_toml_str("[playback]\nloop_mode = \"auto-reverse\"").unwrap();
        assert_eq!(config.engine, EngineConfig::default());
        assert_eq!(config.playback.loop_mode, Some(LoopKind::AutoReverse));
        assert_eq!(config.playback.speed, Some(DEFAULT_SPEED));
        assert_eq!(config.playback.frame_rate_hz, Some(DEFAULT_FRAME_RATE_HZ));
    }

    #[test]
    fn resolve_builds_repeat_mode_with_count() {
        let section = PlaybackConfig {
            loop_mode: Some(LoopKind::Repeat),
            repeat_count: Some(4),
            ..PlaybackConfig::default()
        };
        let resolved = section.resolve().unwrap();
        assert_eq!(
            resolved.loop_mode,
            LoopMode::Repeat(RepeatCount::new(4).unwrap())
        );
    }

    #[test]
    fn resolve_rejects_zero_repeat_count() {
        let section = PlaybackConfig {
            loop_mode: Some(LoopKind::Repeat),
            repeat_count: Some(0),
            ..PlaybackConfig::default()
        };
        assert_eq!(section.resolve(), Err(ConfigError::InvalidRepeatCount(0)));
    }

    #[test]
    fn resolve_rejects_negative_speed() {
        let section = PlaybackConfig {
            speed: Some(-1.0),
            ..PlaybackConfig::default()
        };
        assert_eq!(section.resolve(), Err(ConfigError::InvalidSpeed(-1.0)));
    }

    #[test]
    fn resolve_rejects_out_of_range_frame_rate() {
        for hz in [1e-30, 1e12] {
            let section = PlaybackConfig {
                frame_rate_hz: Some(hz),
                ..PlaybackConfig::default()
            };
            assert_eq!(section.resolve(), Err(ConfigError::InvalidFrameRate(hz)));
        }
    }

    #[test]
    fn resolve_defaults_match_configuration_default() {
        let resolved = PlaybackConfig::default().resolve().unwrap();
        assert_eq!(resolved, PlaybackConfiguration::default());
    }

    #[test]
    fn section_from_configuration_resolves_back() {
        let configuration = PlaybackConfiguration::default()
            .with_loop_mode(LoopMode::Repeat(RepeatCount::new(2).unwrap()))
            .with_content_mode(ContentMode::AspectFill);
        let section = PlaybackConfig::from(&configuration);
        assert_eq!(section.repeat_count, Some(2));
        assert_eq!(section.resolve().unwrap(), configuration);
    }

    #[test]
    fn thread_count_is_clamped() {
        let engine = EngineConfig {
            threads: Some(1_000),
        };
        assert_eq!(engine.thread_count(), MAX_ENGINE_THREADS);
    }
}
