//! Configuration management for fieldcam.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths, environment overrides used by deployment scripts, validation and
//! atomic write operations.

use crate::{
    AppError, AppResult,
    config::{BehaviourConfig, DisplayConfig, EncoderConfig, StorageConfig},
};

use fieldcam_core::{
    MAX_TICK, MIN_TICK, RendererOptions,
    render::IndicatorStyle,
    session::{Resolution, SessionConfig, TimestampOverlay},
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
    time::Duration,
};

use directories::ProjectDirs;
use embedded_graphics::prelude::Size;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Overrides the storage root.
pub(crate) const ENV_ROOT_PATH: &str = "ROOT_PATH";
/// Overrides the recordings subdirectory.
pub(crate) const ENV_RECORDINGS_PATH: &str = "RECORDINGS_PATH";
/// Overrides the encoder output size.
pub(crate) const ENV_VIDEO_SIZE: &str = "VIDEO_SIZE";
/// Overrides the segment length in seconds.
pub(crate) const ENV_SEGMENT_TIME: &str = "SEGMENT_TIME";

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Recording volume.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Encoder process.
    #[serde(default)]
    pub encoder: EncoderConfig,
    /// Status panel.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Application behavior settings.
    #[serde(default)]
    pub behavior: BehaviourConfig,
}

impl Config {
    /// Load configuration from the platform config directory, creating a
    /// default file if none exists, then apply environment overrides.
    ///
    /// Note: This does NOT validate. Call [`Config::validate`] before
    /// wiring the recorder.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from `config_path`, writing defaults there if the
    /// file does not exist.
    #[track_caller]
    #[instrument]
    pub fn load_from(config_path: &Path) -> AppResult<Self> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to read config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to parse config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            info!(config_path = ?config_path, "Configuration loaded");

            Ok(config)
        } else {
            info!(config_path = ?config_path, "No config found, creating default");
            Self::create_default(config_path)
        }
    }

    /// Apply `ROOT_PATH`, `RECORDINGS_PATH`, `VIDEO_SIZE` and `SEGMENT_TIME`
    /// as read through `lookup`.
    ///
    /// An unparseable `SEGMENT_TIME` is ignored with a warning. `VIDEO_SIZE`
    /// is taken as-is and checked by [`Config::validate`].
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup(ENV_ROOT_PATH) {
            debug!(root = %root, "ROOT_PATH override");
            self.storage.root_path = PathBuf::from(root);
        }

        if let Some(dir) = lookup(ENV_RECORDINGS_PATH) {
            debug!(dir = %dir, "RECORDINGS_PATH override");
            self.storage.recordings_dir = dir;
        }

        if let Some(size) = lookup(ENV_VIDEO_SIZE) {
            debug!(size = %size, "VIDEO_SIZE override");
            self.encoder.resolution = size;
        }

        if let Some(seconds) = lookup(ENV_SEGMENT_TIME) {
            match seconds.trim().parse::<u64>() {
                Ok(seconds) => {
                    debug!(seconds, "SEGMENT_TIME override");
                    self.encoder.segment_seconds = seconds;
                }
                Err(e) => warn!(value = %seconds, error = %e, "Ignoring invalid SEGMENT_TIME"),
            }
        }
    }

    /// Check values serde cannot: tick range, segment length, resolution
    /// syntax and panel size.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn validate(&self) -> AppResult<()> {
        let tick = self.tick_period();
        if tick < MIN_TICK || tick > MAX_TICK {
            return Err(AppError::ConfigError {
                reason: format!(
                    "display.tick_millis must be between {} and {}, got {}",
                    MIN_TICK.as_millis(),
                    MAX_TICK.as_millis(),
                    self.display.tick_millis
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.encoder.segment_seconds == 0 {
            return Err(AppError::ConfigError {
                reason: "encoder.segment_seconds must be greater than zero".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.resolution()?;

        if self.display.width == 0 || self.display.height == 0 {
            return Err(AppError::ConfigError {
                reason: format!(
                    "display size must be non-zero, got {}x{}",
                    self.display.width, self.display.height
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Save configuration to `config_path` using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if power is lost during the write.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // Atomic write: write to temp file then rename
        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// `<root_path>/<recordings_dir>`.
    pub fn recordings_path(&self) -> PathBuf {
        self.storage.root_path.join(&self.storage.recordings_dir)
    }

    /// `<root_path>/logs`.
    pub fn log_dir(&self) -> PathBuf {
        self.storage.root_path.join("logs")
    }

    /// Status refresh period.
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.display.tick_millis)
    }

    /// Grace period before the encoder is killed.
    pub fn stop_timeout(&self) -> Duration {
        Duration::from_secs(self.encoder.stop_timeout_secs)
    }

    /// Panel dimensions.
    pub fn panel_size(&self) -> Size {
        Size::new(self.display.width, self.display.height)
    }

    /// Parsed encoder output size.
    #[track_caller]
    pub fn resolution(&self) -> AppResult<Resolution> {
        Resolution::parse(&self.encoder.resolution).ok_or_else(|| AppError::ConfigError {
            reason: format!(
                "encoder.resolution must be WIDTHxHEIGHT, got {:?}",
                self.encoder.resolution
            ),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Everything the supervisor needs for a session.
    #[track_caller]
    pub fn to_session_config(&self) -> AppResult<SessionConfig> {
        Ok(SessionConfig {
            program: self.encoder.program.clone(),
            device: self.encoder.device.clone(),
            input_format: self.encoder.input_format.clone(),
            output_root: self.recordings_path(),
            resolution: self.resolution()?,
            segment_duration: Duration::from_secs(self.encoder.segment_seconds),
            codec: self.encoder.codec.clone(),
            container: self.encoder.container.clone(),
            overlay: self.encoder.timestamp_overlay.then(|| TimestampOverlay {
                font_file: self.encoder.overlay_font.clone(),
                font_size: self.encoder.overlay_font_size,
            }),
        })
    }

    /// Renderer tuning from the display section.
    pub fn renderer_options(&self) -> RendererOptions {
        RendererOptions {
            font: self.display.font.into(),
            indicator: IndicatorStyle {
                recording: self.display.recording_indicator.into(),
                idle: self.display.idle_indicator.into(),
            },
            full_refresh_on_transition: self.display.full_refresh_on_transition,
        }
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "fieldcam", "Fieldcam").ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get config directory".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn create_default(config_path: &Path) -> AppResult<Self> {
        let config = Config::default();

        if let Some(parent) = config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        config.save_to(config_path)?;

        warn!(
            root_path = ?config.storage.root_path,
            device = %config.encoder.device,
            "Default config created. Check the storage root and capture device."
        );

        Ok(config)
    }
}
