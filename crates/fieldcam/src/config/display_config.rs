use crate::config::{
    default_frame_path, default_full_refresh_on_transition, default_panel_height,
    default_panel_width, default_tick_millis,
};

use fieldcam_core::render::{IndicatorVariant, StatusFont};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Indicator glyph as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorSetting {
    /// Steady ring with a filled centre.
    SolidRing,
    /// Ring whose centre blinks.
    PulsingRing,
    /// Blinking crosshair.
    Crosshair,
    /// Empty box.
    Blank,
}

impl From<IndicatorSetting> for IndicatorVariant {
    fn from(setting: IndicatorSetting) -> Self {
        match setting {
            IndicatorSetting::SolidRing => IndicatorVariant::SolidRing,
            IndicatorSetting::PulsingRing => IndicatorVariant::PulsingRing,
            IndicatorSetting::Crosshair => IndicatorVariant::Crosshair,
            IndicatorSetting::Blank => IndicatorVariant::Blank,
        }
    }
}

/// Label font size as written in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSetting {
    /// 6x10 glyphs.
    Small,
    /// 7x14 glyphs.
    #[default]
    Regular,
    /// 9x15 glyphs.
    Large,
}

impl From<FontSetting> for StatusFont {
    fn from(setting: FontSetting) -> Self {
        match setting {
            FontSetting::Small => StatusFont::Small,
            FontSetting::Regular => StatusFont::Regular,
            FontSetting::Large => StatusFont::Large,
        }
    }
}

fn default_recording_indicator() -> IndicatorSetting {
    IndicatorSetting::SolidRing
}

fn default_idle_indicator() -> IndicatorSetting {
    IndicatorSetting::Crosshair
}

/// Status panel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// File the virtual panel writes frames to.
    #[serde(default = "default_frame_path")]
    pub frame_path: PathBuf,
    /// Panel width in pixels.
    #[serde(default = "default_panel_width")]
    pub width: u32,
    /// Panel height in pixels.
    #[serde(default = "default_panel_height")]
    pub height: u32,
    /// Status refresh period, 200 to 1000 ms.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
    /// Label font.
    #[serde(default)]
    pub font: FontSetting,
    /// Indicator shown while recording.
    #[serde(default = "default_recording_indicator")]
    pub recording_indicator: IndicatorSetting,
    /// Indicator shown while idle.
    #[serde(default = "default_idle_indicator")]
    pub idle_indicator: IndicatorSetting,
    /// Full refresh on the tick a session starts or stops.
    #[serde(default = "default_full_refresh_on_transition")]
    pub full_refresh_on_transition: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            frame_path: default_frame_path(),
            width: default_panel_width(),
            height: default_panel_height(),
            tick_millis: default_tick_millis(),
            font: FontSetting::default(),
            recording_indicator: default_recording_indicator(),
            idle_indicator: default_idle_indicator(),
            full_refresh_on_transition: default_full_refresh_on_transition(),
        }
    }
}
