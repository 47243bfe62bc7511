use crate::config::{
    default_codec, default_container, default_device, default_encoder_program,
    default_overlay_font, default_overlay_font_size, default_resolution, default_segment_seconds,
    default_stop_timeout_secs, default_timestamp_overlay,
};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Encoder process configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Encoder executable.
    #[serde(default = "default_encoder_program")]
    pub program: PathBuf,
    /// Capture device.
    #[serde(default = "default_device")]
    pub device: String,
    /// Demuxer forced for the device (e.g. `v4l2`), unset lets the encoder probe.
    #[serde(default)]
    pub input_format: Option<String>,
    /// Output frame size, `WIDTHxHEIGHT`.
    #[serde(default = "default_resolution")]
    pub resolution: String,
    /// Length of each segment file.
    #[serde(default = "default_segment_seconds")]
    pub segment_seconds: u64,
    /// Container extension of segment files.
    #[serde(default = "default_container")]
    pub container: String,
    /// Video codec.
    #[serde(default = "default_codec")]
    pub codec: String,
    /// Burn the wall-clock time into every frame.
    #[serde(default = "default_timestamp_overlay")]
    pub timestamp_overlay: bool,
    /// TrueType font for the timestamp overlay.
    #[serde(default = "default_overlay_font")]
    pub overlay_font: PathBuf,
    /// Overlay glyph size in pixels.
    #[serde(default = "default_overlay_font_size")]
    pub overlay_font_size: u32,
    /// Grace period for the encoder to exit before it is killed.
    #[serde(default = "default_stop_timeout_secs")]
    pub stop_timeout_secs: u64,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            program: default_encoder_program(),
            device: default_device(),
            input_format: None,
            resolution: default_resolution(),
            segment_seconds: default_segment_seconds(),
            container: default_container(),
            codec: default_codec(),
            timestamp_overlay: default_timestamp_overlay(),
            overlay_font: default_overlay_font(),
            overlay_font_size: default_overlay_font_size(),
            stop_timeout_secs: default_stop_timeout_secs(),
        }
    }
}
