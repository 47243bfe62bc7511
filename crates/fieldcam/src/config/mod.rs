mod behaviour_config;
#[allow(clippy::module_inception)]
mod config;
pub(crate) mod display_config;
mod encoder_config;
mod storage_config;

pub(crate) use {
    behaviour_config::BehaviourConfig,
    config::Config,
    display_config::DisplayConfig,
    encoder_config::EncoderConfig,
    storage_config::StorageConfig,
};

use std::path::PathBuf;

pub(crate) const DEFAULT_ROOT_PATH: &str = "/home/pi";
pub(crate) const DEFAULT_RECORDINGS_DIR: &str = "recordings";

pub(crate) const DEFAULT_ENCODER_PROGRAM: &str = "ffmpeg";
pub(crate) const DEFAULT_DEVICE: &str = "/dev/video0";
pub(crate) const DEFAULT_RESOLUTION: &str = "1280x720";
pub(crate) const DEFAULT_SEGMENT_SECONDS: u64 = 300;
pub(crate) const DEFAULT_CONTAINER: &str = "mp4";
pub(crate) const DEFAULT_CODEC: &str = "libx264";
pub(crate) const DEFAULT_TIMESTAMP_OVERLAY: bool = true;
pub(crate) const DEFAULT_OVERLAY_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";
pub(crate) const DEFAULT_OVERLAY_FONT_SIZE: u32 = 24;
pub(crate) const DEFAULT_STOP_TIMEOUT_SECS: u64 = 10;

pub(crate) const DEFAULT_FRAME_PATH: &str = "/run/fieldcam/status.pbm";
pub(crate) const DEFAULT_PANEL_WIDTH: u32 = 250;
pub(crate) const DEFAULT_PANEL_HEIGHT: u32 = 122;
pub(crate) const DEFAULT_TICK_MILLIS: u64 = 1000;
pub(crate) const DEFAULT_FULL_REFRESH_ON_TRANSITION: bool = true;

pub(crate) const DEFAULT_AUTOSTART: bool = false;

pub(crate) fn default_root_path() -> PathBuf {
    PathBuf::from(DEFAULT_ROOT_PATH)
}

pub(crate) fn default_recordings_dir() -> String {
    DEFAULT_RECORDINGS_DIR.to_string()
}

pub(crate) fn default_encoder_program() -> PathBuf {
    PathBuf::from(DEFAULT_ENCODER_PROGRAM)
}

pub(crate) fn default_device() -> String {
    DEFAULT_DEVICE.to_string()
}

pub(crate) fn default_resolution() -> String {
    DEFAULT_RESOLUTION.to_string()
}

pub(crate) fn default_segment_seconds() -> u64 {
    DEFAULT_SEGMENT_SECONDS
}

pub(crate) fn default_container() -> String {
    DEFAULT_CONTAINER.to_string()
}

pub(crate) fn default_codec() -> String {
    DEFAULT_CODEC.to_string()
}

pub(crate) fn default_timestamp_overlay() -> bool {
    DEFAULT_TIMESTAMP_OVERLAY
}

pub(crate) fn default_overlay_font() -> PathBuf {
    PathBuf::from(DEFAULT_OVERLAY_FONT)
}

pub(crate) fn default_overlay_font_size() -> u32 {
    DEFAULT_OVERLAY_FONT_SIZE
}

pub(crate) fn default_stop_timeout_secs() -> u64 {
    DEFAULT_STOP_TIMEOUT_SECS
}

pub(crate) fn default_frame_path() -> PathBuf {
    PathBuf::from(DEFAULT_FRAME_PATH)
}

pub(crate) fn default_panel_width() -> u32 {
    DEFAULT_PANEL_WIDTH
}

pub(crate) fn default_panel_height() -> u32 {
    DEFAULT_PANEL_HEIGHT
}

pub(crate) fn default_tick_millis() -> u64 {
    DEFAULT_TICK_MILLIS
}

pub(crate) fn default_full_refresh_on_transition() -> bool {
    DEFAULT_FULL_REFRESH_ON_TRANSITION
}

pub(crate) fn default_autostart() -> bool {
    DEFAULT_AUTOSTART
}
