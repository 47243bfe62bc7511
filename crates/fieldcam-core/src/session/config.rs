use std::{fmt, path::PathBuf, time::Duration};

/// Encoder output frame size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Parse `WIDTHxHEIGHT`, e.g. `1280x720`.
    pub fn parse(value: &str) -> Option<Self> {
        let (width, height) = value.trim().split_once(['x', 'X'])?;
        let width = width.parse::<u32>().ok().filter(|w| *w > 0)?;
        let height = height.parse::<u32>().ok().filter(|h| *h > 0)?;
        Some(Self { width, height })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Wall-clock timestamp burned into every frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampOverlay {
    /// TrueType font used by the encoder.
    pub font_file: PathBuf,
    /// Glyph size in pixels.
    pub font_size: u32,
}

/// Everything the supervisor needs to launch one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Encoder executable.
    pub program: PathBuf,
    /// Capture device, e.g. `/dev/video0`.
    pub device: String,
    /// Demuxer forced for the device (`v4l2`), `None` lets the encoder probe.
    pub input_format: Option<String>,
    /// Directory under which dated session directories are created.
    pub output_root: PathBuf,
    /// Output frame size.
    pub resolution: Resolution,
    /// Segment length. A crash loses at most one segment.
    pub segment_duration: Duration,
    /// Video codec.
    pub codec: String,
    /// Container extension of segment files.
    pub container: String,
    /// Optional timestamp overlay.
    pub overlay: Option<TimestampOverlay>,
}
