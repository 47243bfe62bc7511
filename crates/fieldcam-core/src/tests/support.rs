//! Test doubles for the display, storage and encoder seams.

use crate::{
    CoreError, CoreResult, DirtyRegion, DisplayDriver, FrameBuffer, Percent, RefreshMode,
    session::{EncoderInvocation, EncoderLauncher, Resolution, SessionConfig},
    storage::{StorageProbe, StorageReading},
};

use std::{
    panic::Location,
    path::{Path, PathBuf},
    process::Stdio,
    sync::Mutex,
    time::Duration,
};

use embedded_graphics::prelude::Size;
use error_location::ErrorLocation;
use tokio::process::{Child, Command};

pub(crate) const PANEL: Size = Size::new(250, 122);

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DisplayCall {
    Init(RefreshMode),
    Clear,
    Render(Option<DirtyRegion>),
    Sleep,
}

/// Driver that records every call and can be told to fail.
pub(crate) struct RecordingDisplay {
    size: Size,
    pub(crate) calls: Vec<DisplayCall>,
    pub(crate) failing_renders: usize,
    pub(crate) fail_init: bool,
    pub(crate) last_frame: Option<FrameBuffer>,
}

impl RecordingDisplay {
    pub(crate) fn new() -> Self {
        Self::with_size(PANEL)
    }

    pub(crate) fn with_size(size: Size) -> Self {
        Self {
            size,
            calls: Vec::new(),
            failing_renders: 0,
            fail_init: false,
            last_frame: None,
        }
    }

    pub(crate) fn failing_init() -> Self {
        Self {
            fail_init: true,
            ..Self::new()
        }
    }

    pub(crate) fn renders(&self) -> Vec<Option<DirtyRegion>> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DisplayCall::Render(region) => Some(*region),
                _ => None,
            })
            .collect()
    }
}

impl DisplayDriver for RecordingDisplay {
    fn size(&self) -> Size {
        self.size
    }

    fn init(&mut self, mode: RefreshMode) -> CoreResult<()> {
        if self.fail_init {
            return Err(CoreError::DisplayInit {
                reason: "controller not responding".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.calls.push(DisplayCall::Init(mode));
        Ok(())
    }

    fn clear(&mut self) -> CoreResult<()> {
        self.calls.push(DisplayCall::Clear);
        Ok(())
    }

    fn render(&mut self, frame: &FrameBuffer, region: Option<DirtyRegion>) -> CoreResult<()> {
        if self.failing_renders > 0 {
            self.failing_renders -= 1;
            return Err(CoreError::DisplayPush {
                reason: "bus timeout".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.calls.push(DisplayCall::Render(region));
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn sleep(&mut self) -> CoreResult<()> {
        self.calls.push(DisplayCall::Sleep);
        Ok(())
    }
}

/// Probe returning whatever the test last set.
pub(crate) struct FixedProbe {
    reading: Mutex<StorageReading>,
}

impl FixedProbe {
    pub(crate) fn new(percent: u8) -> Self {
        Self {
            reading: Mutex::new(StorageReading {
                percent: Percent::saturating(percent),
                degraded: false,
            }),
        }
    }

    #[allow(clippy::unwrap_used)]
    pub(crate) fn set(&self, percent: u8) {
        self.reading.lock().unwrap().percent = Percent::saturating(percent);
    }
}

impl StorageProbe for FixedProbe {
    #[allow(clippy::unwrap_used)]
    fn percent_used(&self) -> StorageReading {
        *self.reading.lock().unwrap()
    }
}

/// Launches `sh -c <script>` instead of the encoder, keeping the invocation
/// it was given.
pub(crate) struct ShellLauncher {
    script: String,
    launched: Mutex<Vec<EncoderInvocation>>,
}

impl ShellLauncher {
    pub(crate) fn new(script: &str) -> Self {
        Self {
            script: script.to_string(),
            launched: Mutex::new(Vec::new()),
        }
    }

    /// Runs until signalled.
    pub(crate) fn long_running() -> Self {
        Self::new("exec sleep 30")
    }

    #[allow(clippy::unwrap_used)]
    pub(crate) fn launched(&self) -> Vec<EncoderInvocation> {
        self.launched.lock().unwrap().clone()
    }
}

impl EncoderLauncher for ShellLauncher {
    #[allow(clippy::unwrap_used)]
    fn launch(&self, invocation: &EncoderInvocation) -> std::io::Result<Child> {
        self.launched.lock().unwrap().push(invocation.clone());
        Command::new("sh")
            .arg("-c")
            .arg(&self.script)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
    }
}

/// Launcher whose program never exists.
pub(crate) struct MissingProgramLauncher;

impl EncoderLauncher for MissingProgramLauncher {
    fn launch(&self, invocation: &EncoderInvocation) -> std::io::Result<Child> {
        Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{:?} not found", invocation.program()),
        ))
    }
}

pub(crate) fn session_config(output_root: &Path) -> SessionConfig {
    SessionConfig {
        program: PathBuf::from("ffmpeg"),
        device: "/dev/video0".to_string(),
        input_format: Some("v4l2".to_string()),
        output_root: output_root.to_path_buf(),
        resolution: Resolution {
            width: 1280,
            height: 720,
        },
        segment_duration: Duration::from_secs(30),
        codec: "libx264".to_string(),
        container: "mp4".to_string(),
        overlay: None,
    }
}
