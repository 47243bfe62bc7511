//! Virtual panel that writes every pushed frame to a PBM file.
//!
//! Lets the status screen run on a desktop or a headless board without a
//! panel attached. Point any image viewer at the file to watch it update.

use crate::{
    CoreError, CoreResult,
    display::{DirtyRegion, DisplayDriver, FrameBuffer, RefreshMode},
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use embedded_graphics::prelude::Size;
use error_location::ErrorLocation;
use tracing::{debug, info, instrument};

/// Push counters, split by refresh mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshStats {
    /// Pushes performed in [`RefreshMode::Full`].
    pub full: u64,
    /// Pushes performed in [`RefreshMode::Partial`].
    pub partial: u64,
}

/// [`DisplayDriver`] backed by a binary (P4) portable bitmap on disk.
#[derive(Debug)]
pub struct PbmDisplay {
    path: PathBuf,
    size: Size,
    mode: Option<RefreshMode>,
    asleep: bool,
    stats: RefreshStats,
}

impl PbmDisplay {
    /// Virtual panel of `size` writing to `path`. Nothing is touched on disk
    /// until [`DisplayDriver::init`].
    pub fn new<P: AsRef<Path>>(path: P, size: Size) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            size,
            mode: None,
            asleep: false,
            stats: RefreshStats::default(),
        }
    }

    /// File the frames are written to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Refresh counters since construction.
    pub fn stats(&self) -> RefreshStats {
        self.stats
    }

    /// Currently selected refresh mode, `None` before init.
    pub fn mode(&self) -> Option<RefreshMode> {
        self.mode
    }

    /// Whether [`DisplayDriver::sleep`] was called after the last init.
    pub fn is_asleep(&self) -> bool {
        self.asleep
    }

    fn write_frame(&self, frame: &FrameBuffer) -> std::io::Result<()> {
        // PBM stores ink as 1, the frame buffer stores paper as 1.
        let mut contents = format!("P4\n{} {}\n", self.size.width, self.size.height).into_bytes();
        contents.extend(frame.as_bytes().iter().map(|byte| !byte));

        // Write to a sibling file then rename so viewers never see a torn frame.
        let temp_path = self.path.with_extension("pbm.tmp");
        let mut temp_file = fs::File::create(&temp_path)?;
        temp_file.write_all(&contents)?;
        temp_file.sync_all()?;
        drop(temp_file);
        fs::rename(&temp_path, &self.path)
    }
}

impl DisplayDriver for PbmDisplay {
    fn size(&self) -> Size {
        self.size
    }

    #[track_caller]
    #[instrument(skip(self), fields(path = ?self.path))]
    fn init(&mut self, mode: RefreshMode) -> CoreResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| CoreError::DisplayInit {
                reason: format!("Failed to create frame directory {:?}: {}", parent, e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        }

        self.mode = Some(mode);
        self.asleep = false;
        debug!(?mode, "Virtual panel initialized");

        Ok(())
    }

    #[track_caller]
    fn clear(&mut self) -> CoreResult<()> {
        if self.mode.is_none() {
            return Err(CoreError::DisplayInit {
                reason: "clear before init".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.write_frame(&FrameBuffer::new(self.size))
            .map_err(|e| CoreError::DisplayInit {
                reason: format!("Failed to write blank frame to {:?}: {}", self.path, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(path = ?self.path, "Virtual panel cleared");

        Ok(())
    }

    #[track_caller]
    fn render(&mut self, frame: &FrameBuffer, region: Option<DirtyRegion>) -> CoreResult<()> {
        let Some(mode) = self.mode else {
            return Err(CoreError::DisplayPush {
                reason: "render before init".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        if self.asleep {
            return Err(CoreError::DisplayPush {
                reason: "render while asleep".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.write_frame(frame).map_err(|e| CoreError::DisplayPush {
            reason: format!("Failed to write frame to {:?}: {}", self.path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        match mode {
            RefreshMode::Full => self.stats.full += 1,
            RefreshMode::Partial => self.stats.partial += 1,
        }

        debug!(?mode, ?region, "Frame written");

        Ok(())
    }

    fn sleep(&mut self) -> CoreResult<()> {
        self.asleep = true;
        info!("Virtual panel sleeping");
        Ok(())
    }
}
