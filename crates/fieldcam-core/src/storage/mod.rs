//! Used-capacity probe for the recording volume.
//!
//! A failed read never reaches the render loop: it is logged and reported
//! as a degraded reading of 0%.

use crate::{CoreError, CoreResult, Percent};

use std::{
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use tracing::{instrument, trace, warn};

/// One storage sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageReading {
    /// Used capacity. `0%` when degraded.
    pub percent: Percent,
    /// True when the volume could not be read.
    pub degraded: bool,
}

impl StorageReading {
    /// Safe fallback reported when the probe fails.
    pub const DEGRADED: Self = Self {
        percent: Percent::ZERO,
        degraded: true,
    };
}

/// Source of storage readings.
pub trait StorageProbe: Send + Sync {
    /// Current used capacity. Never fails.
    fn percent_used(&self) -> StorageReading;
}

/// Probe of the filesystem holding a path.
#[derive(Debug, Clone)]
pub struct VolumeProbe {
    path: PathBuf,
}

impl VolumeProbe {
    /// Probe the volume that holds `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Probed path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Used capacity, or the reason it could not be read.
    ///
    /// Uses the same arithmetic as `df`: blocks reserved for root count as
    /// neither used nor available.
    #[track_caller]
    pub fn read(&self) -> CoreResult<Percent> {
        let usage = volume_usage(&self.path).map_err(|reason| CoreError::StorageRead {
            path: self.path.clone(),
            reason,
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Percent::from_ratio(
            usage.used,
            usage.used.saturating_add(usage.available),
        ))
    }
}

impl StorageProbe for VolumeProbe {
    #[instrument(skip(self), fields(path = ?self.path))]
    fn percent_used(&self) -> StorageReading {
        match self.read() {
            Ok(percent) => {
                trace!(%percent, "Storage probed");
                StorageReading {
                    percent,
                    degraded: false,
                }
            }
            Err(e) => {
                warn!(error = %e, "Storage probe degraded, reporting 0%");
                StorageReading::DEGRADED
            }
        }
    }
}

struct VolumeUsage {
    used: u64,
    available: u64,
}

#[cfg(unix)]
#[allow(clippy::unnecessary_cast)]
fn volume_usage(path: &Path) -> Result<VolumeUsage, String> {
    use std::{ffi::CString, os::unix::ffi::OsStrExt};

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| "path contains an interior NUL byte".to_string())?;

    // SAFETY: zeroed statvfs is a valid out-parameter, c_path is NUL terminated.
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if rc != 0 {
        return Err(std::io::Error::last_os_error().to_string());
    }

    let fragment = stat.f_frsize as u64;
    let total = (stat.f_blocks as u64).saturating_mul(fragment);
    if total == 0 {
        return Err("volume reports zero capacity".to_string());
    }
    let free = (stat.f_bfree as u64).saturating_mul(fragment);
    let available = (stat.f_bavail as u64).saturating_mul(fragment);

    Ok(VolumeUsage {
        used: total.saturating_sub(free),
        available,
    })
}

#[cfg(not(unix))]
fn volume_usage(_path: &Path) -> Result<VolumeUsage, String> {
    Err("storage probing is only supported on unix".to_string())
}
