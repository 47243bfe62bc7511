use error_location::ErrorLocation;
use thiserror::Error;

/// Recorder core errors with source location tracking.
///
/// Only [`CoreError::DisplayInit`] is fatal. Every other variant is absorbed
/// by the component that raised it and surfaces as degraded state or a log
/// record.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Display capability failed to initialize or clear.
    #[error("Display initialization failed: {reason} {location}")]
    DisplayInit {
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Pushing a frame to the display failed.
    #[error("Display push failed: {reason} {location}")]
    DisplayPush {
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A recording session is already active.
    #[error("Recording session {session_id} already active {location}")]
    AlreadyActive {
        /// ID of the session that is still running.
        session_id: uuid::Uuid,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Encoder process could not be launched.
    #[error("Encoder spawn failed: {reason} {location}")]
    EncoderSpawn {
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Encoder process exited while the session was active.
    #[error("Encoder exited unexpectedly ({status}) {location}")]
    EncoderExitedUnexpectedly {
        /// Exit status reported by the operating system.
        status: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Encoder process could not be terminated or reaped.
    #[error("Encoder stop failed: {reason} {location}")]
    EncoderStop {
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Storage usage could not be read.
    #[error("Storage read failed for {path:?}: {reason} {location}")]
    StorageRead {
        /// Path that was probed.
        path: std::path::PathBuf,
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// IO error from filesystem operations.
    #[error("IO error: {source} {location}")]
    Io {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl From<std::io::Error> for CoreError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        CoreError::Io {
            source,
            location: ErrorLocation::from(std::panic::Location::caller()),
        }
    }
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
