use uuid::Uuid;

/// Commands sent from the signal handler to the main application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Start a new recording session.
    StartRecording {
        /// Correlates the request with the log records it produces.
        request_id: Uuid,
    },
    /// Stop the current recording session, if any.
    StopRecording {
        /// Correlates the request with the log records it produces.
        request_id: Uuid,
    },
    /// Start if idle, stop if recording.
    ToggleRecording {
        /// Correlates the request with the log records it produces.
        request_id: Uuid,
    },
    /// Request application shutdown.
    Shutdown,
}
