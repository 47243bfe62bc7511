use std::{fmt, path::PathBuf, time::Duration};

use tokio::time::Instant;
use uuid::Uuid;

/// Lifecycle of the encoder supervisor.
///
/// `Idle -> Starting -> Active -> Stopping -> Idle`. A failed start passes
/// through `Failed` and lands back on `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    /// No encoder running.
    Idle,
    /// Session directory and encoder are being set up.
    Starting,
    /// Encoder running, segments being written.
    Active,
    /// Encoder asked to exit.
    Stopping,
    /// Last start attempt failed.
    Failed,
}

impl fmt::Display for SupervisorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SupervisorState::Idle => "idle",
            SupervisorState::Starting => "starting",
            SupervisorState::Active => "active",
            SupervisorState::Stopping => "stopping",
            SupervisorState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Public facts about a running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    /// Unique session ID for log correlation.
    pub session_id: Uuid,
    /// Dated directory receiving the segments.
    pub directory: PathBuf,
    /// Output path template handed to the encoder.
    pub segment_template: PathBuf,
    /// When the encoder was launched.
    pub started_at: Instant,
}

/// Read-only view published to observers on every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Current lifecycle state.
    pub state: SupervisorState,
    /// Session being started, recorded or stopped.
    pub session: Option<SessionHandle>,
}

impl SessionSnapshot {
    pub(crate) const IDLE: Self = Self {
        state: SupervisorState::Idle,
        session: None,
    };

    /// True while the encoder is `Active`.
    pub fn is_recording(&self) -> bool {
        self.state == SupervisorState::Active
    }

    /// `now - started_at` while active, zero otherwise.
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        match (&self.session, self.state) {
            (Some(session), SupervisorState::Active) => {
                now.saturating_duration_since(session.started_at)
            }
            _ => Duration::ZERO,
        }
    }
}
