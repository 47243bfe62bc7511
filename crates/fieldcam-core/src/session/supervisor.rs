use crate::{
    CoreError, CoreResult,
    session::{
        EncoderInvocation, EncoderLauncher, ProcessLauncher, SessionConfig, SessionHandle,
        SessionSnapshot, SupervisorState, segment_template, session_directory_name, time_prefix,
    },
};

use std::{panic::Location, process::ExitStatus, time::Duration};

use chrono::Local;
use error_location::ErrorLocation;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    process::{Child, ChildStderr},
    sync::{Mutex, watch},
    task::JoinHandle,
    time::Instant,
};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// How long the stderr forwarder may take to drain after the encoder exits.
const STDERR_DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

struct RecordingSession {
    handle: SessionHandle,
    child: Child,
    stderr_task: Option<JoinHandle<()>>,
}

/// Owns the encoder child process and the single recording session.
///
/// # Thread Safety
///
/// Start, stop and the liveness poll serialize on one async mutex. Observers
/// (the status loop) read the published [`SessionSnapshot`] and never touch
/// the session itself. The liveness poll never waits for the mutex: while a
/// start or stop is in progress it reports the published state instead.
pub struct EncoderSupervisor<L = ProcessLauncher> {
    launcher: L,
    stop_timeout: Duration,
    session: Mutex<Option<RecordingSession>>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl EncoderSupervisor<ProcessLauncher> {
    /// Supervisor that launches the configured encoder program directly.
    pub fn new(stop_timeout: Duration) -> Self {
        Self::with_launcher(ProcessLauncher, stop_timeout)
    }
}

impl<L: EncoderLauncher> EncoderSupervisor<L> {
    /// Supervisor using a custom launcher.
    ///
    /// `stop_timeout` bounds the wait for a graceful exit before the encoder
    /// is killed.
    pub fn with_launcher(launcher: L, stop_timeout: Duration) -> Self {
        let (snapshot_tx, _) = watch::channel(SessionSnapshot::IDLE);
        Self {
            launcher,
            stop_timeout,
            session: Mutex::new(None),
            snapshot_tx,
        }
    }

    /// Launcher used for new sessions.
    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SupervisorState {
        self.snapshot_tx.borrow().state
    }

    /// True while a session is `Active`.
    pub fn is_active(&self) -> bool {
        self.snapshot_tx.borrow().is_recording()
    }

    /// Recording time of the active session, zero while idle.
    pub fn elapsed(&self) -> Duration {
        self.snapshot_tx.borrow().elapsed_at(Instant::now())
    }

    /// Create the session directory and launch the encoder.
    ///
    /// # Errors
    ///
    /// - [`CoreError::AlreadyActive`] if a session is running; it is left
    ///   untouched.
    /// - [`CoreError::EncoderSpawn`] if the directory cannot be created or
    ///   the process cannot be launched. The supervisor is `Idle` again and
    ///   the call may be retried.
    #[instrument(skip(self, config), fields(device = %config.device))]
    pub async fn start(&self, config: &SessionConfig) -> CoreResult<SessionHandle> {
        let location = Location::caller();
        let mut session = self.session.lock().await;

        if let Some(active) = session.as_ref() {
            warn!(
                session_id = %active.handle.session_id,
                "Start requested while a session is active, ignoring"
            );
            return Err(CoreError::AlreadyActive {
                session_id: active.handle.session_id,
                location: ErrorLocation::from(location),
            });
        }

        self.publish(SupervisorState::Starting, None);

        let session_id = Uuid::new_v4();
        let wall_clock = Local::now();
        let directory = config
            .output_root
            .join(session_directory_name(&wall_clock));

        if let Err(e) = std::fs::create_dir_all(&directory) {
            return Err(self.fail(CoreError::EncoderSpawn {
                reason: format!("Failed to create session directory {:?}: {}", directory, e),
                location: ErrorLocation::from(location),
            }));
        }

        let segment_template = directory.join(segment_template(
            &time_prefix(&wall_clock),
            &config.container,
        ));
        let invocation = EncoderInvocation::new(config, &segment_template);

        let mut child = match self.launcher.launch(&invocation) {
            Ok(child) => child,
            Err(e) => {
                return Err(self.fail(CoreError::EncoderSpawn {
                    reason: format!("Failed to launch {:?}: {}", invocation.program(), e),
                    location: ErrorLocation::from(location),
                }));
            }
        };

        let stderr_task = child
            .stderr
            .take()
            .map(|stderr| forward_stderr(session_id, stderr));

        let handle = SessionHandle {
            session_id,
            directory,
            segment_template,
            started_at: Instant::now(),
        };

        *session = Some(RecordingSession {
            handle: handle.clone(),
            child,
            stderr_task,
        });
        self.publish(SupervisorState::Active, Some(handle.clone()));

        info!(
            session_id = %session_id,
            directory = ?handle.directory,
            segment_seconds = config.segment_duration.as_secs(),
            "Recording started"
        );

        Ok(handle)
    }

    /// Stop the active session, if any.
    ///
    /// Asks the encoder to exit, waits up to the stop timeout, then kills it.
    /// Calling this while idle, or after the encoder already exited, is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EncoderStop`] if the process could not be
    /// signalled or reaped. The supervisor is `Idle` regardless.
    #[instrument(skip(self))]
    pub async fn stop(&self) -> CoreResult<()> {
        let location = Location::caller();
        let mut session = self.session.lock().await;

        let Some(mut recording) = session.take() else {
            debug!("Stop requested while idle");
            return Ok(());
        };

        let session_id = recording.handle.session_id;
        let duration = recording.handle.started_at.elapsed();
        self.publish(SupervisorState::Stopping, Some(recording.handle.clone()));

        let result = terminate(&mut recording.child, self.stop_timeout, location).await;

        if let Some(task) = recording.stderr_task.take()
            && tokio::time::timeout(STDERR_DRAIN_TIMEOUT, task).await.is_err()
        {
            debug!(session_id = %session_id, "Encoder stderr forwarder still running, detached");
        }

        self.publish(SupervisorState::Idle, None);

        match &result {
            Ok(status) => info!(
                session_id = %session_id,
                duration_ms = duration.as_millis(),
                %status,
                "Recording stopped"
            ),
            Err(e) => error!(session_id = %session_id, error = %e, "Recording stop failed"),
        }

        result.map(|_| ())
    }

    /// Poll the encoder. Returns whether a session is still recording.
    ///
    /// An encoder that exited on its own closes the session: the exit is
    /// logged and the supervisor goes back to `Idle`.
    #[instrument(skip(self))]
    pub async fn is_alive(&self) -> bool {
        let Ok(mut session) = self.session.try_lock() else {
            return self.is_active();
        };

        let Some(recording) = session.as_mut() else {
            return false;
        };

        match recording.child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                let session_id = recording.handle.session_id;
                let exited = CoreError::EncoderExitedUnexpectedly {
                    status: status.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                };
                warn!(session_id = %session_id, error = %exited, "Encoder exited, session closed");

                *session = None;
                self.publish(SupervisorState::Idle, None);
                false
            }
            Err(e) => {
                warn!(error = %e, "Failed to poll encoder liveness");
                true
            }
        }
    }

    fn publish(&self, state: SupervisorState, session: Option<SessionHandle>) {
        debug!(%state, "Supervisor transition");
        self.snapshot_tx.send_replace(SessionSnapshot { state, session });
    }

    fn fail(&self, error: CoreError) -> CoreError {
        error!(error = %error, "Recording start failed");
        self.publish(SupervisorState::Failed, None);
        self.publish(SupervisorState::Idle, None);
        error
    }
}

async fn terminate(
    child: &mut Child,
    timeout: Duration,
    location: &'static Location<'static>,
) -> CoreResult<ExitStatus> {
    let stop_error = |reason: String| CoreError::EncoderStop {
        reason,
        location: ErrorLocation::from(location),
    };

    if let Some(status) = child
        .try_wait()
        .map_err(|e| stop_error(format!("Failed to poll encoder: {}", e)))?
    {
        debug!(%status, "Encoder had already exited");
        return Ok(status);
    }

    request_exit(child);

    match tokio::time::timeout(timeout, child.wait()).await {
        Ok(Ok(status)) => Ok(status),
        Ok(Err(e)) => Err(stop_error(format!("Failed to wait for encoder: {}", e))),
        Err(_) => {
            warn!(
                timeout_ms = timeout.as_millis(),
                "Encoder did not exit in time, killing"
            );
            child
                .kill()
                .await
                .map_err(|e| stop_error(format!("Failed to kill encoder: {}", e)))?;
            child
                .wait()
                .await
                .map_err(|e| stop_error(format!("Failed to reap encoder: {}", e)))
        }
    }
}

/// SIGTERM lets the encoder finalize the segment it is writing.
#[cfg(unix)]
fn request_exit(child: &mut Child) {
    let Some(pid) = child.id() else {
        return;
    };
    // SAFETY: plain kill(2) on a child we own and have not reaped.
    let rc = unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) };
    if rc != 0 {
        warn!(pid, error = %std::io::Error::last_os_error(), "Failed to send SIGTERM");
    }
}

#[cfg(not(unix))]
fn request_exit(child: &mut Child) {
    if let Err(e) = child.start_kill() {
        warn!(error = %e, "Failed to request encoder exit");
    }
}

fn forward_stderr(session_id: Uuid, stderr: ChildStderr) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(stderr).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => debug!(session_id = %session_id, "encoder: {}", line),
                Ok(None) => break,
                Err(e) => {
                    warn!(session_id = %session_id, error = %e, "Encoder stderr unreadable");
                    break;
                }
            }
        }
    })
}
