use crate::{AppCommand, AppResult};

use fieldcam_core::{
    CoreError, CoreResult, EncoderSupervisor, SessionConfig,
    session::{EncoderLauncher, ProcessLauncher},
};

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Wait for the status loop to clear the panel on shutdown.
const STATUS_LOOP_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Main application state.
///
/// Owns the command channel and applies each operator command to the
/// supervisor. The status loop runs separately and only observes the
/// supervisor.
pub struct App<L = ProcessLauncher> {
    pub(crate) supervisor: Arc<EncoderSupervisor<L>>,
    pub(crate) session_config: SessionConfig,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
    pub(crate) status_task: Option<JoinHandle<CoreResult<()>>>,
}

impl<L: EncoderLauncher + 'static> App<L> {
    /// Run the main application event loop.
    ///
    /// Returns after a [`AppCommand::Shutdown`] or when every command sender
    /// is gone. Any active session is stopped and the status loop is asked
    /// to clear the panel before returning.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Fieldcam starting");

        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    match cmd {
                        AppCommand::StartRecording { request_id } => {
                            self.start_recording(request_id).await;
                        }
                        AppCommand::StopRecording { request_id } => {
                            self.stop_recording(request_id).await;
                        }
                        AppCommand::ToggleRecording { request_id } => {
                            if self.supervisor.is_alive().await {
                                self.stop_recording(request_id).await;
                            } else {
                                self.start_recording(request_id).await;
                            }
                        }
                        AppCommand::Shutdown => {
                            info!("Shutdown requested");
                            break;
                        }
                    }
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        if let Err(e) = self.supervisor.stop().await {
            error!(error = ?e, "Failed to stop recording during shutdown");
        }

        let _ = self.shutdown_tx.send(true);

        if let Some(status_task) = self.status_task.take() {
            match tokio::time::timeout(STATUS_LOOP_SHUTDOWN_TIMEOUT, status_task).await {
                Ok(Ok(Ok(()))) => info!("Status display shut down cleanly"),
                Ok(Ok(Err(e))) => error!(error = ?e, "Status display shutdown failed"),
                Ok(Err(e)) => error!(error = ?e, "Status loop task panicked"),
                Err(_) => warn!("Status loop did not stop within timeout"),
            }
        }

        info!("Fieldcam shut down successfully");

        Ok(())
    }

    /// Start a recording session. Failures are logged, the recorder stays up.
    #[instrument(skip(self))]
    async fn start_recording(&self, request_id: Uuid) {
        match self.supervisor.start(&self.session_config).await {
            Ok(handle) => info!(
                request_id = %request_id,
                session_id = %handle.session_id,
                directory = ?handle.directory,
                "Recording session started"
            ),
            Err(CoreError::AlreadyActive { session_id, .. }) => warn!(
                request_id = %request_id,
                session_id = %session_id,
                "Recording already active"
            ),
            Err(e) => error!(request_id = %request_id, error = ?e, "Failed to start recording"),
        }
    }

    /// Stop the recording session, if any.
    #[instrument(skip(self))]
    async fn stop_recording(&self, request_id: Uuid) {
        if let Err(e) = self.supervisor.stop().await {
            error!(request_id = %request_id, error = ?e, "Failed to stop recording");
        }
    }
}
