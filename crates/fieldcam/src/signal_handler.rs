//! Operator commands delivered as unix signals.
//!
//! The recorder has no keyboard: a GPIO button daemon (or an operator over
//! ssh) talks to it with `kill`. `SIGUSR1` toggles recording, `SIGUSR2`
//! stops it, `SIGINT` and `SIGTERM` shut the recorder down.

use crate::{AppCommand, AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::sync::{mpsc, watch};
use tracing::{info, instrument};
use uuid::Uuid;

/// Operator signal that maps to an [`AppCommand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorSignal {
    /// `SIGUSR1`.
    Toggle,
    /// `SIGUSR2`.
    Stop,
    /// `SIGINT` or `SIGTERM`.
    Terminate,
}

impl OperatorSignal {
    /// Command issued for this signal.
    pub fn command(self) -> AppCommand {
        let request_id = Uuid::new_v4();
        match self {
            OperatorSignal::Toggle => AppCommand::ToggleRecording { request_id },
            OperatorSignal::Stop => AppCommand::StopRecording { request_id },
            OperatorSignal::Terminate => AppCommand::Shutdown,
        }
    }
}

/// Translates operator signals into application commands.
pub struct SignalHandler {
    command_tx: mpsc::Sender<AppCommand>,
}

impl SignalHandler {
    /// Create a handler that forwards commands to `command_tx`.
    pub fn new(command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self { command_tx }
    }

    /// Run the signal handler event loop.
    ///
    /// This method returns when a shutdown signal is received on
    /// `shutdown_rx`, or after forwarding a terminate request.
    ///
    /// # Errors
    ///
    /// - [`AppError::SignalError`] if a handler cannot be installed.
    /// - [`AppError::ChannelSendFailed`] if the application stopped listening.
    #[cfg(unix)]
    #[instrument(skip_all)]
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        use tokio::signal::unix::SignalKind;

        let mut toggle = install(SignalKind::user_defined1(), "SIGUSR1")?;
        let mut stop = install(SignalKind::user_defined2(), "SIGUSR2")?;
        let mut interrupt = install(SignalKind::interrupt(), "SIGINT")?;
        let mut terminate = install(SignalKind::terminate(), "SIGTERM")?;

        info!("Listening for SIGUSR1 (toggle), SIGUSR2 (stop), SIGINT/SIGTERM (shutdown)");

        loop {
            let received = tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Signal handler shutting down");
                    break;
                }
                Some(()) = toggle.recv() => OperatorSignal::Toggle,
                Some(()) = stop.recv() => OperatorSignal::Stop,
                Some(()) = interrupt.recv() => OperatorSignal::Terminate,
                Some(()) = terminate.recv() => OperatorSignal::Terminate,
            };

            self.forward(received).await?;

            if received == OperatorSignal::Terminate {
                break;
            }
        }

        Ok(())
    }

    /// Ctrl-C is the only operator signal off unix.
    #[cfg(not(unix))]
    #[instrument(skip_all)]
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        tokio::select! {
            _ = shutdown_rx.changed() => {
                info!("Signal handler shutting down");
                Ok(())
            }
            result = tokio::signal::ctrl_c() => {
                result.map_err(|e| AppError::SignalError {
                    reason: format!("Failed to listen for Ctrl-C: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
                self.forward(OperatorSignal::Terminate).await
            }
        }
    }

    /// Send the command for `received`.
    #[instrument(skip(self))]
    pub async fn forward(&self, received: OperatorSignal) -> AppResult<()> {
        let command = received.command();
        info!(?command, "Operator command received");

        self.command_tx
            .send(command)
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send {:?}: {}", received, e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

#[cfg(unix)]
#[track_caller]
fn install(
    kind: tokio::signal::unix::SignalKind,
    name: &'static str,
) -> AppResult<tokio::signal::unix::Signal> {
    tokio::signal::unix::signal(kind).map_err(|e| AppError::SignalError {
        reason: format!("Failed to install {} handler: {}", name, e),
        location: ErrorLocation::from(Location::caller()),
    })
}
