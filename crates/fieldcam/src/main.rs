//! Fieldcam: segmenting video recorder with an e-paper status display.

mod app;
mod app_command;
mod config;
mod error;
mod logging;
mod signal_handler;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    signal_handler::SignalHandler,
};

use crate::config::Config;

use fieldcam_core::{EncoderSupervisor, PbmDisplay, StatusLoop, StatusRenderer, VolumeProbe};

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{error, info};
use uuid::Uuid;

/// Application entry point.
#[tokio::main]
async fn main() {
    // Config decides where the log files go, so it is read before logging
    // is up and reported right after.
    let config = Config::load();
    let _log_guard =
        logging::init_tracing(config.as_ref().ok().map(|c| c.log_dir()).as_deref());

    let config = match config {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Config validation failed: {:?}", e);
        std::process::exit(1);
    }

    let session_config = match config.to_session_config() {
        Ok(sc) => sc,
        Err(e) => {
            error!("Failed to build session config: {:?}", e);
            std::process::exit(1);
        }
    };

    info!(
        root_path = ?config.storage.root_path,
        recordings = ?session_config.output_root,
        device = %session_config.device,
        resolution = %session_config.resolution,
        segment_seconds = session_config.segment_duration.as_secs(),
        "Configuration ready"
    );

    let display = PbmDisplay::new(&config.display.frame_path, config.panel_size());
    let renderer = match StatusRenderer::new(display, config.renderer_options()) {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to initialize status display: {:?}", e);
            std::process::exit(1);
        }
    };

    let supervisor = Arc::new(EncoderSupervisor::new(config.stop_timeout()));
    let probe = Arc::new(VolumeProbe::new(&config.storage.root_path));

    let (command_tx, command_rx) = mpsc::channel(32);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let status_loop = StatusLoop::new(
        renderer,
        probe,
        Arc::clone(&supervisor),
        config.tick_period(),
    );
    let status_task = tokio::spawn(status_loop.run(shutdown_rx.clone()));

    if config.behavior.autostart {
        info!("Autostart enabled");
        if let Err(e) = command_tx
            .send(AppCommand::StartRecording {
                request_id: Uuid::new_v4(),
            })
            .await
        {
            error!(error = ?e, "Failed to queue autostart");
        }
    }

    let signal_handler = SignalHandler::new(command_tx);

    let app = App {
        supervisor,
        session_config,
        command_rx,
        shutdown_tx,
        status_task: Some(status_task),
    };

    tokio::join!(
        async {
            if let Err(e) = signal_handler.run(shutdown_rx).await {
                error!(error = ?e, "Signal handler error");
            }
        },
        async {
            if let Err(e) = app.run().await {
                error!(error = ?e, "App error");
            }
        }
    );
}
