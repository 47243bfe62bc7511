//! Periodic status tick: pull live facts, render, push.

use crate::{
    CoreError, CoreResult,
    display::DisplayDriver,
    render::{StatusFacts, StatusRenderer},
    session::{EncoderLauncher, EncoderSupervisor},
    storage::StorageProbe,
};

use std::{
    panic::Location,
    sync::{Arc, Mutex},
    time::Duration,
};

use error_location::ErrorLocation;
use tokio::{
    sync::watch,
    time::{Instant, MissedTickBehavior},
};
use tracing::{debug, error, info, instrument, warn};

/// Fastest tick the panel tolerates (5 Hz).
pub const MIN_TICK: Duration = Duration::from_millis(200);
/// Slowest useful tick (1 Hz).
pub const MAX_TICK: Duration = Duration::from_secs(1);

/// Renderer shared between the loop and the blocking pool.
pub type SharedRenderer<D> = Arc<Mutex<StatusRenderer<D>>>;

/// Drives the [`StatusRenderer`] from the supervisor and the storage probe.
///
/// Each tick reads the supervisor's published snapshot (after letting it
/// reap an exited encoder), samples storage and renders on the blocking
/// pool. The loop waits for the render to finish before taking the next
/// tick; ticks missed meanwhile are skipped, never queued.
pub struct StatusLoop<D, P, L> {
    renderer: SharedRenderer<D>,
    probe: Arc<P>,
    supervisor: Arc<EncoderSupervisor<L>>,
    period: Duration,
}

impl<D, P, L> StatusLoop<D, P, L>
where
    D: DisplayDriver + 'static,
    P: StorageProbe + 'static,
    L: EncoderLauncher,
{
    /// `period` is clamped into [`MIN_TICK`]..=[`MAX_TICK`].
    pub fn new(
        renderer: StatusRenderer<D>,
        probe: Arc<P>,
        supervisor: Arc<EncoderSupervisor<L>>,
        period: Duration,
    ) -> Self {
        Self {
            renderer: Arc::new(Mutex::new(renderer)),
            probe,
            supervisor,
            period: period.clamp(MIN_TICK, MAX_TICK),
        }
    }

    /// Tick period in use.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Handle to the renderer, for inspection while the loop runs.
    pub fn renderer(&self) -> SharedRenderer<D> {
        Arc::clone(&self.renderer)
    }

    /// Run until `shutdown_rx` turns true or its sender is dropped, then
    /// clear the panel and put it to sleep.
    ///
    /// A failed tick is logged and retried on the next one.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if the final clear or sleep fails.
    #[instrument(skip_all, fields(period_ms = self.period.as_millis()))]
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) -> CoreResult<()> {
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!("Status loop started");

        while !*shutdown_rx.borrow() {
            tokio::select! {
                changed = shutdown_rx.changed() => {
                    if changed.is_err() {
                        debug!("Shutdown sender dropped");
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.tick().await;
                }
            }
        }

        info!("Status loop stopping");
        self.shutdown_display().await
    }

    async fn tick(&self) {
        let alive = self.supervisor.is_alive().await;
        let snapshot = self.supervisor.snapshot();
        let recording = alive && snapshot.is_recording();
        let elapsed = snapshot.elapsed_at(Instant::now());

        let renderer = Arc::clone(&self.renderer);
        let probe = Arc::clone(&self.probe);

        let rendered = tokio::task::spawn_blocking(move || {
            let storage = probe.percent_used().percent;
            let facts = StatusFacts {
                recording,
                elapsed,
                storage,
            };
            renderer
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .render(facts)
        })
        .await;

        match rendered {
            Ok(Ok(outcome)) => debug!(
                regions = outcome.regions.len(),
                refresh = ?outcome.refresh,
                "Tick rendered"
            ),
            Ok(Err(e)) => warn!(error = %e, "Tick render failed, retrying next tick"),
            Err(e) => error!(error = %e, "Render task failed"),
        }
    }

    async fn shutdown_display(&self) -> CoreResult<()> {
        let location = Location::caller();
        let renderer = Arc::clone(&self.renderer);

        tokio::task::spawn_blocking(move || {
            renderer
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .shutdown()
        })
        .await
        .map_err(|e| CoreError::DisplayPush {
            reason: format!("Display shutdown task failed: {}", e),
            location: ErrorLocation::from(location),
        })?
    }
}
