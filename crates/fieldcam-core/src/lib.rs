//! Fieldcam Core Library
//!
//! Status screen and recording supervision for a field video recorder with
//! a bistable (e-paper) display. The renderer only redraws what changed, the
//! supervisor owns the external encoder process.
//!
//! # Example
//!
//! ```no_run
//! use fieldcam_core::{
//!     CoreResult, EncoderSupervisor, PbmDisplay, RendererOptions, StatusLoop, StatusRenderer,
//!     VolumeProbe,
//! };
//!
//! use std::{sync::Arc, time::Duration};
//!
//! use embedded_graphics::prelude::Size;
//! use tokio::sync::watch;
//!
//! #[tokio::main]
//! async fn main() -> CoreResult<()> {
//!     let display = PbmDisplay::new("/tmp/status.pbm", Size::new(250, 122));
//!     let renderer = StatusRenderer::new(display, RendererOptions::default())?;
//!     let supervisor = Arc::new(EncoderSupervisor::new(Duration::from_secs(5)));
//!     let probe = Arc::new(VolumeProbe::new("/media/usb"));
//!
//!     let (_shutdown_tx, shutdown_rx) = watch::channel(false);
//!     StatusLoop::new(renderer, probe, supervisor, Duration::from_secs(1))
//!         .run(shutdown_rx)
//!         .await
//! }
//! ```

pub mod display;
mod error;
mod percent;
pub mod render;
pub mod session;
mod status_loop;
pub mod storage;

pub use {
    display::{DirtyRegion, DisplayDriver, FrameBuffer, PbmDisplay, RefreshMode},
    error::{CoreError, Result as CoreResult},
    percent::Percent,
    render::{FrameState, RenderOutcome, RendererOptions, StatusFacts, StatusRenderer},
    session::{EncoderSupervisor, SessionConfig, SessionHandle, SupervisorState},
    status_loop::{MAX_TICK, MIN_TICK, SharedRenderer, StatusLoop},
    storage::{StorageProbe, StorageReading, VolumeProbe},
};
