//! Recording sessions and the encoder process behind them.
//!
//! [`EncoderSupervisor`] owns at most one running encoder. Readers follow it
//! through the published [`SessionSnapshot`].

mod config;
mod invocation;
mod launcher;
mod naming;
mod state;
mod supervisor;

pub use {
    config::{Resolution, SessionConfig, TimestampOverlay},
    invocation::EncoderInvocation,
    launcher::{EncoderLauncher, ProcessLauncher},
    naming::{segment_file_name, segment_template, session_directory_name, time_prefix},
    state::{SessionHandle, SessionSnapshot, SupervisorState},
    supervisor::EncoderSupervisor,
};
