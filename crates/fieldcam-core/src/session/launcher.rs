use crate::session::EncoderInvocation;

use std::process::Stdio;

use tokio::process::{Child, Command};

/// Spawns the encoder process for a session.
pub trait EncoderLauncher: Send + Sync {
    /// Launch `invocation`. The child's stderr should be piped if it is to be
    /// logged; the supervisor forwards it when present.
    fn launch(&self, invocation: &EncoderInvocation) -> std::io::Result<Child>;
}

/// Launches the invocation as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl EncoderLauncher for ProcessLauncher {
    fn launch(&self, invocation: &EncoderInvocation) -> std::io::Result<Child> {
        Command::new(invocation.program())
            .args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
    }
}
