//! Console plus rolling-file log output.

use std::{fs, path::Path};

use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Used when `RUST_LOG` is unset or invalid.
pub(crate) const DEFAULT_LOG_FILTER: &str = "fieldcam=debug,fieldcam_core=debug";

const LOG_FILE_PREFIX: &str = "fieldcam.log";

/// Install the global subscriber.
///
/// Logs go to the console and, when `log_dir` is given and can be created,
/// to a daily-rolling JSON file in it. Keep the returned guard alive until
/// exit or buffered file records are lost.
pub(crate) fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let mut dir_error = None;
    let (file_layer, guard) = match log_dir {
        Some(dir) => match fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                (Some(fmt::layer().json().with_writer(writer)), Some(guard))
            }
            Err(e) => {
                dir_error = Some((dir.to_path_buf(), e));
                (None, None)
            }
        },
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    if let Some((dir, e)) = dir_error {
        warn!(log_dir = ?dir, error = %e, "Log directory unavailable, logging to console only");
    }

    guard
}
