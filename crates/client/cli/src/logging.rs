use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Log to `{log_dir}/{session_id}/park.log` through a non-blocking writer.
///
/// Buffered lines are written out when the returned guard drops, so the
/// caller keeps it alive until the session ends.
pub fn setup_logging(log_dir: &Path, session_id: &str) -> Result<WorkerGuard> {
    let (non_blocking_file, guard) = session_writer(log_dir, session_id)?;

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!(
        "Log file: {}/park.log",
        log_dir.join(session_id).display()
    );

    Ok(guard)
}

fn session_writer(log_dir: &Path, session_id: &str) -> Result<(NonBlocking, WorkerGuard)> {
    let session_log_dir = log_dir.join(session_id);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "park.log");
    Ok(tracing_appender::non_blocking(file_appender))
}
