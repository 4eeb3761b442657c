//! Scripted park session entry point.
mod config;
mod dirs;
mod logging;
mod session;

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use config::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();

    let session_id = config.session_id.clone().unwrap_or_else(|| {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        format!("session_{}", timestamp)
    });

    let _log_guard = logging::setup_logging(&dirs::log_dir(), &session_id)?;

    let journal_dir = config.journal_dir.clone().unwrap_or_else(dirs::journal_dir);
    let report = session::run(&config, &session_id, &journal_dir).await?;

    println!("session   {session_id}");
    println!("applied   {}", report.applied);
    println!("rejected  {}", report.rejected);
    println!("journal   {}", report.journal.display());
    println!("snapshot  {}", report.snapshot.display());
    println!("checksum  {} (replay verified)", report.checksum);

    Ok(())
}
