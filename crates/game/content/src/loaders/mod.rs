//! Content loaders for reading game data from files.
//!
//! Ride catalogues are RON, scenarios and configuration are TOML. Every
//! loader returns park-core types directly.

pub mod config;
pub mod factory;
pub mod rides;
pub mod scenario;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use rides::RideDataLoader;
pub use scenario::{CheatsSpec, FinanceSpec, ParkSpec, ScenarioLoader, ScenarioSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
