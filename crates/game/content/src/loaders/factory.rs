//! Content factory for loading everything a session needs from one directory.

use std::path::{Path, PathBuf};

use park_core::{GameConfig, StaticRideData};

use crate::loaders::{ConfigLoader, LoadResult, RideDataLoader, ScenarioLoader, ScenarioSpec};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── rides.ron
/// └── scenarios/
///     ├── forest_frontiers.toml
///     └── sandbox.toml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data directory bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the ride catalogue from `rides.ron`.
    pub fn load_ride_data(&self) -> LoadResult<StaticRideData> {
        RideDataLoader::load(&self.data_dir.join("rides.ron"))
    }

    /// Load a scenario from `scenarios/{name}.toml`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<ScenarioSpec> {
        let path = self
            .data_dir
            .join("scenarios")
            .join(format!("{}.toml", name));
        ScenarioLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_directory_is_complete() {
        let factory = ContentFactory::bundled();
        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
        assert_eq!(
            factory.load_ride_data().unwrap(),
            RideDataLoader::builtin().unwrap()
        );
        assert_eq!(
            factory.load_scenario("sandbox").unwrap().name,
            "Sandbox"
        );
    }

    #[test]
    fn missing_scenario_names_the_path() {
        let err = ContentFactory::bundled()
            .load_scenario("no_such_park")
            .unwrap_err();
        assert!(err.to_string().contains("no_such_park.toml"), "{err}");
    }
}
