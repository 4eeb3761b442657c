//! CLI configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Configuration for one scripted park session.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Bundled scenario name, or a path to a scenario TOML file.
    pub scenario: String,
    pub ride_data: Option<PathBuf>,
    pub game_config: Option<PathBuf>,
    pub journal_dir: Option<PathBuf>,
    pub session_id: Option<String>,
    pub command_buffer: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            scenario: "forest_frontiers".to_string(),
            ride_data: None,
            game_config: None,
            journal_dir: None,
            session_id: None,
            command_buffer: 32,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PARK_SCENARIO` - Scenario name or TOML path (default: forest_frontiers)
    /// - `PARK_RIDE_DATA` - Ride catalogue RON file (default: built-in catalogue)
    /// - `PARK_CONFIG` - Game configuration TOML file (default: built-in limits)
    /// - `PARK_JOURNAL_DIR` - Directory for session journals (default: platform-specific)
    /// - `PARK_SESSION_ID` - Session identifier (default: auto-generated)
    /// - `PARK_COMMAND_BUFFER` - Runtime command queue size (default: 32)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(scenario) = env::var("PARK_SCENARIO") {
            config.scenario = scenario;
        }

        config.ride_data = env::var("PARK_RIDE_DATA").ok().map(PathBuf::from);
        config.game_config = env::var("PARK_CONFIG").ok().map(PathBuf::from);
        config.journal_dir = env::var("PARK_JOURNAL_DIR").ok().map(PathBuf::from);
        config.session_id = env::var("PARK_SESSION_ID").ok();

        if let Some(capacity) = read_env::<usize>("PARK_COMMAND_BUFFER") {
            config.command_buffer = capacity.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
