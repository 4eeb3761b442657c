//! Deterministic replay of an action journal.
//!
//! A journal holds only actions the world applied, in order. Re-running them
//! on the initial world through the dispatcher must succeed entry by entry;
//! the first one that does not proves the journal, the initial world or the
//! static data differ from the recorded session.

use park_core::{
    ActionRegistry, GameActions, GameConfig, GameEnv, NullWindowManager, RideDataOracle,
    Session, WorldState,
};
use tracing::{debug, info};

use crate::api::{Result, RuntimeError};
use crate::repository::ActionLogReader;

/// Replays `journal` on `world` and returns the resulting world.
///
/// Every entry is decoded with `registry` and re-validated with the full
/// Query before it executes, exactly as a peer treats a received action.
pub fn replay(
    mut world: WorldState,
    rides: &dyn RideDataOracle,
    config: &GameConfig,
    registry: &ActionRegistry,
    journal: &mut dyn ActionLogReader,
) -> Result<WorldState> {
    let mut session = Session::offline();
    let mut windows = NullWindowManager;
    let mut replayed = 0u64;

    while let Some(entry) = journal.read_next()? {
        let action = registry.decode(&entry.packet)?;
        let action_type = action.action_type();

        let env = GameEnv::new(rides, config);
        let result = GameActions::new(&mut world, env, &mut session, &mut windows)
            .execute_received(action);
        if !result.is_ok() {
            return Err(RuntimeError::ReplayDiverged {
                index: entry.sequence,
                action_type,
                error_kind: result.error_kind(),
            });
        }

        debug!(sequence = entry.sequence, action = %action_type, "replayed");
        replayed += 1;
    }

    info!(entries = replayed, checksum = %world.checksum(), "replay complete");
    Ok(world)
}
