//! Authoritative park world state.
//!
//! This module owns the data structures that describe the park, its finances
//! and its rides. Actions read the state during Query and mutate it during
//! Execute; nothing else writes to it.
pub mod types;

use std::fmt;

pub use types::{
    Cheats, Colour, CoordsXYZ, DepartFlags, EntranceStyle, ExpenditureTable, ExpenditureType,
    FinanceState, InspectionInterval, LoadThreshold, MarketingCampaign, MarketingCampaignKind,
    Money, ObjectEntryIndex, Objective, ParkFlags, ParkState, PlayerId, Ride, RideId,
    RideLifecycleFlags, RideMode, RideStatus, RideTable, RideType, ScreenMode, Station,
    TileCoordsXY8, TrackColour, VehicleColour, VehicleColourScheme,
};

/// Canonical snapshot of the deterministic park simulation.
///
/// Two peers that apply the same action stream to equal worlds end up with
/// equal worlds, which [`WorldState::checksum`] makes cheap to compare.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    pub park: ParkState,
    pub finance: FinanceState,
    pub rides: RideTable,
    /// Months since the scenario started; rides remember it as their build date.
    pub months_elapsed: u16,
    pub cheats: Cheats,
    pub paused: bool,
    pub screen: ScreenMode,
}

impl WorldState {
    /// Creates a world with the given park and finances and an empty ride table.
    pub fn new(park: ParkState, finance: FinanceState) -> Self {
        Self {
            park,
            finance,
            ..Self::default()
        }
    }

    /// Replaces the ride table with one of `capacity` empty slots.
    pub fn with_ride_capacity(mut self, capacity: usize) -> Self {
        self.rides = RideTable::with_capacity(capacity);
        self
    }

    /// Returns true if the editor screen is active.
    pub fn in_editor(&self) -> bool {
        self.screen == ScreenMode::ScenarioEditor
    }

    /// Computes a SHA-256 digest over the canonical binary encoding of the world.
    ///
    /// # Panics
    ///
    /// Panics if bincode fails to encode the state, which cannot happen for
    /// the plain data types stored here.
    #[cfg(feature = "serde")]
    pub fn checksum(&self) -> StateChecksum {
        use sha2::{Digest, Sha256};

        let bytes = bincode::serialize(self).expect("WorldState serialization should not fail");
        StateChecksum(Sha256::digest(&bytes).into())
    }
}

/// Digest of a [`WorldState`], compared across peers to detect desyncs.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateChecksum(pub [u8; 32]);

impl fmt::Display for StateChecksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for StateChecksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateChecksum({self})")
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn checksum_tracks_state_changes() {
        let world = WorldState::default();
        let mut changed = world.clone();
        assert_eq!(world.checksum(), changed.checksum());

        changed.park.entrance_fee = Money::new(10, 0);
        assert_ne!(world.checksum(), changed.checksum());
    }
}
