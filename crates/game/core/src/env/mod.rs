//! Read-only data consumed by actions.
//!
//! Ride type descriptors and loaded ride objects are reached through the
//! [`RideDataOracle`] trait so tests can inject small tables while the runtime
//! uses the catalogue loaded by the content crate. [`GameEnv`] bundles the
//! oracle with the tunable [`GameConfig`].
mod rides;
mod shop;

pub use rides::{
    OperatingSettings, RideDataOracle, RideEntry, RideTypeDescriptor, RideTypeFlags,
    StaticRideData, VehicleColourPresets,
};
pub use shop::ShopItem;

use crate::config::GameConfig;

/// Aggregates the read-only collaborators an action may consult.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    rides: &'a dyn RideDataOracle,
    config: &'a GameConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(rides: &'a dyn RideDataOracle, config: &'a GameConfig) -> Self {
        Self { rides, config }
    }

    pub fn rides(&self) -> &'a dyn RideDataOracle {
        self.rides
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }
}

impl std::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv")
            .field("ride_types", &self.rides.ride_type_count())
            .field("config", self.config)
            .finish()
    }
}
