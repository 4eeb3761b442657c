//! Data-driven content definitions and loaders.
//!
//! This crate houses static park content and the loaders that read it:
//! - Ride type and ride object catalogues (RON)
//! - Scenario definitions producing the initial world (TOML)
//! - Game configuration (TOML)
//!
//! Content is consumed by the runtime's ride-data oracle and by scenario
//! setup. Apart from the initial world it never appears in game state.

pub mod loaders;

pub use loaders::{
    CheatsSpec, ConfigLoader, ContentFactory, FinanceSpec, LoadResult, ParkSpec, RideDataLoader,
    ScenarioLoader, ScenarioSpec,
};
