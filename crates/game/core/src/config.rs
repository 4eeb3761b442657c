use crate::state::Money;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Highest entrance fee a park may charge.
    pub max_entrance_fee: Money,
    /// Highest price a single ride or shop item may be sold for.
    pub max_ride_price: Money,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Number of ride slots in a park.
    pub const MAX_RIDES: usize = 255;
    /// Number of loadable ride objects. Entry indices at or above this are invalid.
    pub const MAX_RIDE_OBJECTS: u16 = 128;
    pub const MAX_STATIONS: usize = 4;
    pub const MAX_VEHICLES_PER_RIDE: usize = 32;
    pub const MAX_PARK_NAME_LENGTH: usize = 32;
    pub const MAX_MARKETING_WEEKS: u8 = 12;

    // ===== ride defaults =====
    pub const RIDE_INITIAL_RELIABILITY: u16 = (100 << 8) | 1;
    pub const DEFAULT_PROPOSED_VEHICLES: u8 = 32;
    pub const DEFAULT_PROPOSED_CARS_PER_TRAIN: u8 = 12;
    pub const DEFAULT_MIN_WAITING_TIME: u8 = 10;
    pub const DEFAULT_MAX_WAITING_TIME: u8 = 60;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_ENTRANCE_FEE: Money = Money::new(100, 0);
    pub const DEFAULT_MAX_RIDE_PRICE: Money = Money::new(20, 0);

    pub const fn new() -> Self {
        Self {
            max_entrance_fee: Self::DEFAULT_MAX_ENTRANCE_FEE,
            max_ride_price: Self::DEFAULT_MAX_RIDE_PRICE,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
