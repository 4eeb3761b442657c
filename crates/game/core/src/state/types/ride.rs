use bitflags::bitflags;

use super::{Colour, Money, ObjectEntryIndex, RideId, RideType, TileCoordsXY8};
use crate::config::GameConfig;

bitflags! {
    /// Runtime lifecycle bits of a ride.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct RideLifecycleFlags: u32 {
        const ON_TRACK          = 1 << 0;
        const TESTED            = 1 << 1;
        const BROKEN_DOWN       = 1 << 7;
        const MUSIC             = 1 << 13;
        /// Scenario-placed ride that may not be demolished.
        const INDESTRUCTIBLE    = 1 << 14;
    }
}

bitflags! {
    /// Departure rules at the station.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DepartFlags: u8 {
        const WAIT_FOR_LOAD              = 1 << 3;
        const LEAVE_WHEN_ANOTHER_ARRIVES = 1 << 4;
        const SYNCHRONISE_WITH_ADJACENT  = 1 << 5;
        const WAIT_FOR_MINIMUM_LENGTH    = 1 << 6;
        const WAIT_FOR_MAXIMUM_LENGTH    = 1 << 7;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RideStatus {
    #[default]
    Closed,
    Open,
    Testing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RideMode {
    #[default]
    Normal,
    ContinuousCircuit,
    ShopStall,
    Swing,
    Rotation,
    BoatHire,
}

/// How full a train must be before it leaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadThreshold {
    OneQuarter,
    Half,
    ThreeQuarters,
    #[default]
    Full,
    Any,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InspectionInterval {
    Every10Minutes,
    Every20Minutes,
    #[default]
    Every30Minutes,
    Every45Minutes,
    EveryHour,
    Every2Hours,
    Never,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntranceStyle {
    #[default]
    Plain,
    Wooden,
    Castle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleColourScheme {
    #[default]
    AllSame,
    DifferentPerTrain,
}

/// Main/additional/support colours of a ride's track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackColour {
    pub main: Colour,
    pub additional: Colour,
    pub supports: Colour,
}

/// Body/trim/tertiary colours of one train.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleColour {
    pub body: Colour,
    pub trim: Colour,
    pub tertiary: Colour,
}

/// Station bookkeeping. Every location is unset until track is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    pub start: Option<TileCoordsXY8>,
    pub entrance: Option<TileCoordsXY8>,
    pub exit: Option<TileCoordsXY8>,
    pub train_at_station: Option<u8>,
    pub queue_time: u8,
}

/// A ride or shop occupying a slot in the [`RideTable`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ride {
    pub ride_type: RideType,
    pub subtype: ObjectEntryIndex,
    pub name: String,
    pub status: RideStatus,
    pub mode: RideMode,
    pub lifecycle_flags: RideLifecycleFlags,

    pub track_colour: TrackColour,
    pub colour_scheme: VehicleColourScheme,
    pub vehicle_colours: Vec<VehicleColour>,
    pub overall_view: Option<TileCoordsXY8>,
    pub stations: [Station; GameConfig::MAX_STATIONS],
    pub vehicles: Vec<Option<u16>>,

    pub num_stations: u8,
    pub num_vehicles: u8,
    pub proposed_num_vehicles: u8,
    pub max_trains: u8,
    pub num_cars_per_train: u8,
    pub proposed_num_cars_per_train: u8,
    pub min_cars_per_train: u8,
    pub max_cars_per_train: u8,
    pub min_waiting_time: u8,
    pub max_waiting_time: u8,
    pub depart_flags: DepartFlags,
    pub load_threshold: LoadThreshold,
    pub num_circuits: u8,
    pub operation_option: u8,
    pub lift_hill_speed: u8,
    pub music: u8,

    pub price: Money,
    pub price_secondary: Money,
    pub income_per_hour: Option<Money>,
    pub profit: Option<Money>,
    pub upkeep_cost: Option<Money>,

    pub excitement: Option<u16>,
    pub value: Option<u16>,
    pub satisfaction: Option<u8>,
    pub popularity: Option<u8>,
    pub total_customers: u32,
    pub num_riders: u16,

    pub build_date: u16,
    pub reliability: u16,
    pub unreliability_factor: u8,
    pub inspection_interval: InspectionInterval,
    pub last_inspection: u8,
    pub downtime: u8,
    pub breakdown_reason: Option<u8>,
    pub entrance_style: EntranceStyle,
}

/// Fixed-capacity table of ride slots. A slot index is a [`RideId`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RideTable {
    slots: Vec<Option<Ride>>,
}

impl RideTable {
    /// Creates a table with `capacity` empty slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lowest free slot, or `None` when the park is full.
    pub fn empty_slot(&self) -> Option<RideId> {
        self.slots
            .iter()
            .position(Option::is_none)
            .map(|index| RideId(index as u16))
    }

    pub fn get(&self, id: RideId) -> Option<&Ride> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: RideId) -> Option<&mut Ride> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Places a fully built ride in an empty slot.
    ///
    /// Returns the ride back if the slot is out of range or taken.
    pub fn insert(&mut self, id: RideId, ride: Ride) -> Result<(), Ride> {
        match self.slots.get_mut(id.index()) {
            Some(slot @ None) => {
                *slot = Some(ride);
                Ok(())
            }
            _ => Err(ride),
        }
    }

    pub fn remove(&mut self, id: RideId) -> Option<Ride> {
        self.slots.get_mut(id.index()).and_then(Option::take)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RideId, &Ride)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|ride| (RideId(index as u16), ride)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (RideId, &mut Ride)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_mut().map(|ride| (RideId(index as u16), ride)))
    }
}

impl Default for RideTable {
    fn default() -> Self {
        Self::with_capacity(GameConfig::MAX_RIDES)
    }
}
