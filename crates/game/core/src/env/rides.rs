//! Static ride type and ride object tables.

use bitflags::bitflags;

use super::ShopItem;
use crate::config::GameConfig;
use crate::state::{Money, ObjectEntryIndex, RideMode, RideType, TrackColour, VehicleColour};

bitflags! {
    /// Behavioural properties of a ride type.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct RideTypeFlags: u32 {
        const IS_SHOP          = 1 << 0;
        const MUSIC_ON_DEFAULT = 1 << 1;
        const HAS_ON_RIDE_PHOTO = 1 << 2;
        const IS_TOILET        = 1 << 3;
    }
}

/// Range of the ride type's operating setting (laps, rotations, swing time).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperatingSettings {
    pub min_value: u8,
    pub max_value: u8,
}

impl OperatingSettings {
    /// Initial setting for a new ride, three quarters of the way towards the minimum.
    pub const fn default_option(self) -> u8 {
        ((self.min_value as u16 * 3 + self.max_value as u16) / 4) as u8
    }
}

/// Per-type rules shared by every ride object of that type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RideTypeDescriptor {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: RideTypeFlags,
    pub default_mode: RideMode,
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_music: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_price: Money,
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_secondary_price: Money,
    #[cfg_attr(feature = "serde", serde(default))]
    pub operating: OperatingSettings,
    #[cfg_attr(feature = "serde", serde(default))]
    pub lift_minimum_speed: u8,
    pub track_colour_presets: Vec<TrackColour>,
}

impl RideTypeDescriptor {
    pub fn has_flag(&self, flag: RideTypeFlags) -> bool {
        self.flags.contains(flag)
    }
}

/// Vehicle colour presets offered by a ride object.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleColourPresets {
    pub colours: Vec<VehicleColour>,
    /// Every train gets its own preset instead of the player picking one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub per_train: bool,
}

impl VehicleColourPresets {
    /// Returns true if the player may pick preset `index` for this object.
    pub fn accepts(&self, index: u8) -> bool {
        self.per_train || self.colours.is_empty() || usize::from(index) < self.colours.len()
    }

    /// Returns true if one chosen preset paints every train.
    pub fn is_fixed(&self) -> bool {
        !self.per_train && !self.colours.is_empty()
    }
}

/// A loaded ride object: the concrete vehicle or stall a player builds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RideEntry {
    pub name: String,
    pub ride_types: Vec<RideType>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub shop_item: Option<ShopItem>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub shop_item_secondary: Option<ShopItem>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub vehicle_colours: VehicleColourPresets,
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_cars_in_train: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_cars_in_train: u8,
}

impl RideEntry {
    pub fn provides(&self, ride_type: RideType) -> bool {
        self.ride_types.contains(&ride_type)
    }
}

/// Oracle exposing ride type descriptors and loaded ride objects.
pub trait RideDataOracle: Send + Sync {
    /// Number of defined ride types. Types at or above this are invalid.
    fn ride_type_count(&self) -> u16;

    fn ride_type(&self, ride_type: RideType) -> Option<&RideTypeDescriptor>;

    fn ride_entry(&self, index: ObjectEntryIndex) -> Option<&RideEntry>;

    /// First loaded object that provides `ride_type`.
    fn first_entry_for(&self, ride_type: RideType) -> Option<ObjectEntryIndex>;

    /// Resolves the object a new ride of `ride_type` should use.
    ///
    /// An explicit `sub_type` is returned unchanged; [`ObjectEntryIndex::NULL`]
    /// selects the first object providing the type, or stays `NULL` if none does.
    fn resolve_entry(&self, ride_type: RideType, sub_type: ObjectEntryIndex) -> ObjectEntryIndex {
        if !sub_type.is_null() {
            return sub_type;
        }
        self.first_entry_for(ride_type)
            .unwrap_or(ObjectEntryIndex::NULL)
    }
}

/// In-memory ride tables, indexed by [`RideType`] and [`ObjectEntryIndex`].
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticRideData {
    pub ride_types: Vec<RideTypeDescriptor>,
    /// Object slots; `None` marks an unloaded slot.
    pub entries: Vec<Option<RideEntry>>,
}

impl StaticRideData {
    pub fn new(ride_types: Vec<RideTypeDescriptor>, entries: Vec<Option<RideEntry>>) -> Self {
        Self {
            ride_types,
            entries,
        }
    }
}

impl RideDataOracle for StaticRideData {
    fn ride_type_count(&self) -> u16 {
        u16::try_from(self.ride_types.len()).unwrap_or(u16::MAX)
    }

    fn ride_type(&self, ride_type: RideType) -> Option<&RideTypeDescriptor> {
        self.ride_types.get(ride_type.index())
    }

    fn ride_entry(&self, index: ObjectEntryIndex) -> Option<&RideEntry> {
        if index.0 >= GameConfig::MAX_RIDE_OBJECTS {
            return None;
        }
        self.entries.get(index.index()).and_then(Option::as_ref)
    }

    fn first_entry_for(&self, ride_type: RideType) -> Option<ObjectEntryIndex> {
        self.entries
            .iter()
            .take(usize::from(GameConfig::MAX_RIDE_OBJECTS))
            .position(|entry| entry.as_ref().is_some_and(|e| e.provides(ride_type)))
            .map(|index| ObjectEntryIndex(index as u16))
    }
}
