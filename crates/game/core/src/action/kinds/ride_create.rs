use tracing::warn;

use super::pricing::{common_item_price, common_ride_price};
use crate::action::{
    ActionFlags, ActionOutput, ActionResult, ActionType, ErrorKind, ExecuteContext, GameAction,
    Permissions, QueryContext,
};
use crate::config::GameConfig;
use crate::env::{RideEntry, RideTypeDescriptor, RideTypeFlags, ShopItem};
use crate::error::StreamError;
use crate::localisation::StringId;
use crate::state::{
    DepartFlags, EntranceStyle, ExpenditureType, InspectionInterval, LoadThreshold, Money,
    ObjectEntryIndex, Objective, ParkFlags, Ride, RideLifecycleFlags, RideStatus, RideType,
    Station, VehicleColour, VehicleColourScheme, WorldState,
};
use crate::stream::DataSerialiser;
use crate::ui::WindowClass;

/// Creates an empty ride of the given type in the first free slot.
///
/// No track is placed; the ride exists only as an entry in the ride table
/// with its defaults, prices and colours set.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RideCreateAction {
    ride_type: RideType,
    /// Ride object to build. [`ObjectEntryIndex::NULL`] picks the first one providing the type.
    sub_type: ObjectEntryIndex,
    /// Track colour preset.
    colour1: u8,
    /// Vehicle colour preset.
    colour2: u8,
}

impl RideCreateAction {
    pub fn new(ride_type: RideType, sub_type: ObjectEntryIndex, colour1: u8, colour2: u8) -> Self {
        Self {
            ride_type,
            sub_type,
            colour1,
            colour2,
        }
    }

    pub fn ride_type(&self) -> RideType {
        self.ride_type
    }

    pub fn sub_type(&self) -> ObjectEntryIndex {
        self.sub_type
    }

    fn invalid() -> ActionResult {
        ActionResult::error(ErrorKind::InvalidParameters, StringId::INVALID_RIDE_TYPE)
    }

    fn build_ride(
        &self,
        ctx: &QueryContext<'_>,
        descriptor: &RideTypeDescriptor,
        entry: &RideEntry,
        entry_index: ObjectEntryIndex,
    ) -> Ride {
        let world = ctx.world;
        let mut lifecycle_flags = RideLifecycleFlags::empty();
        if descriptor.has_flag(RideTypeFlags::MUSIC_ON_DEFAULT) {
            lifecycle_flags |= RideLifecycleFlags::MUSIC;
        }
        let (colour_scheme, vehicle_colours) = self.vehicle_colours(entry);
        let (price, price_secondary) = self.initial_prices(ctx, descriptor, entry);

        Ride {
            ride_type: self.ride_type,
            subtype: entry_index,
            name: default_name(world, &entry.name),
            status: RideStatus::Closed,
            mode: descriptor.default_mode,
            lifecycle_flags,

            track_colour: descriptor
                .track_colour_presets
                .get(usize::from(self.colour1))
                .copied()
                .unwrap_or_default(),
            colour_scheme,
            vehicle_colours,
            overall_view: None,
            stations: [Station::default(); GameConfig::MAX_STATIONS],
            vehicles: vec![None; GameConfig::MAX_VEHICLES_PER_RIDE],

            num_stations: 0,
            num_vehicles: 1,
            proposed_num_vehicles: GameConfig::DEFAULT_PROPOSED_VEHICLES,
            max_trains: GameConfig::DEFAULT_PROPOSED_VEHICLES,
            num_cars_per_train: 1,
            proposed_num_cars_per_train: GameConfig::DEFAULT_PROPOSED_CARS_PER_TRAIN,
            min_cars_per_train: entry.min_cars_in_train,
            max_cars_per_train: entry.max_cars_in_train,
            min_waiting_time: GameConfig::DEFAULT_MIN_WAITING_TIME,
            max_waiting_time: GameConfig::DEFAULT_MAX_WAITING_TIME,
            depart_flags: DepartFlags::WAIT_FOR_MINIMUM_LENGTH,
            load_threshold: LoadThreshold::Full,
            num_circuits: 1,
            operation_option: descriptor.operating.default_option(),
            lift_hill_speed: descriptor.lift_minimum_speed,
            music: descriptor.default_music,

            price,
            price_secondary,
            income_per_hour: None,
            profit: None,
            upkeep_cost: None,

            excitement: None,
            value: None,
            satisfaction: None,
            popularity: None,
            total_customers: 0,
            num_riders: 0,

            build_date: world.months_elapsed,
            reliability: GameConfig::RIDE_INITIAL_RELIABILITY,
            unreliability_factor: 1,
            inspection_interval: InspectionInterval::Every30Minutes,
            last_inspection: 0,
            downtime: 0,
            breakdown_reason: None,
            entrance_style: EntranceStyle::Plain,
        }
    }

    /// Fixed presets paint every train with the chosen colour; otherwise each
    /// train cycles through the object's presets.
    fn vehicle_colours(&self, entry: &RideEntry) -> (VehicleColourScheme, Vec<VehicleColour>) {
        let presets = &entry.vehicle_colours;
        if presets.is_fixed() {
            let chosen = presets
                .colours
                .get(usize::from(self.colour2))
                .copied()
                .unwrap_or_default();
            return (VehicleColourScheme::AllSame, vec![chosen]);
        }
        if presets.colours.is_empty() {
            return (VehicleColourScheme::AllSame, vec![VehicleColour::default()]);
        }
        let colours = presets
            .colours
            .iter()
            .copied()
            .cycle()
            .take(GameConfig::MAX_VEHICLES_PER_RIDE)
            .collect();
        (VehicleColourScheme::DifferentPerTrain, colours)
    }

    fn initial_prices(
        &self,
        ctx: &QueryContext<'_>,
        descriptor: &RideTypeDescriptor,
        entry: &RideEntry,
    ) -> (Money, Money) {
        let world = ctx.world;
        let park = &world.park;
        if !park.money_enabled() {
            return (Money::ZERO, Money::ZERO);
        }

        let mut price = match entry.shop_item {
            Some(item) => item.default_price(),
            None if park.has_flag(ParkFlags::PARK_FREE_ENTRY) || world.cheats.unlock_all_prices => {
                descriptor.default_price
            }
            // Parks that charge at the gate start rides free.
            None => Money::ZERO,
        };
        let mut secondary = entry
            .shop_item_secondary
            .map_or(descriptor.default_secondary_price, ShopItem::default_price);

        if park.objective == Objective::BuildTheBest {
            price = Money::ZERO;
        }

        let oracle = ctx.rides();
        if descriptor.has_flag(RideTypeFlags::IS_TOILET)
            && park.has_common_price(ShopItem::Admission)
        {
            if let Some(common) = common_ride_price(world, self.ride_type, None) {
                price = common;
            }
        }
        if let Some(item) = entry.shop_item.filter(|item| park.has_common_price(*item)) {
            if let Some(common) = common_item_price(world, oracle, item, None) {
                price = common;
            }
        }
        if let Some(item) = entry
            .shop_item_secondary
            .filter(|item| park.has_common_price(*item))
        {
            if let Some(common) = common_item_price(world, oracle, item, None) {
                secondary = common;
            }
        }
        if !descriptor.has_flag(RideTypeFlags::IS_SHOP) && park.has_common_price(ShopItem::Photo) {
            if let Some(common) = common_item_price(world, oracle, ShopItem::Photo, None) {
                secondary = common;
            }
        }

        (price, secondary)
    }
}

/// "<object name> <n>" with the smallest `n` no other ride uses.
fn default_name(world: &WorldState, base: &str) -> String {
    let mut n = 1u32;
    loop {
        let candidate = format!("{base} {n}");
        if !world.rides.iter().any(|(_, ride)| ride.name == candidate) {
            return candidate;
        }
        n += 1;
    }
}

impl GameAction for RideCreateAction {
    fn action_type(&self) -> ActionType {
        ActionType::RIDE_CREATE
    }

    fn action_flags(&self, base: ActionFlags) -> ActionFlags {
        base | ActionFlags::ALLOW_WHILE_PAUSED
    }

    fn required_permission(&self) -> Permissions {
        Permissions::RIDE_CONSTRUCTION
    }

    fn error_title(&self) -> StringId {
        StringId::CANT_CREATE_NEW_RIDE
    }

    fn serialise(&mut self, stream: &mut DataSerialiser) -> Result<(), StreamError> {
        stream
            .field(&mut self.ride_type)?
            .field(&mut self.sub_type)?
            .field(&mut self.colour1)?
            .field(&mut self.colour2)?;
        Ok(())
    }

    fn query(&self, ctx: &QueryContext<'_>) -> ActionResult {
        if ctx.world.rides.empty_slot().is_none() {
            return ActionResult::error(ErrorKind::NoFreeElements, StringId::TOO_MANY_RIDES);
        }

        let oracle = ctx.rides();
        if self.ride_type.0 >= oracle.ride_type_count() {
            return Self::invalid();
        }

        let entry_index = oracle.resolve_entry(self.ride_type, self.sub_type);
        if entry_index.0 >= GameConfig::MAX_RIDE_OBJECTS {
            return Self::invalid();
        }
        let Some(entry) = oracle
            .ride_entry(entry_index)
            .filter(|entry| entry.provides(self.ride_type))
        else {
            return Self::invalid();
        };
        let Some(descriptor) = oracle.ride_type(self.ride_type) else {
            return Self::invalid();
        };

        if usize::from(self.colour1) >= descriptor.track_colour_presets.len() {
            return Self::invalid();
        }
        if !entry.vehicle_colours.accepts(self.colour2) {
            return Self::invalid();
        }

        ActionResult::ok()
    }

    fn execute(&self, ctx: &mut ExecuteContext<'_>) -> ActionResult {
        let oracle = ctx.rides();
        let entry_index = oracle.resolve_entry(self.ride_type, self.sub_type);

        let Some(ride_index) = ctx.world.rides.empty_slot() else {
            warn!(ride_type = self.ride_type.0, "no free ride slot at execute");
            return ActionResult::error(ErrorKind::Unknown, StringId::TOO_MANY_RIDES);
        };
        let (Some(entry), Some(descriptor)) = (
            oracle.ride_entry(entry_index),
            oracle.ride_type(self.ride_type),
        ) else {
            warn!(
                ride = %ride_index,
                ride_type = self.ride_type.0,
                entry = entry_index.0,
                "invalid request for ride"
            );
            return ActionResult::error(ErrorKind::Unknown, StringId::UNKNOWN_OBJECT_TYPE);
        };

        let ride = self.build_ride(&ctx.as_query(), descriptor, entry, entry_index);
        if ctx.world.rides.insert(ride_index, ride).is_err() {
            warn!(ride = %ride_index, "ride slot taken at execute");
            return ActionResult::error(ErrorKind::Unknown, StringId::TOO_MANY_RIDES);
        }
        ctx.invalidate(WindowClass::RideList);

        ActionResult::ok()
            .with_expenditure(ExpenditureType::RideConstruction)
            .with_output(ActionOutput::RideCreated { ride_index })
    }
}
