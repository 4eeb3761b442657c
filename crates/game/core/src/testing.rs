//! Fixtures shared by the unit tests.

use std::sync::{Arc, Mutex};

use crate::action::{
    ActionHeader, ActionPacket, ActionType, ExecuteContext, GameAction, RideCreateAction,
};
use crate::config::GameConfig;
use crate::engine::ActionSink;
use crate::env::{
    GameEnv, OperatingSettings, RideEntry, RideTypeDescriptor, RideTypeFlags, ShopItem,
    StaticRideData, VehicleColourPresets,
};
use crate::error::SinkError;
use crate::state::{
    Colour, FinanceState, Money, ObjectEntryIndex, ParkFlags, ParkState, RideMode, RideType,
    TrackColour, VehicleColour, WorldState,
};

pub const COASTER: RideType = RideType(0);
pub const FOOD_STALL: RideType = RideType(1);
pub const TOILETS: RideType = RideType(2);
pub const CAROUSEL: RideType = RideType(3);

pub const COASTER_ENTRY: u16 = 0;
pub const BURGER_BAR_ENTRY: u16 = 1;

fn track(main: u8) -> TrackColour {
    TrackColour {
        main: Colour(main),
        additional: Colour(main + 1),
        supports: Colour(main + 2),
    }
}

fn vehicle(body: u8) -> VehicleColour {
    VehicleColour {
        body: Colour(body),
        trim: Colour(body + 1),
        tertiary: Colour(body + 2),
    }
}

fn descriptor(name: &str, flags: RideTypeFlags, mode: RideMode) -> RideTypeDescriptor {
    RideTypeDescriptor {
        name: name.into(),
        flags,
        default_mode: mode,
        default_music: 0,
        default_price: Money::ZERO,
        default_secondary_price: Money::ZERO,
        operating: OperatingSettings::default(),
        lift_minimum_speed: 0,
        track_colour_presets: vec![track(0)],
    }
}

fn entry(name: &str, ride_type: RideType) -> RideEntry {
    RideEntry {
        name: name.into(),
        ride_types: vec![ride_type],
        shop_item: None,
        shop_item_secondary: None,
        vehicle_colours: VehicleColourPresets::default(),
        min_cars_in_train: 1,
        max_cars_in_train: 1,
    }
}

pub fn ride_data() -> StaticRideData {
    let coaster = RideTypeDescriptor {
        default_music: 3,
        default_price: Money::new(2, 0),
        operating: OperatingSettings {
            min_value: 1,
            max_value: 1,
        },
        lift_minimum_speed: 5,
        track_colour_presets: vec![track(1), track(21)],
        ..descriptor(
            "Wooden Roller Coaster",
            RideTypeFlags::MUSIC_ON_DEFAULT,
            RideMode::ContinuousCircuit,
        )
    };
    let stall = descriptor("Food Stall", RideTypeFlags::IS_SHOP, RideMode::ShopStall);
    let toilets = descriptor(
        "Toilets",
        RideTypeFlags::IS_SHOP | RideTypeFlags::IS_TOILET,
        RideMode::ShopStall,
    );
    let carousel = RideTypeDescriptor {
        operating: OperatingSettings {
            min_value: 4,
            max_value: 25,
        },
        ..descriptor(
            "Merry-Go-Round",
            RideTypeFlags::MUSIC_ON_DEFAULT,
            RideMode::Rotation,
        )
    };

    let coaster_entry = RideEntry {
        vehicle_colours: VehicleColourPresets {
            colours: vec![vehicle(4), vehicle(8), vehicle(12)],
            per_train: false,
        },
        min_cars_in_train: 2,
        max_cars_in_train: 7,
        ..entry("Wooden Coaster", COASTER)
    };
    let burger_bar = RideEntry {
        shop_item: Some(ShopItem::Burger),
        ..entry("Burger Bar", FOOD_STALL)
    };
    let carousel_entry = RideEntry {
        vehicle_colours: VehicleColourPresets {
            colours: vec![vehicle(30), vehicle(40)],
            per_train: true,
        },
        ..entry("Merry-Go-Round", CAROUSEL)
    };

    StaticRideData::new(
        vec![coaster, stall, toilets, carousel],
        vec![
            Some(coaster_entry),
            Some(burger_bar),
            Some(entry("Toilets", TOILETS)),
            Some(carousel_entry),
        ],
    )
}

pub fn world() -> WorldState {
    let park = ParkState {
        name: "Test Park".into(),
        flags: ParkFlags::PARK_OPEN,
        entrance_fee: Money::new(10, 0),
        ..ParkState::default()
    };
    let finance = FinanceState::new(
        Money::new(10_000, 0),
        Money::new(5_000, 0),
        Money::new(20_000, 0),
    );
    WorldState::new(park, finance)
}

fn build(world: &mut WorldState, ride_type: RideType, count: usize) {
    let data = ride_data();
    let config = GameConfig::default();
    let header = ActionHeader::new(ActionType::RIDE_CREATE);
    let action = RideCreateAction::new(ride_type, ObjectEntryIndex::NULL, 0, 0);
    for _ in 0..count {
        let mut ctx = ExecuteContext::new(world, GameEnv::new(&data, &config), &header);
        assert!(action.execute(&mut ctx).is_ok());
    }
}

/// World with one coaster in slot 0.
pub fn world_with_coaster() -> WorldState {
    let mut world = world();
    build(&mut world, COASTER, 1);
    world
}

/// World with `count` burger bars in slots `0..count`.
pub fn world_with_stalls(count: usize) -> WorldState {
    let mut world = world();
    build(&mut world, FOOD_STALL, count);
    world
}

/// Sink that keeps every packet for later inspection.
#[derive(Clone, Debug, Default)]
pub struct PacketLog(Arc<Mutex<Vec<ActionPacket>>>);

impl PacketLog {
    pub fn packets(&self) -> Vec<ActionPacket> {
        self.0.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

impl ActionSink for PacketLog {
    fn send(&mut self, packet: &ActionPacket) -> Result<(), SinkError> {
        self.0.lock().unwrap().push(packet.clone());
        Ok(())
    }
}
