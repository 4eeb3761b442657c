//! Plain data types that make up the world state.
mod common;
mod finance;
mod park;
mod ride;

pub use common::{
    Colour, CoordsXYZ, Money, ObjectEntryIndex, PlayerId, RideId, RideType, TileCoordsXY8,
};
pub use finance::{ExpenditureTable, ExpenditureType, FinanceState};
pub use park::{
    Cheats, MarketingCampaign, MarketingCampaignKind, Objective, ParkFlags, ParkState, ScreenMode,
};
pub use ride::{
    DepartFlags, EntranceStyle, InspectionInterval, LoadThreshold, Ride, RideLifecycleFlags,
    RideMode, RideStatus, RideTable, Station, TrackColour, VehicleColour, VehicleColourScheme,
};
