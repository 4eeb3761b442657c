//! Deterministic park rules shared by every peer.
//!
//! `park-core` defines the action model (parameters, Query, Execute and the
//! wire encoding), the dispatcher that runs actions against a
//! [`WorldState`], and the world state itself. Every mutation of the park
//! flows through [`engine::GameActions`]; runtimes, tools and tests all
//! depend on the types re-exported here.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod localisation;
pub mod state;
pub mod stream;
pub mod ui;

#[cfg(test)]
mod testing;

pub use action::{
    Action, ActionCallback, ActionFlags, ActionHeader, ActionOutput, ActionPacket,
    ActionRegistry, ActionRejection, ActionResult, ActionType, CommandFlags, ErrorKind, ExecuteContext,
    FormatArg, GameAction, Permissions, QueryContext, RideCreateAction, RideDemolishAction,
    SetCurrentLoanAction, SetParkEntranceFeeAction, SetParkNameAction, SetRidePriceAction,
    StartMarketingCampaignAction,
};
pub use config::GameConfig;
pub use engine::{ActionSink, GameActions, NetworkMode, Session};
pub use env::{
    GameEnv, OperatingSettings, RideDataOracle, RideEntry, RideTypeDescriptor, RideTypeFlags,
    ShopItem, StaticRideData, VehicleColourPresets,
};
pub use error::{ErrorSeverity, GameError, ProtocolError, SinkError, StreamError};
pub use localisation::StringId;
pub use state::{
    Cheats, ExpenditureType, FinanceState, MarketingCampaign, MarketingCampaignKind, Money,
    ObjectEntryIndex, Objective, ParkFlags, ParkState, PlayerId, Ride, RideId, RideTable,
    RideType, ScreenMode, StateChecksum, WorldState,
};
pub use stream::{DataField, DataSerialiser};
pub use ui::{NullWindowManager, RecordingWindowManager, WindowClass, WindowManager};
