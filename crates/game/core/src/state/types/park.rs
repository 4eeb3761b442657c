use std::collections::BTreeSet;

use bitflags::bitflags;
use strum::{EnumIter, FromRepr, IntoStaticStr};

use super::Money;
use crate::env::ShopItem;

bitflags! {
    /// Park-wide rule switches set by the scenario.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ParkFlags: u32 {
        const PARK_OPEN       = 1 << 0;
        const NO_MONEY        = 1 << 11;
        const PARK_FREE_ENTRY = 1 << 13;
    }
}

/// Scenario goal. Only the variants that influence actions are modelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Objective {
    #[default]
    None,
    GuestsBy,
    ParkValueBy,
    BuildTheBest,
}

/// Marketing campaigns a park can buy. The discriminant is the wire value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, FromRepr, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum MarketingCampaignKind {
    ParkEntryFree = 0,
    RideFree = 1,
    ParkEntryHalfPrice = 2,
    FoodOrDrinkFree = 3,
    Park = 4,
    Ride = 5,
}

impl MarketingCampaignKind {
    pub const fn weekly_cost(self) -> Money {
        match self {
            Self::ParkEntryFree
            | Self::RideFree
            | Self::ParkEntryHalfPrice
            | Self::FoodOrDrinkFree => Money::new(50, 0),
            Self::Park => Money::new(350, 0),
            Self::Ride => Money::new(200, 0),
        }
    }
}

/// A campaign currently running in the park.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketingCampaign {
    pub kind: MarketingCampaignKind,
    pub weeks_left: u8,
}

/// Park-level settings mutated by administrative actions.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParkState {
    pub name: String,
    pub flags: ParkFlags,
    pub entrance_fee: Money,
    /// Shop items that share one price across every ride selling them.
    pub same_price_throughout: BTreeSet<ShopItem>,
    pub campaigns: Vec<MarketingCampaign>,
    pub objective: Objective,
}

impl ParkState {
    pub fn has_flag(&self, flag: ParkFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn money_enabled(&self) -> bool {
        !self.flags.contains(ParkFlags::NO_MONEY)
    }

    pub fn campaign(&self, kind: MarketingCampaignKind) -> Option<&MarketingCampaign> {
        self.campaigns.iter().find(|c| c.kind == kind)
    }

    pub fn has_common_price(&self, item: ShopItem) -> bool {
        self.same_price_throughout.contains(&item)
    }
}

/// Cheats that relax action validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cheats {
    pub unlock_all_prices: bool,
    pub build_in_pause_mode: bool,
}

/// Which top-level screen the game is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScreenMode {
    #[default]
    Playing,
    ScenarioEditor,
    TrackDesigner,
}
