//! Identifiers of user-facing strings attached to action results.
//!
//! The core never renders text; it hands string ids and format arguments to
//! the window collaborator, which owns the language tables.

use std::fmt;

/// Index into the language string table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StringId(pub u16);

impl StringId {
    pub const NONE: Self = Self(u16::MAX);

    pub const CANT_START_MARKETING_CAMPAIGN: Self = Self(1260);
    pub const CANT_CHANGE_OPERATING_MODE: Self = Self(1101);
    pub const CANT_DEMOLISH_RIDE: Self = Self(1093);
    pub const CANT_CHANGE_PARK_ENTRANCE_FEE: Self = Self(1730);
    pub const CANT_RENAME_PARK: Self = Self(1734);
    pub const CANT_BORROW_ANY_MORE_MONEY: Self = Self(2011);
    pub const CANT_PAY_BACK_LOAN: Self = Self(2012);
    pub const CANT_CREATE_NEW_RIDE: Self = Self(1086);
    pub const CANT_CHANGE_PRICE: Self = Self(1306);

    pub const INVALID_RIDE_TYPE: Self = Self(1170);
    pub const UNKNOWN_OBJECT_TYPE: Self = Self(2999);
    pub const TOO_MANY_RIDES: Self = Self(1087);
    pub const NOT_ENOUGH_CASH_REQUIRES: Self = Self(827);
    pub const NOT_ENOUGH_CASH_AVAILABLE: Self = Self(2010);
    pub const CONSTRUCTION_NOT_POSSIBLE_WHILE_GAME_IS_PAUSED: Self = Self(1180);
    pub const THIS_CAN_ONLY_BE_USED_IN_THE_EDITOR: Self = Self(2789);
    pub const INSUFFICIENT_PERMISSIONS: Self = Self(2989);
    pub const BANK_REFUSES_TO_INCREASE_LOAN: Self = Self(2013);
    pub const PARK_ENTRY_ALWAYS_FREE: Self = Self(1731);
    pub const MONEY_DISABLED: Self = Self(2997);
    pub const INVALID_NAME_FOR_PARK: Self = Self(1735);
    pub const RIDE_NOT_FOUND: Self = Self(2998);
    pub const RIDE_IS_INDESTRUCTIBLE: Self = Self(3005);
    pub const CAMPAIGN_ALREADY_RUNNING: Self = Self(3006);
    pub const INVALID_CAMPAIGN_DURATION: Self = Self(3007);

    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }
}

impl Default for StringId {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for StringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("STR_NONE")
        } else {
            write!(f, "STR_{:04}", self.0)
        }
    }
}
