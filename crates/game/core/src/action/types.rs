//! Stable action type tags.

use std::fmt;

use crate::error::StreamError;
use crate::stream::{DataField, DataSerialiser};

/// Numeric tag selecting the concrete action behind a packet.
///
/// Tags are part of the network protocol: once assigned, a tag is never
/// reused for a different action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActionType(pub u32);

impl ActionType {
    pub const RIDE_CREATE: Self = Self(6);
    pub const RIDE_DEMOLISH: Self = Self(7);
    pub const SET_RIDE_PRICE: Self = Self(21);
    pub const SET_PARK_NAME: Self = Self(34);
    pub const SET_PARK_ENTRANCE_FEE: Self = Self(40);
    pub const SET_CURRENT_LOAN: Self = Self(41);
    pub const START_MARKETING_CAMPAIGN: Self = Self(58);

    /// Tags a server's [`ActionRejection`](super::ActionRejection) reply.
    /// Never registered as an action.
    pub const REJECTION: Self = Self(u32::MAX);

    /// Human-readable name of a built-in tag, for logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::RIDE_CREATE => "ride_create",
            Self::RIDE_DEMOLISH => "ride_demolish",
            Self::SET_RIDE_PRICE => "set_ride_price",
            Self::SET_PARK_NAME => "set_park_name",
            Self::SET_PARK_ENTRANCE_FEE => "set_park_entrance_fee",
            Self::SET_CURRENT_LOAN => "set_current_loan",
            Self::START_MARKETING_CAMPAIGN => "start_marketing_campaign",
            Self::REJECTION => "rejection",
            _ => "unknown",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.0)
    }
}

impl DataField for ActionType {
    fn write(&self, out: &mut Vec<u8>) -> Result<(), StreamError> {
        self.0.write(out)
    }

    fn read(stream: &mut DataSerialiser) -> Result<Self, StreamError> {
        Ok(Self(u32::read(stream)?))
    }
}
