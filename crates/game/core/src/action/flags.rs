use bitflags::bitflags;

use crate::error::StreamError;
use crate::stream::{DataField, DataSerialiser};

bitflags! {
    /// Runtime flags supplied by whoever issues the action.
    ///
    /// These are input, not behaviour. Bits this crate does not name are kept
    /// as-is so a newer peer's flags survive a round trip.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CommandFlags: u32 {
        const APPLY               = 1 << 0;
        const REPLAY              = 1 << 1;
        const ALLOW_DURING_PAUSED = 1 << 3;
        /// Transport-level "no spend": previews that must never cost money.
        const NO_SPEND            = 1 << 5;
        /// Preview placement; never replicated.
        const GHOST               = 1 << 6;
        const NETWORKED           = 1 << 31;

        const _ = !0;
    }
}

bitflags! {
    /// Execution constraints an action declares about itself.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ActionFlags: u16 {
        const ALLOW_WHILE_PAUSED = 1 << 0;
        /// Runs only on the issuing peer; never sent or journaled.
        const CLIENT_ONLY        = 1 << 1;
        const EDITOR_ONLY        = 1 << 2;
    }
}

bitflags! {
    /// Capabilities a multiplayer group grants its members.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Permissions: u32 {
        const RIDE_CONSTRUCTION = 1 << 0;
        const RIDE_PROPERTIES   = 1 << 1;
        const PARK_PROPERTIES   = 1 << 2;
        const PARK_FUNDING      = 1 << 3;
        const EDIT_SCENERY      = 1 << 4;
    }
}

impl DataField for CommandFlags {
    fn write(&self, out: &mut Vec<u8>) -> Result<(), StreamError> {
        self.bits().write(out)
    }

    fn read(stream: &mut DataSerialiser) -> Result<Self, StreamError> {
        Ok(Self::from_bits_retain(u32::read(stream)?))
    }
}
