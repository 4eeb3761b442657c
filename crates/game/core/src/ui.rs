//! Hooks into the windowing collaborator.
//!
//! The dispatcher reports what changed through a [`WindowManager`]; it never
//! knows how windows are drawn.

use strum::IntoStaticStr;

use crate::action::FormatArg;
use crate::localisation::StringId;
use crate::state::{CoordsXYZ, Money};

/// Window classes an action can ask to have redrawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum WindowClass {
    ParkInformation,
    RideList,
    Ride,
    Finances,
    BottomToolbar,
}

/// Capability implemented by the UI layer.
pub trait WindowManager {
    fn invalidate_by_class(&mut self, class: WindowClass);

    /// Opens the error window for a failed local action.
    fn show_error(&mut self, title: StringId, message: StringId, args: &[FormatArg]);

    /// Floating cash indicator for money spent by an action.
    fn money_effect(&mut self, _cost: Money, _position: Option<CoordsXYZ>) {}
}

/// Window manager for headless sessions.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullWindowManager;

impl WindowManager for NullWindowManager {
    fn invalidate_by_class(&mut self, _class: WindowClass) {}

    fn show_error(&mut self, _title: StringId, _message: StringId, _args: &[FormatArg]) {}
}

/// Window manager that records every call; handy for asserting on UI side effects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingWindowManager {
    pub invalidated: Vec<WindowClass>,
    pub errors: Vec<(StringId, StringId, Vec<FormatArg>)>,
    pub money_effects: Vec<Money>,
}

impl WindowManager for RecordingWindowManager {
    fn invalidate_by_class(&mut self, class: WindowClass) {
        self.invalidated.push(class);
    }

    fn show_error(&mut self, title: StringId, message: StringId, args: &[FormatArg]) {
        self.errors.push((title, message, args.to_vec()));
    }

    fn money_effect(&mut self, cost: Money, _position: Option<CoordsXYZ>) {
        self.money_effects.push(cost);
    }
}
