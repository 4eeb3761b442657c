//! Outcome of an action query or execution.

use arrayvec::ArrayVec;

use crate::error::StreamError;
use crate::localisation::StringId;
use crate::state::{CoordsXYZ, ExpenditureType, Money, RideId};
use crate::stream::{DataField, DataSerialiser};

/// Maximum number of message format arguments a result carries.
pub const MAX_FORMAT_ARGS: usize = 8;

// ============================================================================
// Error Kind
// ============================================================================

/// Outcome classification shared by every action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum ErrorKind {
    #[default]
    Ok = 0,
    InvalidParameters = 1,
    Disallowed = 2,
    GamePaused = 3,
    InsufficientFunds = 4,
    NotInEditorMode = 5,
    NotOwned = 6,
    TooLow = 7,
    TooHigh = 8,
    NoClearance = 9,
    ItemAlreadyPlaced = 10,
    NoFreeElements = 11,
    Unknown = 0xFFFF,
}

impl ErrorKind {
    pub const fn code(self) -> u16 {
        self as u16
    }

    pub const fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            0 => Self::Ok,
            1 => Self::InvalidParameters,
            2 => Self::Disallowed,
            3 => Self::GamePaused,
            4 => Self::InsufficientFunds,
            5 => Self::NotInEditorMode,
            6 => Self::NotOwned,
            7 => Self::TooLow,
            8 => Self::TooHigh,
            9 => Self::NoClearance,
            10 => Self::ItemAlreadyPlaced,
            11 => Self::NoFreeElements,
            0xFFFF => Self::Unknown,
            _ => return None,
        })
    }

    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::InvalidParameters => "INVALID_PARAMETERS",
            Self::Disallowed => "DISALLOWED",
            Self::GamePaused => "GAME_PAUSED",
            Self::InsufficientFunds => "INSUFFICIENT_FUNDS",
            Self::NotInEditorMode => "NOT_IN_EDITOR_MODE",
            Self::NotOwned => "NOT_OWNED",
            Self::TooLow => "TOO_LOW",
            Self::TooHigh => "TOO_HIGH",
            Self::NoClearance => "NO_CLEARANCE",
            Self::ItemAlreadyPlaced => "ITEM_ALREADY_PLACED",
            Self::NoFreeElements => "NO_FREE_ELEMENTS",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DataField for ErrorKind {
    fn write(&self, out: &mut Vec<u8>) -> Result<(), StreamError> {
        self.code().write(out)
    }

    fn read(stream: &mut DataSerialiser) -> Result<Self, StreamError> {
        let code = u16::read(stream)?;
        Self::from_code(code).ok_or(StreamError::InvalidErrorKind(code))
    }
}

// ============================================================================
// Message Arguments & Output
// ============================================================================

/// Typed substitution argument for an error message.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormatArg {
    Money(Money),
    StringId(StringId),
    Number(i64),
}

/// Action-specific payload of a successful result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionOutput {
    #[default]
    None,
    RideCreated {
        ride_index: RideId,
    },
}

// ============================================================================
// Action Result
// ============================================================================

/// Result of [`GameAction::query`](super::GameAction::query) or
/// [`GameAction::execute`](super::GameAction::execute).
///
/// The default value is a success with no cost. Cost, position and output
/// are only observable through their accessors while the result is ok.
/// Results are moved, never copied, so an outcome has exactly one owner.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ActionResult {
    error: ErrorKind,
    error_title: Option<StringId>,
    error_message: Option<StringId>,
    args: ArrayVec<FormatArg, MAX_FORMAT_ARGS>,
    position: Option<CoordsXYZ>,
    cost: Money,
    expenditure: Option<ExpenditureType>,
    output: ActionOutput,
}

impl ActionResult {
    /// A successful result.
    pub fn ok() -> Self {
        Self::default()
    }

    /// A failed result carrying the message to show the player.
    pub fn error(kind: ErrorKind, message: StringId) -> Self {
        Self {
            error: kind,
            error_message: Some(message),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: StringId) -> Self {
        self.error_title = Some(title);
        self
    }

    /// Appends a format argument; arguments past the eighth are dropped.
    #[must_use]
    pub fn with_arg(mut self, arg: FormatArg) -> Self {
        let _ = self.args.try_push(arg);
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: Money) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_expenditure(mut self, kind: ExpenditureType) -> Self {
        self.expenditure = Some(kind);
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: CoordsXYZ) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: ActionOutput) -> Self {
        self.output = output;
        self
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_ok()
    }

    pub fn error_kind(&self) -> ErrorKind {
        self.error
    }

    pub fn error_title(&self) -> Option<StringId> {
        self.error_title
    }

    pub fn error_message(&self) -> Option<StringId> {
        self.error_message
    }

    pub fn args(&self) -> &[FormatArg] {
        &self.args
    }

    pub fn expenditure(&self) -> Option<ExpenditureType> {
        self.expenditure
    }

    pub fn cost(&self) -> Option<Money> {
        self.is_ok().then_some(self.cost)
    }

    /// Where the effect happened. `None` on error and for actions without a location.
    pub fn position(&self) -> Option<CoordsXYZ> {
        self.position.filter(|_| self.is_ok())
    }

    pub fn output(&self) -> Option<ActionOutput> {
        self.is_ok().then_some(self.output)
    }

    /// Raw cost regardless of outcome; the affordability gate reads it from a passing query.
    pub(crate) fn raw_cost(&self) -> Money {
        self.cost
    }

    /// Rewrites the error kind, keeping message and arguments.
    pub(crate) fn set_error_kind(&mut self, kind: ErrorKind) {
        self.error = kind;
    }

    pub(crate) fn set_title_if_missing(&mut self, title: StringId) {
        if !title.is_none() {
            self.error_title.get_or_insert(title);
        }
    }
}
