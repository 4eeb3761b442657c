//! Event types for different topics.

use park_core::state::CoordsXYZ;
use park_core::{ActionType, ErrorKind, FormatArg, Money, PlayerId, StringId, WindowClass};
use serde::{Deserialize, Serialize};

/// Where an action entered the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionOrigin {
    /// Submitted by the local player through [`crate::RuntimeHandle::submit`].
    Local,
    /// Received from another peer or replayed from a journal.
    Remote,
}

/// What happened to an action once the dispatcher was done with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionStatus {
    /// Execute ran and the world changed.
    Applied,
    /// Query passed on a client and the action went to the server.
    Forwarded,
    /// A gate, Query or Execute refused it, on this peer or on the server.
    Rejected,
}

/// Published on [`crate::Topic::Actions`] for every action the worker handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEvent {
    pub action_type: ActionType,
    pub player: PlayerId,
    /// Correlation id the action arrived with; zero for fresh local actions.
    pub network_id: u32,
    pub origin: ActionOrigin,
    pub status: ActionStatus,
    pub error_kind: ErrorKind,
    pub cost: Option<Money>,
}

/// Requests for the windowing layer, published on [`crate::Topic::Ui`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiEvent {
    Invalidate(WindowClass),
    Error {
        title: StringId,
        message: StringId,
        args: Vec<FormatArg>,
    },
    MoneyEffect {
        cost: Money,
        position: Option<CoordsXYZ>,
    },
}
