//! Action domain: the command objects that mediate every park mutation.
//!
//! # Module Structure
//!
//! - `types`: stable [`ActionType`] tags
//! - `flags`: [`CommandFlags`] (input), [`ActionFlags`] (behaviour), [`Permissions`]
//! - `result`: [`ActionResult`] and its [`ErrorKind`]
//! - `context`: world views passed to Query and Execute
//! - `root`: the [`Action`] envelope (header, payload, callback)
//! - `registry`: type tag to factory table used to decode packets
//! - `packet`: `[type][body]` envelope for transports and journals
//! - `rejection`: server reply to a forwarded request that failed
//! - `kinds`: concrete actions

pub mod context;
pub mod flags;
pub mod kinds;
pub mod packet;
pub mod registry;
pub mod rejection;
pub mod result;
pub mod root;
pub mod types;

use std::any::Any;
use std::fmt;

pub use context::{ExecuteContext, QueryContext};
pub use flags::{ActionFlags, CommandFlags, Permissions};
pub use kinds::{
    RideCreateAction, RideDemolishAction, SetCurrentLoanAction, SetParkEntranceFeeAction,
    SetParkNameAction, SetRidePriceAction, StartMarketingCampaignAction,
};
pub use packet::ActionPacket;
pub use registry::{ActionFactory, ActionRegistry};
pub use rejection::ActionRejection;
pub use result::{ActionOutput, ActionResult, ErrorKind, FormatArg, MAX_FORMAT_ARGS};
pub use root::{Action, ActionCallback, ActionHeader};
pub use types::ActionType;

use crate::error::StreamError;
use crate::localisation::StringId;
use crate::stream::DataSerialiser;

/// Behaviour of one concrete action type.
///
/// Query must not mutate anything and Execute may assume a passing Query
/// ran against the same world. Both are pure functions of the parameters
/// and the world they are handed.
pub trait GameAction: ActionClone + Send + fmt::Debug {
    fn action_type(&self) -> ActionType;

    /// Adds type-specific flags to the header-derived `base`.
    fn action_flags(&self, base: ActionFlags) -> ActionFlags {
        base
    }

    /// Capability the issuing player must hold in multiplayer.
    fn required_permission(&self) -> Permissions;

    /// Title of the error window when this action fails.
    fn error_title(&self) -> StringId {
        StringId::NONE
    }

    /// Writes or reads the parameters, in their declared wire order.
    fn serialise(&mut self, stream: &mut DataSerialiser) -> Result<(), StreamError>;

    fn query(&self, ctx: &QueryContext<'_>) -> ActionResult;

    fn execute(&self, ctx: &mut ExecuteContext<'_>) -> ActionResult;
}

/// Object-safe cloning and downcasting for boxed actions.
pub trait ActionClone {
    fn clone_boxed(&self) -> Box<dyn GameAction>;

    fn as_any(&self) -> &dyn Any;
}

impl<T> ActionClone for T
where
    T: GameAction + Clone + 'static,
{
    fn clone_boxed(&self) -> Box<dyn GameAction> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
