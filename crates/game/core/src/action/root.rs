//! The action envelope: header, payload and completion callback.

use std::fmt;

use super::{ActionFlags, ActionResult, ActionType, CommandFlags, GameAction, Permissions};
use crate::error::StreamError;
use crate::stream::DataSerialiser;
use crate::state::PlayerId;

/// Single-shot completion handler, invoked once the dispatcher is done with an action.
pub type ActionCallback = Box<dyn FnOnce(&Action, &ActionResult) + Send>;

/// Fields every action carries regardless of its type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionHeader {
    action_type: ActionType,
    pub player: PlayerId,
    pub flags: CommandFlags,
    /// Correlates a client request with the server echo. Zero until sent.
    pub network_id: u32,
}

impl ActionHeader {
    pub fn new(action_type: ActionType) -> Self {
        Self {
            action_type,
            player: PlayerId::NONE,
            flags: CommandFlags::empty(),
            network_id: 0,
        }
    }

    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    /// Writes or reads the common prefix: network id, flags, player.
    pub fn serialise(&mut self, stream: &mut DataSerialiser) -> Result<(), StreamError> {
        stream
            .field(&mut self.network_id)?
            .field(&mut self.flags)?
            .field(&mut self.player)?;
        Ok(())
    }
}

/// A command requesting one mutation of the park.
///
/// The type tag is fixed at construction. The payload holds the parameters
/// specific to the concrete action and is not changed after construction,
/// except by deserialisation into a blank instance.
pub struct Action {
    header: ActionHeader,
    callback: Option<ActionCallback>,
    payload: Box<dyn GameAction>,
}

impl Action {
    pub fn new<T: GameAction + 'static>(payload: T) -> Self {
        Self::from_boxed(Box::new(payload))
    }

    pub fn from_boxed(payload: Box<dyn GameAction>) -> Self {
        Self {
            header: ActionHeader::new(payload.action_type()),
            callback: None,
            payload,
        }
    }

    #[must_use]
    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.header.player = player;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: CommandFlags) -> Self {
        self.header.flags = flags;
        self
    }

    #[must_use]
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&Action, &ActionResult) + Send + 'static,
    {
        self.set_callback(callback);
        self
    }

    pub fn header(&self) -> &ActionHeader {
        &self.header
    }

    pub fn action_type(&self) -> ActionType {
        self.header.action_type
    }

    pub fn player(&self) -> PlayerId {
        self.header.player
    }

    pub fn set_player(&mut self, player: PlayerId) {
        self.header.player = player;
    }

    pub fn flags(&self) -> CommandFlags {
        self.header.flags
    }

    pub fn set_flags(&mut self, flags: CommandFlags) {
        self.header.flags = flags;
    }

    pub fn network_id(&self) -> u32 {
        self.header.network_id
    }

    pub fn set_network_id(&mut self, id: u32) {
        self.header.network_id = id;
    }

    pub fn set_callback<F>(&mut self, callback: F)
    where
        F: FnOnce(&Action, &ActionResult) + Send + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    pub(crate) fn take_callback(&mut self) -> Option<ActionCallback> {
        self.callback.take()
    }

    pub(crate) fn attach_callback(&mut self, callback: ActionCallback) {
        self.callback = Some(callback);
    }

    /// Execution constraints of this instance.
    ///
    /// Ghost previews and no-spend requests are always client-only; the
    /// concrete action may add more flags on top.
    pub fn action_flags(&self) -> ActionFlags {
        let base = if self
            .header
            .flags
            .intersects(CommandFlags::GHOST | CommandFlags::NO_SPEND)
        {
            ActionFlags::CLIENT_ONLY
        } else {
            ActionFlags::empty()
        };
        self.payload.action_flags(base)
    }

    pub fn required_permission(&self) -> Permissions {
        self.payload.required_permission()
    }

    pub fn payload(&self) -> &dyn GameAction {
        self.payload.as_ref()
    }

    /// Downcasts the payload to its concrete type.
    pub fn payload_as<T: GameAction + 'static>(&self) -> Option<&T> {
        self.payload.as_any().downcast_ref::<T>()
    }

    /// Writes or reads the header followed by the payload fields.
    pub fn serialise(&mut self, stream: &mut DataSerialiser) -> Result<(), StreamError> {
        self.header.serialise(stream)?;
        self.payload.serialise(stream)
    }

    /// Encodes the body without touching `self`.
    ///
    /// Goes through a private copy, so the bytes are identical to what
    /// [`Action::serialise`] writes.
    pub fn encode(&self) -> Result<Vec<u8>, StreamError> {
        let mut header = self.header.clone();
        let mut payload = self.payload.clone_boxed();
        let mut stream = DataSerialiser::for_writing();
        header.serialise(&mut stream)?;
        payload.serialise(&mut stream)?;
        Ok(stream.into_bytes())
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("header", &self.header)
            .field("payload", &self.payload)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}
