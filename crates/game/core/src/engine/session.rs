//! Network role and per-peer bookkeeping for the dispatcher.

use std::collections::HashMap;
use std::fmt;

use crate::action::{Action, ActionCallback, ActionPacket, Permissions};
use crate::error::SinkError;
use crate::state::PlayerId;

/// Destination for encoded actions: a network connection or a journal.
pub trait ActionSink: Send {
    fn send(&mut self, packet: &ActionPacket) -> Result<(), SinkError>;
}

/// Role this peer plays in a multiplayer game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NetworkMode {
    /// Single player: actions apply immediately.
    #[default]
    None,
    /// Authoritative host: applies actions and broadcasts them to clients.
    Server,
    /// Sends actions to the server and applies them when echoed back.
    Client,
}

/// A forwarded request waiting for the server's echo or rejection.
pub(crate) struct PendingRequest {
    pub action: Action,
    pub callback: Option<ActionCallback>,
}

/// Everything the dispatcher needs to know about the peer it runs on.
pub struct Session {
    mode: NetworkMode,
    local_player: PlayerId,
    permissions: HashMap<PlayerId, Permissions>,
    default_permissions: Permissions,
    next_network_id: u32,
    pending: HashMap<u32, PendingRequest>,
    outbound: Option<Box<dyn ActionSink>>,
    journal: Option<Box<dyn ActionSink>>,
}

impl Session {
    pub fn new(mode: NetworkMode, local_player: PlayerId) -> Self {
        Self {
            mode,
            local_player,
            permissions: HashMap::new(),
            default_permissions: Permissions::all(),
            next_network_id: 1,
            pending: HashMap::new(),
            outbound: None,
            journal: None,
        }
    }

    /// Single-player session.
    pub fn offline() -> Self {
        Self::new(NetworkMode::None, PlayerId::NONE)
    }

    pub fn server(local_player: PlayerId) -> Self {
        Self::new(NetworkMode::Server, local_player)
    }

    pub fn client(local_player: PlayerId) -> Self {
        Self::new(NetworkMode::Client, local_player)
    }

    #[must_use]
    pub fn with_outbound(mut self, sink: impl ActionSink + 'static) -> Self {
        self.outbound = Some(Box::new(sink));
        self
    }

    #[must_use]
    pub fn with_journal(mut self, sink: impl ActionSink + 'static) -> Self {
        self.journal = Some(Box::new(sink));
        self
    }

    pub fn set_outbound(&mut self, sink: Option<Box<dyn ActionSink>>) {
        self.outbound = sink;
    }

    pub fn set_journal(&mut self, sink: Option<Box<dyn ActionSink>>) {
        self.journal = sink;
    }

    pub fn mode(&self) -> NetworkMode {
        self.mode
    }

    pub fn local_player(&self) -> PlayerId {
        self.local_player
    }

    /// True for the local player and for actions nobody has claimed yet.
    pub fn is_local(&self, player: PlayerId) -> bool {
        player == self.local_player || player.is_none()
    }

    pub fn set_permissions(&mut self, player: PlayerId, permissions: Permissions) {
        self.permissions.insert(player, permissions);
    }

    /// Permissions for players without an explicit entry.
    pub fn set_default_permissions(&mut self, permissions: Permissions) {
        self.default_permissions = permissions;
    }

    pub fn permissions(&self, player: PlayerId) -> Permissions {
        self.permissions
            .get(&player)
            .copied()
            .unwrap_or(self.default_permissions)
    }

    /// Offline play and the local player bypass the permission table.
    pub fn has_permission(&self, player: PlayerId, required: Permissions) -> bool {
        self.mode == NetworkMode::None
            || self.is_local(player)
            || self.permissions(player).contains(required)
    }

    /// Next correlation id for an outgoing request. Never zero.
    pub fn next_network_id(&mut self) -> u32 {
        let id = self.next_network_id;
        self.next_network_id = self.next_network_id.wrapping_add(1).max(1);
        id
    }

    pub(crate) fn park_request(
        &mut self,
        network_id: u32,
        action: Action,
        callback: Option<ActionCallback>,
    ) {
        self.pending
            .insert(network_id, PendingRequest { action, callback });
    }

    pub(crate) fn take_pending(&mut self, network_id: u32) -> Option<PendingRequest> {
        self.pending.remove(&network_id)
    }

    /// Requests still waiting for the server's echo or rejection.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Sends to the server (client) or to every peer (server).
    pub(crate) fn send(&mut self, packet: &ActionPacket) -> Result<(), SinkError> {
        match self.outbound.as_mut() {
            Some(sink) => sink.send(packet),
            None if self.mode == NetworkMode::Client => Err(SinkError::Closed),
            None => Ok(()),
        }
    }

    pub(crate) fn record(&mut self, packet: &ActionPacket) -> Result<(), SinkError> {
        match self.journal.as_mut() {
            Some(sink) => sink.send(packet),
            None => Ok(()),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::offline()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("mode", &self.mode)
            .field("local_player", &self.local_player)
            .field("permissions", &self.permissions)
            .field("next_network_id", &self.next_network_id)
            .field("pending", &self.pending.len())
            .field("has_outbound", &self.outbound.is_some())
            .field("has_journal", &self.journal.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_ids_skip_zero_on_wrap() {
        let mut session = Session::client(PlayerId(2));
        session.next_network_id = u32::MAX;

        assert_eq!(session.next_network_id(), u32::MAX);
        assert_eq!(session.next_network_id(), 1);
    }

    #[test]
    fn permissions_fall_back_to_the_default_group() {
        let mut session = Session::server(PlayerId(1));
        session.set_default_permissions(Permissions::RIDE_PROPERTIES);
        session.set_permissions(PlayerId(5), Permissions::PARK_FUNDING);

        assert!(session.has_permission(PlayerId(1), Permissions::PARK_FUNDING));
        assert!(session.has_permission(PlayerId(5), Permissions::PARK_FUNDING));
        assert!(!session.has_permission(PlayerId(6), Permissions::PARK_FUNDING));
        assert!(session.has_permission(PlayerId(6), Permissions::RIDE_PROPERTIES));
    }

    #[test]
    fn client_without_transport_cannot_send() {
        let packet = ActionPacket::new(crate::action::ActionType::SET_PARK_NAME, Vec::new());
        assert_eq!(
            Session::client(PlayerId(2)).send(&packet),
            Err(SinkError::Closed)
        );
        assert_eq!(Session::offline().send(&packet), Ok(()));
    }
}
