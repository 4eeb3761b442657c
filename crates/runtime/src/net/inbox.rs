//! Decodes packets from peers and hands them to the simulation worker.

use std::sync::Arc;

use park_core::{
    Action, ActionPacket, ActionRegistry, ActionRejection, ActionResult, ActionType, NetworkMode,
    PlayerId,
};
use tracing::warn;

use crate::api::{Result, RuntimeHandle};

/// Receiving end of a peer connection.
///
/// Decoding happens on the caller's task so malformed packets are rejected
/// before they reach the simulation queue. On a server every decoded action
/// is stamped with the sending peer's player id; clients trust the server's
/// stamp.
#[derive(Clone)]
pub struct NetworkInbox {
    registry: Arc<ActionRegistry>,
    handle: RuntimeHandle,
    mode: NetworkMode,
}

impl NetworkInbox {
    pub fn new(registry: Arc<ActionRegistry>, handle: RuntimeHandle, mode: NetworkMode) -> Self {
        Self {
            registry,
            handle,
            mode,
        }
    }

    /// Turns raw packet bytes into an action attributed to `sender`.
    pub fn decode(&self, sender: PlayerId, bytes: &[u8]) -> Result<Action> {
        let packet = self.parse(sender, bytes)?;
        self.decode_packet(sender, &packet)
    }

    /// Runs the packet in `bytes` on the simulation worker.
    ///
    /// Actions run through the dispatcher. A server rejection completes the
    /// matching pending request; `None` means this peer had no request
    /// waiting for it.
    pub async fn receive(&self, sender: PlayerId, bytes: &[u8]) -> Result<Option<ActionResult>> {
        let packet = self.parse(sender, bytes)?;
        if packet.action_type == ActionType::REJECTION {
            let rejection = ActionRejection::from_packet(&packet).inspect_err(|err| {
                warn!(%sender, len = bytes.len(), error = %err, "dropping undecodable rejection");
            })?;
            return self.handle.deliver_rejection(rejection).await;
        }

        let action = self.decode_packet(sender, &packet)?;
        self.handle.deliver(action).await.map(Some)
    }

    fn parse(&self, sender: PlayerId, bytes: &[u8]) -> Result<ActionPacket> {
        let packet = ActionPacket::parse(bytes).inspect_err(|err| {
            warn!(%sender, len = bytes.len(), error = %err, "dropping packet without a header");
        })?;
        Ok(packet)
    }

    fn decode_packet(&self, sender: PlayerId, packet: &ActionPacket) -> Result<Action> {
        let mut action = self.registry.decode(packet).inspect_err(|err| {
            warn!(%sender, len = packet.encoded_len(), error = %err, "dropping undecodable packet");
        })?;

        if self.mode == NetworkMode::Server {
            action.set_player(sender);
        }
        Ok(action)
    }
}
