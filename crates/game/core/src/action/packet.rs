//! Transport envelope around an encoded action.

use super::{Action, ActionType};
use crate::error::{ProtocolError, StreamError};

/// `[type:u32][body]`, where the body is the action's own serialisation.
///
/// Receivers read the type first so the registry can pick the right
/// factory before any body field is decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionPacket {
    pub action_type: ActionType,
    pub body: Vec<u8>,
}

impl ActionPacket {
    pub const HEADER_LEN: usize = 4;

    pub fn new(action_type: ActionType, body: Vec<u8>) -> Self {
        Self { action_type, body }
    }

    pub fn from_action(action: &Action) -> Result<Self, StreamError> {
        Ok(Self::new(action.action_type(), action.encode()?))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::HEADER_LEN + self.body.len());
        bytes.extend_from_slice(&self.action_type.0.to_be_bytes());
        bytes.extend_from_slice(&self.body);
        bytes
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let (head, body) = bytes
            .split_first_chunk::<{ Self::HEADER_LEN }>()
            .ok_or(ProtocolError::MissingHeader(Self::HEADER_LEN))?;
        Ok(Self::new(ActionType(u32::from_be_bytes(*head)), body.to_vec()))
    }

    /// Size of [`ActionPacket::to_bytes`] without building it.
    pub fn encoded_len(&self) -> usize {
        Self::HEADER_LEN + self.body.len()
    }
}
