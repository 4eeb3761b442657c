//! Server reply to a forwarded request it refused.

use super::{Action, ActionPacket, ActionResult, ActionType, ErrorKind};
use crate::error::{ProtocolError, StreamError};
use crate::localisation::StringId;
use crate::state::PlayerId;
use crate::stream::DataSerialiser;

/// Tells a client that the server refused its request `network_id`.
///
/// Travels as an [`ActionPacket`] tagged [`ActionType::REJECTION`] with the
/// fields in declaration order. Format arguments are not carried, so the
/// client's error window shows the title and message without them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionRejection {
    pub network_id: u32,
    pub player: PlayerId,
    pub action_type: ActionType,
    pub error: ErrorKind,
    pub title: StringId,
    pub message: StringId,
}

impl ActionRejection {
    pub fn new(action: &Action, result: &ActionResult) -> Self {
        Self {
            network_id: action.network_id(),
            player: action.player(),
            action_type: action.action_type(),
            error: result.error_kind(),
            title: result.error_title().unwrap_or_default(),
            message: result.error_message().unwrap_or_default(),
        }
    }

    fn serialise(&mut self, stream: &mut DataSerialiser) -> Result<(), StreamError> {
        stream
            .field(&mut self.network_id)?
            .field(&mut self.player)?
            .field(&mut self.action_type)?
            .field(&mut self.error)?
            .field(&mut self.title)?
            .field(&mut self.message)?;
        Ok(())
    }

    pub fn to_packet(&self) -> Result<ActionPacket, StreamError> {
        let mut fields = *self;
        let mut stream = DataSerialiser::for_writing();
        fields.serialise(&mut stream)?;
        Ok(ActionPacket::new(ActionType::REJECTION, stream.into_bytes()))
    }

    pub fn from_packet(packet: &ActionPacket) -> Result<Self, ProtocolError> {
        if packet.action_type != ActionType::REJECTION {
            return Err(ProtocolError::UnknownActionType(packet.action_type));
        }
        let mut rejection = Self {
            network_id: 0,
            player: PlayerId::NONE,
            action_type: ActionType::REJECTION,
            error: ErrorKind::Unknown,
            title: StringId::NONE,
            message: StringId::NONE,
        };
        let mut stream = DataSerialiser::for_reading(packet.body.as_slice());
        rejection
            .serialise(&mut stream)
            .and_then(|()| stream.finish())
            .map_err(|source| ProtocolError::Malformed {
                action_type: ActionType::REJECTION,
                source,
            })?;
        Ok(rejection)
    }

    /// The failed result the original request completes with.
    ///
    /// A rejection never completes a request successfully; an `Ok` kind on
    /// the wire is read as [`ErrorKind::Unknown`].
    pub fn to_result(&self) -> ActionResult {
        let kind = if self.error.is_ok() {
            ErrorKind::Unknown
        } else {
            self.error
        };
        ActionResult::error(kind, self.message).with_title(self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refused() -> ActionRejection {
        ActionRejection {
            network_id: 9,
            player: PlayerId(2),
            action_type: ActionType::START_MARKETING_CAMPAIGN,
            error: ErrorKind::Disallowed,
            title: StringId::CANT_START_MARKETING_CAMPAIGN,
            message: StringId::INSUFFICIENT_PERMISSIONS,
        }
    }

    #[test]
    fn rejection_layout_follows_the_field_order() {
        let packet = refused().to_packet().unwrap();
        let bytes = packet.to_bytes();

        assert_eq!(&bytes[..4], &[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(
            &bytes[4..],
            &[
                0, 0, 0, 9, // network id
                0, 0, 0, 2, // player
                0, 0, 0, 58, // action type
                0, 2, // error kind
                0x04, 0xEC, // title
                0x0B, 0xAD, // message
            ]
        );
        assert_eq!(ActionRejection::from_packet(&packet).unwrap(), refused());
    }

    #[test]
    fn unknown_error_codes_are_malformed() {
        let mut packet = refused().to_packet().unwrap();
        packet.body[12..14].copy_from_slice(&[0x12, 0x34]);

        assert_eq!(
            ActionRejection::from_packet(&packet),
            Err(ProtocolError::Malformed {
                action_type: ActionType::REJECTION,
                source: StreamError::InvalidErrorKind(0x1234),
            })
        );
    }

    #[test]
    fn ordinary_packets_are_not_rejections() {
        let packet = ActionPacket::new(ActionType::SET_PARK_NAME, Vec::new());
        assert_eq!(
            ActionRejection::from_packet(&packet),
            Err(ProtocolError::UnknownActionType(ActionType::SET_PARK_NAME))
        );
    }

    #[test]
    fn rejection_result_is_always_a_failure() {
        let result = refused().to_result();
        assert_eq!(result.error_kind(), ErrorKind::Disallowed);
        assert_eq!(result.error_title(), Some(StringId::CANT_START_MARKETING_CAMPAIGN));
        assert_eq!(result.error_message(), Some(StringId::INSUFFICIENT_PERMISSIONS));

        let bogus = ActionRejection {
            error: ErrorKind::Ok,
            ..refused()
        };
        assert_eq!(bogus.to_result().error_kind(), ErrorKind::Unknown);
    }
}
