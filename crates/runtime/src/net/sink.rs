//! Outbound packet channel.

use tokio::sync::mpsc;

use park_core::{ActionPacket, ActionSink, SinkError};

/// [`ActionSink`] that queues encoded packets for a transport task.
///
/// The dispatcher runs on the simulation worker and must not block, so the
/// queue is unbounded; the transport drains it at its own pace.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Vec<u8>>,
}

impl ChannelSink {
    /// Creates a sink and the receiver a transport reads packet bytes from.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Vec<u8>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ActionSink for ChannelSink {
    fn send(&mut self, packet: &ActionPacket) -> Result<(), SinkError> {
        self.tx
            .send(packet.to_bytes())
            .map_err(|_| SinkError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use park_core::ActionType;

    use super::*;

    #[test]
    fn packets_arrive_as_wire_bytes() {
        let (mut sink, mut rx) = ChannelSink::new();
        let packet = ActionPacket::new(ActionType::SET_CURRENT_LOAN, vec![0, 0, 1, 0]);

        sink.send(&packet).unwrap();

        assert_eq!(rx.try_recv().unwrap(), packet.to_bytes());
    }

    #[test]
    fn dropped_receiver_closes_the_sink() {
        let (mut sink, rx) = ChannelSink::new();
        drop(rx);

        let packet = ActionPacket::new(ActionType::SET_CURRENT_LOAN, Vec::new());
        assert_eq!(sink.send(&packet), Err(SinkError::Closed));
    }
}
