//! Journal contracts.

use park_core::{ActionPacket, SinkError};
use serde::{Deserialize, Serialize};

use crate::repository::Result;

/// One applied action as stored in a journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    /// Position in the journal, starting at zero.
    pub sequence: u64,
    pub packet: ActionPacket,
}

/// Append side of the action journal.
///
/// Entries are applied actions in the order the world saw them. Replaying
/// them against the initial world reproduces the final world.
pub trait ActionLogWriter: Send {
    /// Appends a packet and returns its sequence number.
    fn append(&mut self, packet: &ActionPacket) -> Result<u64>;

    /// Flush buffered writes to the backing store.
    fn flush(&mut self) -> Result<()>;

    /// Number of entries written so far.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sequential read side of the action journal.
pub trait ActionLogReader {
    /// Returns `None` once every entry has been read.
    fn read_next(&mut self) -> Result<Option<ActionLogEntry>>;
}

/// Journals a packet handed over by the dispatcher.
///
/// Flushed per packet so the stored journal never lags the world.
pub(crate) fn journal(
    writer: &mut impl ActionLogWriter,
    packet: &ActionPacket,
) -> std::result::Result<(), SinkError> {
    writer
        .append(packet)
        .and_then(|_| writer.flush())
        .map_err(|err| SinkError::Rejected(err.to_string()))
}
