//! In-memory action journal.
//!
//! Clones share the stored entries but keep their own read position, so a
//! test can hand one clone to a session as its journal and replay another.

use std::sync::{Arc, Mutex};

use park_core::{ActionPacket, ActionSink, SinkError};

use crate::repository::traits::{self, ActionLogEntry, ActionLogReader, ActionLogWriter};
use crate::repository::{RepositoryError, Result};

#[derive(Clone, Debug, Default)]
pub struct InMemoryActionLog {
    entries: Arc<Mutex<Vec<ActionLogEntry>>>,
    position: usize,
}

impl InMemoryActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored entry.
    pub fn entries(&self) -> Result<Vec<ActionLogEntry>> {
        Ok(self.lock()?.clone())
    }

    /// Reader positioned at the first entry.
    pub fn reader(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            position: 0,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<ActionLogEntry>>> {
        self.entries.lock().map_err(|_| RepositoryError::LockPoisoned)
    }
}

impl ActionLogWriter for InMemoryActionLog {
    fn append(&mut self, packet: &ActionPacket) -> Result<u64> {
        let mut entries = self.lock()?;
        let sequence = entries.len() as u64;
        entries.push(ActionLogEntry {
            sequence,
            packet: packet.clone(),
        });
        Ok(sequence)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn len(&self) -> u64 {
        self.lock().map_or(0, |entries| entries.len() as u64)
    }
}

impl ActionLogReader for InMemoryActionLog {
    fn read_next(&mut self) -> Result<Option<ActionLogEntry>> {
        let entry = self.lock()?.get(self.position).cloned();
        if entry.is_some() {
            self.position += 1;
        }
        Ok(entry)
    }
}

impl ActionSink for InMemoryActionLog {
    fn send(&mut self, packet: &ActionPacket) -> std::result::Result<(), SinkError> {
        traits::journal(self, packet)
    }
}

#[cfg(test)]
mod tests {
    use park_core::ActionType;

    use super::*;

    #[test]
    fn clones_share_entries_but_not_position() {
        let mut writer = InMemoryActionLog::new();
        let mut first = writer.reader();

        writer
            .send(&ActionPacket::new(ActionType::SET_PARK_NAME, vec![0, 1, b'x']))
            .unwrap();
        writer
            .send(&ActionPacket::new(ActionType::SET_CURRENT_LOAN, vec![0; 4]))
            .unwrap();

        assert_eq!(first.read_next().unwrap().unwrap().sequence, 0);
        let mut second = writer.reader();
        assert_eq!(
            second.read_next().unwrap().unwrap().packet.action_type,
            ActionType::SET_PARK_NAME
        );
        assert_eq!(
            first.read_next().unwrap().unwrap().packet.action_type,
            ActionType::SET_CURRENT_LOAN
        );
        assert!(first.read_next().unwrap().is_none());
        assert_eq!(writer.len(), 2);
    }
}
