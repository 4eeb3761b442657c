//! Append-only action journal on disk.
//!
//! Each entry is stored as:
//! ```text
//! [u32 length LE][bincode serialized ActionLogEntry]
//! ```
//! The entry wraps the action's network packet, so the journal replays
//! through the same decoder peers use.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use park_core::{ActionPacket, ActionSink, SinkError};

use crate::repository::traits::{self, ActionLogEntry, ActionLogReader, ActionLogWriter};
use crate::repository::{RepositoryError, Result};

const LEN_PREFIX: u64 = 4;
const WRITE_BUFFER: usize = 1024 * 1024;

/// Journal writer backed by a file.
pub struct FileActionLog {
    path: PathBuf,
    writer: BufWriter<File>,
    current_offset: u64,
    entries: u64,
}

impl FileActionLog {
    /// Create a new journal.
    ///
    /// # Errors
    ///
    /// Returns error if the file already exists; journals are never overwritten.
    pub fn create(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        std::fs::create_dir_all(base_dir)?;

        let path = base_dir.join(filename.as_ref());
        if path.exists() {
            return Err(RepositoryError::LogAlreadyExists(
                path.display().to_string(),
            ));
        }

        let file = OpenOptions::new().create_new(true).write(true).open(&path)?;
        tracing::debug!("Created action journal: {}", path.display());

        Ok(Self {
            path,
            writer: BufWriter::with_capacity(WRITE_BUFFER, file),
            current_offset: 0,
            entries: 0,
        })
    }

    /// Open an existing journal for appending.
    ///
    /// Every stored entry is read once to recover the next sequence number;
    /// a torn trailing entry is reported as corruption.
    pub fn open(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let path = base_dir.as_ref().join(filename.as_ref());

        let mut reader = FileActionLogReader::open(&path)?;
        let mut entries = 0;
        while reader.read_next()?.is_some() {
            entries += 1;
        }

        let file = OpenOptions::new().append(true).open(&path)?;
        let current_offset = file.metadata()?.len();
        tracing::debug!(
            "Opened action journal: {} with {} entries",
            path.display(),
            entries
        );

        Ok(Self {
            path,
            writer: BufWriter::with_capacity(WRITE_BUFFER, file),
            current_offset,
            entries,
        })
    }

    /// Read the entry at a specific byte offset.
    ///
    /// Returns `None` if the offset is at or past the end of the file, and
    /// `Some((entry, next_offset))` otherwise. Only flushed entries are visible.
    pub fn read_at_offset(&self, byte_offset: u64) -> Result<Option<(ActionLogEntry, u64)>> {
        let file = File::open(&self.path)?;
        let file_size = file.metadata()?.len();
        if byte_offset >= file_size {
            return Ok(None);
        }

        let mut reader = BufReader::new(file);
        reader.seek(SeekFrom::Start(byte_offset))?;
        read_entry(&mut reader, byte_offset, file_size).map(Some)
    }

    /// Bytes written so far, buffered ones included.
    pub fn size(&self) -> u64 {
        self.current_offset
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ActionLogWriter for FileActionLog {
    fn append(&mut self, packet: &ActionPacket) -> Result<u64> {
        let sequence = self.entries;
        let entry = ActionLogEntry {
            sequence,
            packet: packet.clone(),
        };

        let frame = encode_frame(&entry)?;
        self.writer.write_all(&frame)?;

        self.current_offset += frame.len() as u64;
        self.entries += 1;
        Ok(sequence)
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn len(&self) -> u64 {
        self.entries
    }
}

impl ActionSink for FileActionLog {
    fn send(&mut self, packet: &ActionPacket) -> std::result::Result<(), SinkError> {
        traits::journal(self, packet)
    }
}

impl Drop for FileActionLog {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!(
                "Failed to flush action journal '{}' on drop: {}",
                self.path.display(),
                e
            );
        }
    }
}

/// Sequential reader over a journal file.
///
/// The file size is sampled when the reader opens; entries appended later
/// are not seen.
pub struct FileActionLogReader {
    path: PathBuf,
    reader: BufReader<File>,
    offset: u64,
    file_size: u64,
    next_sequence: u64,
}

impl FileActionLogReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let file_size = file.metadata()?.len();

        Ok(Self {
            path,
            reader: BufReader::new(file),
            offset: 0,
            file_size,
            next_sequence: 0,
        })
    }

    /// Byte offset of the next entry.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ActionLogReader for FileActionLogReader {
    fn read_next(&mut self) -> Result<Option<ActionLogEntry>> {
        if self.offset >= self.file_size {
            return Ok(None);
        }

        let (entry, next_offset) = read_entry(&mut self.reader, self.offset, self.file_size)?;
        if entry.sequence != self.next_sequence {
            return Err(RepositoryError::CorruptedData(format!(
                "entry at offset {} has sequence {}, expected {}",
                self.offset, entry.sequence, self.next_sequence
            )));
        }

        self.offset = next_offset;
        self.next_sequence += 1;
        Ok(Some(entry))
    }
}

/// Builds one `[len][entry]` frame so it reaches the writer in a single call.
fn encode_frame(entry: &ActionLogEntry) -> Result<Vec<u8>> {
    let size = bincode::serialized_size(entry)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    let len = u32::try_from(size)
        .map_err(|_| RepositoryError::Serialization("entry exceeds 4 GiB".into()))?;

    let mut frame = Vec::with_capacity(LEN_PREFIX as usize + len as usize);
    frame.extend_from_slice(&len.to_le_bytes());
    bincode::serialize_into(&mut frame, entry)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    Ok(frame)
}

/// Reads one `[len][entry]` frame positioned at `offset`.
fn read_entry(
    reader: &mut impl Read,
    offset: u64,
    file_size: u64,
) -> Result<(ActionLogEntry, u64)> {
    if offset + LEN_PREFIX > file_size {
        return Err(RepositoryError::CorruptedData(format!(
            "truncated length prefix at offset {offset}"
        )));
    }
    let mut len_bytes = [0u8; 4];
    reader.read_exact(&mut len_bytes)?;
    let len = u64::from(u32::from_le_bytes(len_bytes));

    let next_offset = offset + LEN_PREFIX + len;
    if next_offset > file_size {
        return Err(RepositoryError::CorruptedData(format!(
            "entry at offset {offset} needs {len} bytes, file ends at {file_size}"
        )));
    }

    let mut data = vec![0u8; len as usize];
    reader.read_exact(&mut data)?;
    let entry = bincode::deserialize(&data)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

    Ok((entry, next_offset))
}

#[cfg(test)]
mod tests {
    use park_core::ActionType;
    use tempfile::TempDir;

    use super::*;

    fn packet(tag: u32, body: &[u8]) -> ActionPacket {
        ActionPacket::new(ActionType(tag), body.to_vec())
    }

    #[test]
    fn entries_read_back_in_order() {
        let dir = TempDir::new().unwrap();
        let mut log = FileActionLog::create(dir.path(), "actions.log").unwrap();

        assert_eq!(log.append(&packet(40, &[0, 0, 0, 1])).unwrap(), 0);
        assert_eq!(log.append(&packet(34, b"name")).unwrap(), 1);
        log.flush().unwrap();

        let mut reader = FileActionLogReader::open(log.path()).unwrap();
        let first = reader.read_next().unwrap().unwrap();
        let second = reader.read_next().unwrap().unwrap();

        assert_eq!(first.packet, packet(40, &[0, 0, 0, 1]));
        assert_eq!(second.sequence, 1);
        assert_eq!(second.packet.action_type, ActionType(34));
        assert!(reader.read_next().unwrap().is_none());
        assert_eq!(reader.offset(), log.size());
    }

    #[test]
    fn each_entry_is_one_length_prefixed_frame() {
        let dir = TempDir::new().unwrap();
        let mut log = FileActionLog::create(dir.path(), "actions.log").unwrap();
        let entries = [
            ActionLogEntry {
                sequence: 0,
                packet: packet(40, &[0, 0, 0, 7]),
            },
            ActionLogEntry {
                sequence: 1,
                packet: packet(34, b"Zoo"),
            },
        ];

        let mut expected = Vec::new();
        for entry in &entries {
            let frame = encode_frame(entry).unwrap();
            let len = u32::from_le_bytes(frame[..4].try_into().unwrap());
            assert_eq!(len as usize, frame.len() - 4);
            let decoded: ActionLogEntry = bincode::deserialize(&frame[4..]).unwrap();
            assert_eq!(decoded.packet, entry.packet);

            log.append(&entry.packet).unwrap();
            expected.extend_from_slice(&frame);
        }
        log.flush().unwrap();

        assert_eq!(std::fs::read(log.path()).unwrap(), expected);
        assert_eq!(log.size(), expected.len() as u64);
    }

    #[test]
    fn create_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        drop(FileActionLog::create(dir.path(), "actions.log").unwrap());

        let err = FileActionLog::create(dir.path(), "actions.log").err().unwrap();
        assert!(matches!(err, RepositoryError::LogAlreadyExists(_)));
    }

    #[test]
    fn open_continues_the_sequence() {
        let dir = TempDir::new().unwrap();
        {
            let mut log = FileActionLog::create(dir.path(), "actions.log").unwrap();
            log.append(&packet(40, &[1])).unwrap();
            log.append(&packet(40, &[2])).unwrap();
        }

        let mut log = FileActionLog::open(dir.path(), "actions.log").unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.append(&packet(40, &[3])).unwrap(), 2);
    }

    #[test]
    fn torn_tail_is_reported_as_corruption() {
        let dir = TempDir::new().unwrap();
        let path = {
            let mut log = FileActionLog::create(dir.path(), "actions.log").unwrap();
            log.append(&packet(40, &[1, 2, 3, 4])).unwrap();
            log.path().to_path_buf()
        };
        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() - 2]).unwrap();

        let mut reader = FileActionLogReader::open(&path).unwrap();
        assert!(matches!(
            reader.read_next(),
            Err(RepositoryError::CorruptedData(_))
        ));
    }

    #[test]
    fn read_at_offset_walks_the_file() {
        let dir = TempDir::new().unwrap();
        let mut log = FileActionLog::create(dir.path(), "actions.log").unwrap();
        log.append(&packet(6, &[9])).unwrap();
        log.append(&packet(7, &[8])).unwrap();
        log.flush().unwrap();

        let (first, next) = log.read_at_offset(0).unwrap().unwrap();
        let (second, end) = log.read_at_offset(next).unwrap().unwrap();

        assert_eq!(first.packet.action_type, ActionType(6));
        assert_eq!(second.packet.action_type, ActionType(7));
        assert!(log.read_at_offset(end).unwrap().is_none());
    }

    #[test]
    fn journal_sink_flushes_each_packet() {
        let dir = TempDir::new().unwrap();
        let mut log = FileActionLog::create(dir.path(), "actions.log").unwrap();

        log.send(&packet(40, &[0, 0, 0, 5])).unwrap();

        let mut reader = FileActionLogReader::open(log.path()).unwrap();
        assert!(reader.read_next().unwrap().is_some());
    }
}
