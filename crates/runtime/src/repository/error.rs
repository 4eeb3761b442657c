//! Journal storage errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("in-memory journal lock poisoned")]
    LockPoisoned,

    #[error("journal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("journal entry encoding failed: {0}")]
    Serialization(String),

    #[error("journal is corrupted: {0}")]
    CorruptedData(String),

    #[error("journal {0} already exists")]
    LogAlreadyExists(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
