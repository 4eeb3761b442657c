//! Repository layer for the action journal.
//!
//! The journal records every action the world applied, as encoded packets,
//! so a session can be replayed and verified later. The static catalogue and
//! the initial world come from `park-content`, not from here.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FileActionLog, FileActionLogReader};
pub use memory::InMemoryActionLog;
pub use traits::{ActionLogEntry, ActionLogReader, ActionLogWriter};
