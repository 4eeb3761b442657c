//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, packet decoding and
//! replay so clients can bubble them up with consistent context. Rejected
//! actions are not errors here: they come back as an `ActionResult`.
use thiserror::Error;
use tokio::sync::oneshot;

use park_core::{ActionType, ErrorKind, ProtocolError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("rejected packet: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("runtime requires ride data to be configured before building")]
    MissingRideData,

    #[error("runtime requires an initial world before building")]
    MissingWorld,

    #[error("replay diverged at entry {index}: {action_type} failed with {error_kind}")]
    ReplayDiverged {
        index: u64,
        action_type: ActionType,
        error_kind: ErrorKind,
    },
}
