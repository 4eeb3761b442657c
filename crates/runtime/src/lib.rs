//! Runtime orchestration for the deterministic park simulation.
//!
//! This crate wires the `park-core` dispatcher into a tokio worker that owns
//! the world. Consumers embed [`Runtime`] to submit actions, feed network
//! packets through a [`NetworkInbox`], subscribe to events and journal every
//! applied action for later [`replay`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`net`] decodes peer packets and carries outbound ones
//! - [`repository`] stores the action journal
//! - [`replay`] re-runs a journal against an initial world
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod net;
pub mod replay;
pub mod repository;
pub mod runtime;
pub mod windows;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{ActionEvent, ActionOrigin, ActionStatus, Event, EventBus, Topic, UiEvent};
pub use net::{ChannelSink, NetworkInbox};
pub use replay::replay;
pub use repository::{
    ActionLogEntry, ActionLogReader, ActionLogWriter, FileActionLog, FileActionLogReader,
    InMemoryActionLog, RepositoryError,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use windows::EventWindowManager;
