//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the park.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use park_core::{
    ActionRegistry, ActionSink, GameConfig, NetworkMode, PlayerId, RideDataOracle, Session,
    WorldState,
};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::net::NetworkInbox;
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub network_mode: NetworkMode,
    /// Player this peer acts as; ignored offline.
    pub local_player: PlayerId,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            network_mode: NetworkMode::None,
            local_player: PlayerId::NONE,
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that orchestrates the park simulation
///
/// Design: Runtime owns the worker and the action registry.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    registry: Arc<ActionRegistry>,
    network_mode: NetworkMode,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Inbox a transport feeds peer packets into.
    pub fn inbox(&self) -> NetworkInbox {
        NetworkInbox::new(
            Arc::clone(&self.registry),
            self.handle.clone(),
            self.network_mode,
        )
    }

    /// Registry used to decode packets and journals for this runtime.
    pub fn registry(&self) -> &Arc<ActionRegistry> {
        &self.registry
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every handle and inbox has been dropped; its
    /// session, journal included, is dropped with it.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    world: Option<WorldState>,
    rides: Option<Arc<dyn RideDataOracle>>,
    registry: Option<ActionRegistry>,
    session: Option<Session>,
    outbound: Option<Box<dyn ActionSink>>,
    journal: Option<Box<dyn ActionSink>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            world: None,
            rides: None,
            registry: None,
            session: None,
            outbound: None,
            journal: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the initial world (required)
    pub fn initial_world(mut self, world: WorldState) -> Self {
        self.world = Some(world);
        self
    }

    /// Set the static ride catalogue (required)
    pub fn ride_data(mut self, rides: impl RideDataOracle + 'static) -> Self {
        self.rides = Some(Arc::new(rides));
        self
    }

    /// Share a ride catalogue that is also used elsewhere, e.g. for replay.
    pub fn shared_ride_data(mut self, rides: Arc<dyn RideDataOracle>) -> Self {
        self.rides = Some(rides);
        self
    }

    /// Replace the built-in action registry.
    pub fn registry(mut self, registry: ActionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Use a prepared session instead of one derived from the config.
    ///
    /// Sinks set on the builder replace the session's own.
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Where actions go on the wire: the server (client) or every peer (server).
    pub fn outbound(mut self, sink: impl ActionSink + 'static) -> Self {
        self.outbound = Some(Box::new(sink));
        self
    }

    /// Journal that records every applied action.
    pub fn journal(mut self, sink: impl ActionSink + 'static) -> Self {
        self.journal = Some(Box::new(sink));
        self
    }

    /// Build the runtime and spawn its worker.
    pub async fn build(self) -> Result<Runtime> {
        let world = self.world.ok_or(RuntimeError::MissingWorld)?;
        let rides = self.rides.ok_or(RuntimeError::MissingRideData)?;
        let registry = Arc::new(
            self.registry
                .unwrap_or_else(ActionRegistry::with_builtin_actions),
        );

        let mut session = self.session.unwrap_or_else(|| {
            Session::new(self.config.network_mode, self.config.local_player)
        });
        if self.outbound.is_some() {
            session.set_outbound(self.outbound);
        }
        if self.journal.is_some() {
            session.set_journal(self.journal);
        }
        let network_mode = session.mode();

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(
            world,
            rides,
            self.config.game_config,
            session,
            command_rx,
            event_bus,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            registry,
            network_mode,
            sim_worker_handle,
        })
    }
}
