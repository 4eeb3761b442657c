//! Simulation worker that owns the authoritative [`park_core::WorldState`].
//!
//! Receives commands from [`crate::RuntimeHandle`], runs actions through
//! [`park_core::GameActions`], and publishes events to the EventBus.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use park_core::{
    Action, ActionFlags, ActionRejection, ActionResult, GameActions, GameConfig, GameEnv, NetworkMode,
    RideDataOracle, Session, StateChecksum, WorldState,
};

use crate::events::{ActionEvent, ActionOrigin, ActionStatus, Event, EventBus};
use crate::windows::EventWindowManager;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Run an action issued by the local player.
    Submit {
        action: Action,
        reply: oneshot::Sender<ActionResult>,
    },
    /// Run a decoded action received from another peer.
    Deliver {
        action: Action,
        reply: oneshot::Sender<ActionResult>,
    },
    /// Complete a forwarded request the server refused.
    Reject {
        rejection: ActionRejection,
        reply: oneshot::Sender<Option<ActionResult>>,
    },
    /// Query the current world (read-only).
    QueryWorld { reply: oneshot::Sender<WorldState> },
    /// Checksum of the current world.
    Checksum {
        reply: oneshot::Sender<StateChecksum>,
    },
}

/// Background task that processes gameplay commands.
///
/// Commands are handled strictly in arrival order, which is the order every
/// peer's actions are applied in.
pub struct SimulationWorker {
    world: WorldState,
    rides: Arc<dyn RideDataOracle>,
    config: GameConfig,
    session: Session,
    windows: EventWindowManager,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        world: WorldState,
        rides: Arc<dyn RideDataOracle>,
        config: GameConfig,
        session: Session,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        tracing::info!(
            "SimulationWorker initialized for park '{}' as {:?} (player {}), {} rides",
            world.park.name,
            session.mode(),
            session.local_player(),
            world.rides.len()
        );

        Self {
            world,
            rides,
            config,
            session,
            windows: EventWindowManager::new(event_bus.clone()),
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                else => break,
            }
        }
        debug!("SimulationWorker stopped: command channel closed");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Submit { action, reply } => {
                debug!(action = %action.action_type(), "Submit");
                let result = self.run_action(action, ActionOrigin::Local);
                if reply.send(result).is_err() {
                    debug!("Submit reply channel closed (caller dropped)");
                }
            }
            Command::Deliver { action, reply } => {
                debug!(
                    action = %action.action_type(),
                    player = %action.player(),
                    network_id = action.network_id(),
                    "Deliver"
                );
                let result = self.run_action(action, ActionOrigin::Remote);
                if reply.send(result).is_err() {
                    debug!("Deliver reply channel closed (caller dropped)");
                }
            }
            Command::Reject { rejection, reply } => {
                debug!(
                    action = %rejection.action_type,
                    player = %rejection.player,
                    network_id = rejection.network_id,
                    "Reject"
                );
                let result = self.complete_rejected(&rejection);
                if reply.send(result).is_err() {
                    debug!("Reject reply channel closed (caller dropped)");
                }
            }
            Command::QueryWorld { reply } => {
                if reply.send(self.world.clone()).is_err() {
                    debug!("QueryWorld reply channel closed (caller dropped)");
                }
            }
            Command::Checksum { reply } => {
                if reply.send(self.world.checksum()).is_err() {
                    debug!("Checksum reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Runs one action through the dispatcher and publishes its outcome.
    ///
    /// This is the only place the worker touches the world.
    fn run_action(&mut self, action: Action, origin: ActionOrigin) -> ActionResult {
        let action_type = action.action_type();
        let network_id = action.network_id();
        let player = if origin == ActionOrigin::Local && action.player().is_none() {
            self.session.local_player()
        } else {
            action.player()
        };
        let forwarded = origin == ActionOrigin::Local
            && self.session.mode() == NetworkMode::Client
            && !action.action_flags().contains(ActionFlags::CLIENT_ONLY);

        let result = {
            let env = GameEnv::new(self.rides.as_ref(), &self.config);
            let mut actions = GameActions::new(
                &mut self.world,
                env,
                &mut self.session,
                &mut self.windows,
            );
            match origin {
                ActionOrigin::Local => actions.execute(action),
                ActionOrigin::Remote => actions.execute_received(action),
            }
        };

        let status = if !result.is_ok() {
            ActionStatus::Rejected
        } else if forwarded {
            ActionStatus::Forwarded
        } else {
            ActionStatus::Applied
        };

        self.event_bus.publish(Event::Action(ActionEvent {
            action_type,
            player,
            network_id,
            origin,
            status,
            error_kind: result.error_kind(),
            cost: result.cost(),
        }));

        result
    }

    /// Hands a server rejection to the dispatcher and publishes the outcome
    /// when it completed one of this peer's requests.
    fn complete_rejected(&mut self, rejection: &ActionRejection) -> Option<ActionResult> {
        let result = {
            let env = GameEnv::new(self.rides.as_ref(), &self.config);
            GameActions::new(
                &mut self.world,
                env,
                &mut self.session,
                &mut self.windows,
            )
            .receive_rejection(rejection)
        }?;

        self.event_bus.publish(Event::Action(ActionEvent {
            action_type: rejection.action_type,
            player: rejection.player,
            network_id: rejection.network_id,
            origin: ActionOrigin::Remote,
            status: ActionStatus::Rejected,
            error_kind: result.error_kind(),
            cost: None,
        }));
        Some(result)
    }
}
