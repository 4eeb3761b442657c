//! Views of the world handed to an action's Query and Execute.

use super::ActionHeader;
use crate::config::GameConfig;
use crate::env::{GameEnv, RideDataOracle};
use crate::state::WorldState;
use crate::ui::WindowClass;

/// Read-only view for [`GameAction::query`](super::GameAction::query).
#[derive(Clone, Copy, Debug)]
pub struct QueryContext<'a> {
    pub world: &'a WorldState,
    pub env: GameEnv<'a>,
    pub header: &'a ActionHeader,
}

impl<'a> QueryContext<'a> {
    pub fn new(world: &'a WorldState, env: GameEnv<'a>, header: &'a ActionHeader) -> Self {
        Self { world, env, header }
    }

    pub fn rides(&self) -> &'a dyn RideDataOracle {
        self.env.rides()
    }

    pub fn config(&self) -> &'a GameConfig {
        self.env.config()
    }
}

/// Mutable view for [`GameAction::execute`](super::GameAction::execute).
///
/// Window invalidations are collected here and flushed by the dispatcher
/// once Execute returns.
#[derive(Debug)]
pub struct ExecuteContext<'a> {
    pub world: &'a mut WorldState,
    pub env: GameEnv<'a>,
    pub header: &'a ActionHeader,
    invalidations: Vec<WindowClass>,
}

impl<'a> ExecuteContext<'a> {
    pub fn new(world: &'a mut WorldState, env: GameEnv<'a>, header: &'a ActionHeader) -> Self {
        Self {
            world,
            env,
            header,
            invalidations: Vec::new(),
        }
    }

    pub fn rides(&self) -> &'a dyn RideDataOracle {
        self.env.rides()
    }

    pub fn config(&self) -> &'a GameConfig {
        self.env.config()
    }

    /// Requests a redraw of every window of `class`.
    pub fn invalidate(&mut self, class: WindowClass) {
        if !self.invalidations.contains(&class) {
            self.invalidations.push(class);
        }
    }

    /// Read-only view of the same world, for helpers shared with Query.
    pub fn as_query(&self) -> QueryContext<'_> {
        QueryContext::new(self.world, self.env, self.header)
    }

    pub fn into_invalidations(self) -> Vec<WindowClass> {
        self.invalidations
    }
}
