//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the world and runs every action through the
//! dispatcher, one command at a time.

mod simulation;

pub use simulation::{Command, SimulationWorker};
