//! Orchestrator - the weekly/monthly tick loop
//!
//! Integrates actions, delayed effects, project lifecycle, psychology,
//! revenue and progression into one deterministic step function.
//!
//! See `engine.rs` for the full step ordering.

pub mod checkpoint;
pub mod engine;

#[cfg(test)]
mod tests;

pub use checkpoint::{compute_config_hash, load_state, save_state, SavedGame, SnapshotError};
pub use engine::{Engine, SimulationError, ValidationError};
