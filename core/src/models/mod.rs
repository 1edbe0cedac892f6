//! Domain models
//!
//! All persisted entities plus the action and summary types that cross the
//! core's boundary. Entities are created by action resolution and mutated
//! only by the orchestrator during a tick.

pub mod action;
pub mod artist;
pub mod project;
pub mod release;
pub mod song;
pub mod state;
pub mod summary;
