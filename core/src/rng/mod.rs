//! Deterministic random number generation
//!
//! Uses the xorshift64* algorithm for fast, deterministic random numbers.
//! CRITICAL: All randomness in the simulation MUST go through this module,
//! and the generator state rides inside the `GameState` snapshot so that
//! a restored save replays identically.

mod xorshift;

pub use xorshift::RngManager;
