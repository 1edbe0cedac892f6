//! Label Simulator Core - Rust Engine
//!
//! Deterministic turn-based economic core for a music-label management
//! game: weekly ticks, a monthly wrapper, and the formula systems that
//! drive quality, streaming revenue and artist psychology.
//!
//! # Architecture
//!
//! - **core**: Time management (weekly ticks, four-week months)
//! - **config**: The single strongly-typed tuning bundle
//! - **models**: Domain types (Artist, Project, Song, Release, GameState)
//! - **formulas**: Pure quality/revenue/psychology/archetype math
//! - **effects**: The scheduled-effect registry for delayed consequences
//! - **progression**: Reputation-gated access tiers
//! - **orchestrator**: The tick loop and checkpointing
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents)
//! 2. All randomness is deterministic (seeded RNG carried in the snapshot)
//! 3. A tick either fully commits or returns the caller's snapshot untouched

// Module declarations
pub mod config;
pub mod core;
pub mod effects;
pub mod formulas;
pub mod models;
pub mod orchestrator;
pub mod progression;
pub mod rng;

// Re-exports for convenience
pub use config::{ConfigError, GameConfig};
pub use core::time::{TimeManager, WEEKS_PER_MONTH};
pub use effects::{EffectQueue, EffectScope, ScheduledEffect, TraitDeltas};
pub use models::{
    action::{MeetingChoice, PlayerAction, SigningOffer},
    artist::{Archetype, Artist},
    project::{ProducerTier, Project, ProjectStage, StageError, TimeInvestment},
    release::{LeadSingle, MarketingSpend, Release, Tour, TourOutcome},
    song::Song,
    state::{GameState, InvariantViolation},
    summary::{ChangeRecord, MonthSummary, NarrativeEvent, WeekSummary},
};
pub use orchestrator::{
    load_state, save_state, Engine, SavedGame, SimulationError, SnapshotError, ValidationError,
};
pub use progression::{AccessTiers, TierTrack, TierUnlock};
pub use rng::RngManager;
