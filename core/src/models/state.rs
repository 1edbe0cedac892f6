//! Game state
//!
//! The complete snapshot of one playthrough: label-level numbers, all
//! entities, the scheduled-effect registry and the RNG state. One
//! `GameState` is the unit of atomic commit: the orchestrator clones it,
//! mutates the clone through a full tick, and either hands the clone back
//! or discards it.
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents)
//! 2. Reputation stays in [0, 100]; artist traits stay in their clamps
//! 3. Money never drops below the allowed overdraft
//! 4. Entity maps are ordered (BTreeMap) so iteration, and therefore the
//!    RNG draw order, is identical across runs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

use crate::config::GameConfig;
use crate::core::time::TimeManager;
use crate::effects::EffectQueue;
use crate::models::artist::Artist;
use crate::models::project::Project;
use crate::models::release::{Release, Tour};
use crate::models::song::Song;
use crate::progression::AccessTiers;
use crate::rng::RngManager;

/// Internal bug class: a state invariant escaped its guard
///
/// These must not occur by construction. If one is detected the tick
/// aborts rather than committing corrupted state.
#[derive(Debug, Error, PartialEq)]
pub enum InvariantViolation {
    #[error("money {money} breached the allowed overdraft of {overdraft_limit}")]
    OverdraftBreached { money: i64, overdraft_limit: i64 },

    #[error("artist {artist_id} has a trait outside its clamp range")]
    TraitOutOfRange { artist_id: Uuid },

    #[error("project {project_id} stage went backwards ({before} -> {after})")]
    StageRegression {
        project_id: Uuid,
        before: u8,
        after: u8,
    },

    #[error("scheduled effect {provenance} is overdue and unfired at week {week}")]
    OverdueEffect { provenance: String, week: usize },

    #[error("illegal stage transition: {0}")]
    Stage(#[from] crate::models::project::StageError),
}

/// Complete state of one label-management playthrough
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    time: TimeManager,

    /// Label account (cents); may dip into the configured overdraft
    money: i64,

    /// Label reputation, clamped [0, 100]
    reputation: f64,

    /// Slow-moving currency earned from acclaimed output
    creative_capital: f64,

    /// Player actions allowed per week
    focus_capacity: u8,

    /// Access tiers and their unlock history
    pub access: AccessTiers,

    /// Typed registry of pending delayed effects (persisted with the state)
    pub effects: EffectQueue,

    /// Deterministic RNG; advancing it is part of the snapshot's identity
    pub rng: RngManager,

    pub artists: BTreeMap<Uuid, Artist>,
    pub projects: BTreeMap<Uuid, Project>,
    pub songs: BTreeMap<Uuid, Song>,
    pub releases: BTreeMap<Uuid, Release>,
    pub tours: BTreeMap<Uuid, Tour>,
}

impl GameState {
    /// Start a fresh playthrough
    pub fn new(seed: u64, starting_money: i64, config: &GameConfig) -> Self {
        Self {
            time: TimeManager::new(),
            money: starting_money,
            reputation: 5.0,
            creative_capital: 0.0,
            focus_capacity: config.economy.focus_slot_capacity,
            access: AccessTiers::new(),
            effects: EffectQueue::new(),
            rng: RngManager::new(seed),
            artists: BTreeMap::new(),
            projects: BTreeMap::new(),
            songs: BTreeMap::new(),
            releases: BTreeMap::new(),
            tours: BTreeMap::new(),
        }
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    pub fn week(&self) -> usize {
        self.time.current_week()
    }

    pub fn month(&self) -> usize {
        self.time.current_month()
    }

    pub fn time(&self) -> &TimeManager {
        &self.time
    }

    pub(crate) fn advance_week(&mut self) {
        self.time.advance_week();
    }

    // ------------------------------------------------------------------
    // Money / reputation
    // ------------------------------------------------------------------

    pub fn money(&self) -> i64 {
        self.money
    }

    /// Apply a signed money delta. Overdraft enforcement happens at the
    /// end of the tick, not per mutation, so one expensive step can be
    /// covered by revenue landing later the same week.
    pub fn apply_money(&mut self, delta: i64) {
        self.money += delta;
    }

    pub fn reputation(&self) -> f64 {
        self.reputation
    }

    pub fn add_reputation(&mut self, delta: f64) {
        self.reputation = (self.reputation + delta).clamp(0.0, 100.0);
    }

    pub fn creative_capital(&self) -> f64 {
        self.creative_capital
    }

    pub fn add_creative_capital(&mut self, delta: f64) {
        self.creative_capital = (self.creative_capital + delta).max(0.0);
    }

    pub fn focus_capacity(&self) -> u8 {
        self.focus_capacity
    }

    // ------------------------------------------------------------------
    // Entities
    // ------------------------------------------------------------------

    /// Deterministic entity id from the snapshot's own RNG
    pub fn next_id(&mut self) -> Uuid {
        Uuid::from_u64_pair(self.rng.next(), self.rng.next())
    }

    /// Ids of all signed artists, in deterministic order
    pub fn signed_artist_ids(&self) -> Vec<Uuid> {
        self.artists
            .iter()
            .filter(|(_, a)| a.is_signed())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Active (non-released) projects owned by an artist
    pub fn active_project_count(&self, artist_id: Uuid) -> usize {
        self.projects
            .values()
            .filter(|p| p.artist_id() == artist_id && p.is_active())
            .count()
    }

    // ------------------------------------------------------------------
    // Invariants
    // ------------------------------------------------------------------

    /// End-of-tick invariant sweep
    pub fn check_invariants(&self, config: &GameConfig) -> Result<(), InvariantViolation> {
        if self.money < -config.economy.overdraft_limit {
            return Err(InvariantViolation::OverdraftBreached {
                money: self.money,
                overdraft_limit: config.economy.overdraft_limit,
            });
        }

        for (id, artist) in &self.artists {
            if !artist.traits_in_range() {
                return Err(InvariantViolation::TraitOutOfRange { artist_id: *id });
            }
        }

        if let Some(effect) = self
            .effects
            .entries()
            .iter()
            .find(|e| e.trigger_week <= self.week())
        {
            return Err(InvariantViolation::OverdueEffect {
                provenance: effect.provenance.clone(),
                week: self.week(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{EffectScope, ScheduledEffect, TraitDeltas};

    fn state() -> GameState {
        GameState::new(42, 1_000_000, &GameConfig::default())
    }

    #[test]
    fn test_reputation_clamps() {
        let mut s = state();
        s.add_reputation(500.0);
        assert_eq!(s.reputation(), 100.0);
        s.add_reputation(-500.0);
        assert_eq!(s.reputation(), 0.0);
    }

    #[test]
    fn test_overdraft_invariant() {
        let config = GameConfig::default();
        let mut s = state();
        s.apply_money(-1_000_000 - config.economy.overdraft_limit - 1);
        assert!(matches!(
            s.check_invariants(&config),
            Err(InvariantViolation::OverdraftBreached { .. })
        ));
    }

    #[test]
    fn test_overdue_effect_invariant() {
        let config = GameConfig::default();
        let mut s = state();
        s.effects.push(ScheduledEffect {
            trigger_week: 0,
            deltas: TraitDeltas::default(),
            scope: EffectScope::AllSigned,
            provenance: "stale".to_string(),
        });
        assert!(matches!(
            s.check_invariants(&config),
            Err(InvariantViolation::OverdueEffect { .. })
        ));
    }

    #[test]
    fn test_next_id_is_deterministic() {
        let mut a = state();
        let mut b = state();
        assert_eq!(a.next_id(), b.next_id());
        assert_eq!(a.next_id(), b.next_id());
    }
}
