//! Artist model
//!
//! A signed (or prospective) artist on the label roster. Traits come in two
//! clamp classes:
//!
//! - volatile traits (mood, stress, creativity, popularity, loyalty) clamp
//!   to [0, 100] and drift every week via the psychology model
//! - quality-bearing traits (talent, work ethic, mass appeal) clamp to
//!   [20, 100] so the quality formula always has a stable floor
//!
//! All mutation goes through the clamping setters / `apply_deltas`; raw
//! field writes are not exposed.

use crate::effects::TraitDeltas;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Clamp range for volatile traits
pub const VOLATILE_MIN: f64 = 0.0;
pub const VOLATILE_MAX: f64 = 100.0;

/// Clamp range for quality-bearing traits
pub const STABLE_MIN: f64 = 20.0;
pub const STABLE_MAX: f64 = 100.0;

/// Derived artist archetype, recomputed from weighted trait scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// Talent-dominant
    Prodigy,
    /// Work-ethic-dominant
    Grinder,
    /// Creativity-dominant
    Visionary,
    /// Mass-appeal-dominant
    Crowdpleaser,
    /// Popularity-dominant
    Star,
}

/// An artist on (or offered to) the label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    id: Uuid,
    name: String,

    // Quality-bearing traits, clamped [20, 100]
    talent: f64,
    work_ethic: f64,
    mass_appeal: f64,

    // Volatile traits, clamped [0, 100]
    creativity: f64,
    popularity: f64,
    mood: f64,
    stress: f64,
    loyalty: f64,

    /// Derived; recomputed by the orchestrator each tick
    archetype: Archetype,

    signed: bool,

    /// Weekly retainer (cents)
    weekly_cost: i64,

    /// Phase offset for the creativity cycle, fixed at signing
    creativity_cycle_offset: usize,

    /// Rolling revenue attributed to this artist in the current month (cents)
    month_revenue: i64,

    /// True while the artist's last completed month ran a negative ROI
    negative_roi: bool,
}

impl Artist {
    /// Create a newly signed artist
    ///
    /// Input traits are clamped, never rejected; these are tuning-sensitive
    /// game values, not security-sensitive ones.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        name: String,
        talent: f64,
        work_ethic: f64,
        creativity: f64,
        mass_appeal: f64,
        weekly_cost: i64,
        creativity_cycle_offset: usize,
    ) -> Self {
        let mut artist = Self {
            id,
            name,
            talent: talent.clamp(STABLE_MIN, STABLE_MAX),
            work_ethic: work_ethic.clamp(STABLE_MIN, STABLE_MAX),
            mass_appeal: mass_appeal.clamp(STABLE_MIN, STABLE_MAX),
            creativity: creativity.clamp(VOLATILE_MIN, VOLATILE_MAX),
            popularity: 10.0,
            mood: 60.0,
            stress: 20.0,
            loyalty: 50.0,
            archetype: Archetype::Grinder,
            signed: true,
            weekly_cost: weekly_cost.max(0),
            creativity_cycle_offset,
            month_revenue: 0,
            negative_roi: false,
        };
        artist.archetype = crate::formulas::archetype::derive(&artist);
        artist
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn talent(&self) -> f64 {
        self.talent
    }

    pub fn work_ethic(&self) -> f64 {
        self.work_ethic
    }

    pub fn mass_appeal(&self) -> f64 {
        self.mass_appeal
    }

    pub fn creativity(&self) -> f64 {
        self.creativity
    }

    pub fn popularity(&self) -> f64 {
        self.popularity
    }

    pub fn mood(&self) -> f64 {
        self.mood
    }

    pub fn stress(&self) -> f64 {
        self.stress
    }

    pub fn loyalty(&self) -> f64 {
        self.loyalty
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    pub fn weekly_cost(&self) -> i64 {
        self.weekly_cost
    }

    pub fn creativity_cycle_offset(&self) -> usize {
        self.creativity_cycle_offset
    }

    pub fn month_revenue(&self) -> i64 {
        self.month_revenue
    }

    pub fn has_negative_roi(&self) -> bool {
        self.negative_roi
    }

    // Clamping setters

    pub fn set_mood(&mut self, value: f64) {
        self.mood = value.clamp(VOLATILE_MIN, VOLATILE_MAX);
    }

    pub fn set_stress(&mut self, value: f64) {
        self.stress = value.clamp(VOLATILE_MIN, VOLATILE_MAX);
    }

    pub fn set_creativity(&mut self, value: f64) {
        self.creativity = value.clamp(VOLATILE_MIN, VOLATILE_MAX);
    }

    pub fn set_popularity(&mut self, value: f64) {
        self.popularity = value.clamp(VOLATILE_MIN, VOLATILE_MAX);
    }

    pub fn set_loyalty(&mut self, value: f64) {
        self.loyalty = value.clamp(VOLATILE_MIN, VOLATILE_MAX);
    }

    pub fn set_work_ethic(&mut self, value: f64) {
        self.work_ethic = value.clamp(STABLE_MIN, STABLE_MAX);
    }

    pub fn set_archetype(&mut self, archetype: Archetype) {
        self.archetype = archetype;
    }

    /// Apply a trait-delta bundle, clamping every field
    pub fn apply_deltas(&mut self, deltas: &TraitDeltas) {
        self.set_mood(self.mood + deltas.mood);
        self.set_stress(self.stress + deltas.stress);
        self.set_creativity(self.creativity + deltas.creativity);
        self.set_popularity(self.popularity + deltas.popularity);
        self.set_loyalty(self.loyalty + deltas.loyalty);
        if deltas.work_ethic != 0.0 {
            self.set_work_ethic(self.work_ethic + deltas.work_ethic);
        }
    }

    /// Attribute revenue (or spend, negative) to this artist's running month
    pub fn add_month_revenue(&mut self, delta: i64) {
        self.month_revenue += delta;
    }

    /// Close out the month: latch the ROI flag and reset the accumulator
    pub fn roll_month(&mut self) {
        self.negative_roi = self.month_revenue < 0;
        self.month_revenue = 0;
    }

    /// True if every trait sits inside its clamp range
    pub fn traits_in_range(&self) -> bool {
        let volatile = [
            self.mood,
            self.stress,
            self.creativity,
            self.popularity,
            self.loyalty,
        ];
        let stable = [self.talent, self.work_ethic, self.mass_appeal];
        volatile
            .iter()
            .all(|v| (VOLATILE_MIN..=VOLATILE_MAX).contains(v))
            && stable.iter().all(|v| (STABLE_MIN..=STABLE_MAX).contains(v))
    }
}
