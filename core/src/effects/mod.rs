//! Scheduled (delayed) effects
//!
//! Actions can carry trait changes that land on a future week rather than
//! immediately. Those are stored in an explicit, typed registry owned by
//! `GameState`: a list of `{trigger_week, deltas, scope, provenance}`
//! records, drained each tick. Draining removes the record, which is what
//! enforces the at-most-once firing invariant.
//!
//! The registry is part of the persisted snapshot (serde), so a pending
//! effect survives save/reload and still fires on its scheduled week.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bundle of trait deltas applied to an artist
///
/// Fields default to zero; merging two bundles sums field-wise, so two
/// effects each adding mood +2 in one tick yield +4, never an overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TraitDeltas {
    pub mood: f64,
    pub stress: f64,
    pub creativity: f64,
    pub popularity: f64,
    pub loyalty: f64,
    pub work_ethic: f64,
}

impl TraitDeltas {
    /// Sum another bundle into this one
    pub fn merge(&mut self, other: &TraitDeltas) {
        self.mood += other.mood;
        self.stress += other.stress;
        self.creativity += other.creativity;
        self.popularity += other.popularity;
        self.loyalty += other.loyalty;
        self.work_ethic += other.work_ethic;
    }

    pub fn is_zero(&self) -> bool {
        *self == TraitDeltas::default()
    }
}

/// Which artists a scheduled effect lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectScope {
    /// A single artist by id
    Artist { id: Uuid },
    /// Every currently signed artist at fire time
    AllSigned,
}

/// One pending trait change keyed by the week it must fire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEffect {
    /// Week on which this effect fires
    pub trigger_week: usize,

    /// Trait changes applied at fire time
    pub deltas: TraitDeltas,

    /// Target scope resolved at fire time
    pub scope: EffectScope,

    /// Originating action/choice, e.g. "role_meeting:push_harder".
    /// Debugging and summary text only; never drives behavior.
    pub provenance: String,
}

/// Registry of pending scheduled effects, owned by `GameState`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EffectQueue {
    entries: Vec<ScheduledEffect>,
}

impl EffectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an effect for a future week
    pub fn push(&mut self, effect: ScheduledEffect) {
        self.entries.push(effect);
    }

    /// Remove and return every effect due at or before `week`
    ///
    /// Entries are returned in insertion order. Removal here is the
    /// at-most-once guarantee: a drained effect cannot fire again.
    pub fn drain_due(&mut self, week: usize) -> Vec<ScheduledEffect> {
        let (due, pending): (Vec<_>, Vec<_>) = self
            .entries
            .drain(..)
            .partition(|e| e.trigger_week <= week);
        self.entries = pending;
        due
    }

    /// Number of pending effects
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if any pending effect is already overdue relative to `week`
    ///
    /// After a drain this must never be true; the orchestrator checks it
    /// as an invariant.
    pub fn has_overdue(&self, week: usize) -> bool {
        self.entries.iter().any(|e| e.trigger_week <= week)
    }

    /// Read-only view of pending entries
    pub fn entries(&self) -> &[ScheduledEffect] {
        &self.entries
    }
}
