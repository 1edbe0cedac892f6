//! Artist psychology model
//!
//! Weekly drift for one artist: stress accrues from workload, bleeds into
//! mood, mood pulls toward an equilibrium band, creativity follows a slow
//! cycle minus stress plus a high-mood bonus. Two forced events stop
//! runaway spirals: a breakdown intervention (negative spiral) and fame
//! complications (positive spiral).
//!
//! Pure: inputs in, a delta bundle and event flags out. The orchestrator
//! applies the deltas through the artist's clamping setters.

use crate::config::PsychologyConfig;
use crate::effects::TraitDeltas;
use crate::models::artist::Artist;

/// Workload facts the psychology model needs about one artist's week
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkloadSnapshot {
    /// Active (non-released) projects owned by the artist
    pub active_projects: usize,
    /// At least one project is in the recording stage
    pub recording: bool,
    /// A release for this artist shipped this week
    pub released_this_week: bool,
}

/// Outcome of one psychology tick for one artist
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PsychologyOutcome {
    pub deltas: TraitDeltas,
    pub breakdown_intervention: bool,
    pub fame_complications: bool,
}

/// Compute one week of psychological drift
pub fn weekly_drift(
    artist: &Artist,
    workload: &WorkloadSnapshot,
    week: usize,
    config: &PsychologyConfig,
) -> PsychologyOutcome {
    let mut deltas = TraitDeltas::default();

    // Stress: workload in, baseline recovery out.
    let mut stress_delta = workload.active_projects as f64 * config.stress_per_active_project
        - config.stress_recovery;
    if workload.recording {
        stress_delta += config.stress_recording_load;
    }
    if workload.released_this_week {
        stress_delta += config.stress_release_week;
    }
    if artist.has_negative_roi() {
        stress_delta += config.stress_negative_roi;
    }
    deltas.stress = stress_delta;

    // Mood: stress bleed plus equilibrium pull. Drift applies only when
    // the current mood sits outside the band.
    let mut mood_delta = -(artist.stress() + stress_delta).max(0.0) * config.stress_mood_bleed;
    if artist.mood() < config.mood_equilibrium_low {
        mood_delta += config.mood_drift;
    } else if artist.mood() > config.mood_equilibrium_high {
        mood_delta -= config.mood_drift;
    }
    deltas.mood = mood_delta;

    // Creativity: slow periodic cycle, stress drag, high-mood bonus.
    let phase = (week + artist.creativity_cycle_offset()) as f64
        / config.creativity_cycle_period
        * std::f64::consts::TAU;
    let mut creativity_delta = phase.sin() * config.creativity_cycle_amplitude
        - artist.stress() * config.creativity_stress_penalty;
    if artist.mood() > config.creativity_mood_bonus_threshold {
        creativity_delta += config.creativity_mood_bonus;
    }
    deltas.creativity = creativity_delta;

    let mut outcome = PsychologyOutcome {
        deltas,
        ..Default::default()
    };

    // Breakdown intervention: both thresholds crossed at once forces a
    // reset, preventing the runaway negative spiral.
    let projected_stress = (artist.stress() + outcome.deltas.stress).clamp(0.0, 100.0);
    let projected_mood = (artist.mood() + outcome.deltas.mood).clamp(0.0, 100.0);
    if projected_stress > config.breakdown_stress_threshold
        && projected_mood < config.breakdown_mood_threshold
    {
        outcome.breakdown_intervention = true;
        outcome.deltas.stress -= config.breakdown_stress_relief;
        outcome.deltas.mood += config.breakdown_mood_recovery;
    }

    // Fame complications: both success signals running hot at once.
    if artist.popularity() > config.fame_popularity_threshold
        && artist.month_revenue() > config.fame_revenue_threshold
    {
        outcome.fame_complications = true;
        outcome.deltas.stress += config.fame_stress_spike;
        outcome.deltas.loyalty -= config.fame_loyalty_hit;
    }

    outcome
}
