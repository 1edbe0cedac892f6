//! Archetype derivation
//!
//! An artist's archetype is a pure function of weighted trait scores,
//! recomputed by the orchestrator at the end of every tick. Ties break in
//! a fixed order so derivation is deterministic.

use crate::models::artist::{Archetype, Artist};

const TALENT_WEIGHT: f64 = 1.0;
const WORK_ETHIC_WEIGHT: f64 = 0.95;
const CREATIVITY_WEIGHT: f64 = 1.0;
const MASS_APPEAL_WEIGHT: f64 = 0.9;
const POPULARITY_WEIGHT: f64 = 0.95;

/// Derive the archetype from current trait scores
pub fn derive(artist: &Artist) -> Archetype {
    // Fixed evaluation order doubles as the tie-break order.
    let scored = [
        (Archetype::Prodigy, artist.talent() * TALENT_WEIGHT),
        (Archetype::Grinder, artist.work_ethic() * WORK_ETHIC_WEIGHT),
        (Archetype::Visionary, artist.creativity() * CREATIVITY_WEIGHT),
        (
            Archetype::Crowdpleaser,
            artist.mass_appeal() * MASS_APPEAL_WEIGHT,
        ),
        (Archetype::Star, artist.popularity() * POPULARITY_WEIGHT),
    ];

    let mut best = scored[0];
    for candidate in &scored[1..] {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }
    best.0
}
