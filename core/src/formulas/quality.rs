//! Song quality formula
//!
//! Pure functions; every tuning input is an explicit parameter. The
//! pipeline, in order:
//!
//! 1. base blend of artist talent and producer skill
//! 2. time-investment factor with work-ethic synergy
//! 3. popularity factor (square-root shaped, ~0.95–1.05x)
//! 4. session fatigue (geometric past the 3rd song of a project)
//! 5. mood factor (~0.9–1.1x)
//! 6. budget-efficiency factor (piecewise over actual/minimum-viable)
//! 7. skill-scaled variance band plus rare breakout / critical-failure
//!    outliers, both biased toward low combined skill
//!
//! Output domain: integers in [20, 98]. The ceiling sits below 100 so a
//! legendary-tier breakout always has headroom over ordinary output.

use crate::config::{EconomyConfig, QualityConfig};
use crate::models::artist::Artist;
use crate::models::project::{ProducerTier, TimeInvestment};
use crate::rng::RngManager;

pub const QUALITY_MIN: f64 = 20.0;
pub const QUALITY_MAX: f64 = 98.0;

// Budget-efficiency curve breakpoints (ratio of actual to minimum viable
// cost). The curve is continuous and monotonically non-decreasing up to
// the luxury ceiling, then grows sub-linearly.
const HEAVY_PENALTY_CUTOFF: f64 = 0.6;
const EFFICIENT_START: f64 = 1.0;
const EFFICIENT_END: f64 = 1.6;
const PREMIUM_END: f64 = 2.4;
const LUXURY_END: f64 = 3.5;

const FLOOR_MULT: f64 = 0.70; // ratio 0
const HEAVY_PENALTY_MULT: f64 = 0.85; // at HEAVY_PENALTY_CUTOFF
const EFFICIENT_MULT: f64 = 1.0; // the flat plateau
const PREMIUM_MULT: f64 = 1.05; // at PREMIUM_END
const LUXURY_MULT: f64 = 1.09; // at LUXURY_END
const LUXURY_TAIL_COEFF: f64 = 0.025; // log tail slope beyond LUXURY_END

/// Minimum viable recording cost per song (cents)
///
/// Base per-song cost scaled by producer and time multipliers, with an
/// economies-of-scale discount for larger song counts.
pub fn minimum_viable_cost(
    producer: ProducerTier,
    time: TimeInvestment,
    song_count: u32,
    economy: &EconomyConfig,
) -> i64 {
    let discount = (1.0 - economy.scale_discount_per_song * song_count.saturating_sub(1) as f64)
        .max(economy.scale_discount_floor);
    let cost = economy.base_song_cost as f64
        * producer.cost_multiplier()
        * time.cost_multiplier()
        * discount;
    cost.round().max(1.0) as i64
}

/// Budget-efficiency multiplier from the spend ratio
///
/// Input domain: `ratio >= 0` (actual budget / minimum viable cost).
/// Output range: [0.70, ~1.15), piecewise linear through the named
/// segments, logarithmically diminishing past the luxury ceiling.
pub fn budget_efficiency_multiplier(ratio: f64) -> f64 {
    let ratio = ratio.max(0.0);
    if ratio < HEAVY_PENALTY_CUTOFF {
        // heavy penalty
        lerp(ratio, 0.0, FLOOR_MULT, HEAVY_PENALTY_CUTOFF, HEAVY_PENALTY_MULT)
    } else if ratio < EFFICIENT_START {
        // below standard
        lerp(
            ratio,
            HEAVY_PENALTY_CUTOFF,
            HEAVY_PENALTY_MULT,
            EFFICIENT_START,
            EFFICIENT_MULT,
        )
    } else if ratio < EFFICIENT_END {
        // efficient plateau
        EFFICIENT_MULT
    } else if ratio < PREMIUM_END {
        // premium
        lerp(ratio, EFFICIENT_END, EFFICIENT_MULT, PREMIUM_END, PREMIUM_MULT)
    } else if ratio < LUXURY_END {
        // luxury
        lerp(ratio, PREMIUM_END, PREMIUM_MULT, LUXURY_END, LUXURY_MULT)
    } else {
        // diminishing tail
        LUXURY_MULT + LUXURY_TAIL_COEFF * (ratio / LUXURY_END).ln()
    }
}

fn lerp(x: f64, x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Compute a song's final quality
///
/// `song_index` is 1-based within the project (fatigue input). All numeric
/// inputs are clamped, never rejected; the function cannot fail for
/// in-range state.
#[allow(clippy::too_many_arguments)]
pub fn song_quality(
    artist: &Artist,
    producer: ProducerTier,
    time: TimeInvestment,
    budget_per_song: i64,
    song_count: u32,
    song_index: u32,
    quality: &QualityConfig,
    economy: &EconomyConfig,
    rng: &mut RngManager,
) -> u8 {
    let producer_skill = producer.skill();

    // 1. base blend
    let base = artist.talent() * quality.talent_weight + producer_skill * quality.producer_weight;

    // 2. time investment with work-ethic synergy
    let synergy = (artist.work_ethic() - 50.0) / 50.0
        * time.work_ethic_synergy()
        * quality.work_ethic_synergy;
    let time_factor = time.quality_factor() * (1.0 + synergy);

    // 3. popularity, diminishing (square-root shaped), narrow band
    let popularity_factor =
        (1.0 - quality.popularity_band / 2.0) + quality.popularity_band * (artist.popularity() / 100.0).sqrt();

    // 4. session fatigue past the free songs
    let fatigue_factor = if song_index > quality.fatigue_free_songs {
        quality
            .fatigue_rate
            .powi((song_index - quality.fatigue_free_songs) as i32)
    } else {
        1.0
    };

    // 5. mood
    let mood_factor = (1.0 - quality.mood_band / 2.0) + quality.mood_band * (artist.mood() / 100.0);

    // 6. budget efficiency
    let min_viable = minimum_viable_cost(producer, time, song_count, economy) as f64;
    let ratio = budget_per_song.max(0) as f64 / min_viable;
    let budget_factor = budget_efficiency_multiplier(ratio);

    let mut value =
        base * time_factor * popularity_factor * fatigue_factor * mood_factor * budget_factor;

    // 7. skill-scaled variance and outliers. High combined skill narrows
    // the band and starves the outliers; low skill widens both.
    let combined_skill = ((artist.talent() + producer_skill) / 2.0).clamp(0.0, 100.0);
    let band = quality.variance_base
        - (quality.variance_base - quality.variance_floor) * (combined_skill / 100.0);
    value *= rng.variance(band);

    let skill_gap = 100.0 - combined_skill;
    let breakout_p = quality.breakout_chance_base + skill_gap * quality.breakout_skill_bias;
    let critfail_p =
        quality.critical_failure_chance_base + skill_gap * quality.critical_failure_skill_bias;

    let outlier_roll = rng.next_f64();
    if outlier_roll < breakout_p {
        value += rng.range(8, 17) as f64;
    } else if outlier_roll < breakout_p + critfail_p {
        value -= rng.range(10, 23) as f64 + skill_gap * 0.05;
    }

    value.round().clamp(QUALITY_MIN, QUALITY_MAX) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn artist(talent: f64, work_ethic: f64) -> Artist {
        Artist::new(
            Uuid::from_u128(1),
            "Test".to_string(),
            talent,
            work_ethic,
            50.0,
            50.0,
            10_000,
            0,
        )
    }

    #[test]
    fn test_budget_curve_continuous_at_breakpoints() {
        for bp in [
            HEAVY_PENALTY_CUTOFF,
            EFFICIENT_START,
            EFFICIENT_END,
            PREMIUM_END,
            LUXURY_END,
        ] {
            let below = budget_efficiency_multiplier(bp - 1e-9);
            let at = budget_efficiency_multiplier(bp);
            assert!(
                (below - at).abs() < 1e-6,
                "discontinuity at ratio {bp}: {below} vs {at}"
            );
        }
    }

    #[test]
    fn test_budget_curve_monotone_non_decreasing() {
        let mut prev = budget_efficiency_multiplier(0.0);
        let mut r = 0.0;
        while r < 6.0 {
            r += 0.01;
            let cur = budget_efficiency_multiplier(r);
            assert!(cur + 1e-12 >= prev, "curve decreased at ratio {r}");
            prev = cur;
        }
    }

    #[test]
    fn test_budget_tail_is_sublinear() {
        let at_luxury = budget_efficiency_multiplier(LUXURY_END);
        let at_double = budget_efficiency_multiplier(LUXURY_END * 2.0);
        let at_quad = budget_efficiency_multiplier(LUXURY_END * 4.0);
        assert!((at_double - at_luxury) > (at_quad - at_double) * 0.99);
        assert!(at_quad < 1.15);
    }

    #[test]
    fn test_efficient_plateau_is_flat() {
        assert_eq!(budget_efficiency_multiplier(1.0), EFFICIENT_MULT);
        assert_eq!(budget_efficiency_multiplier(1.3), EFFICIENT_MULT);
        assert_eq!(budget_efficiency_multiplier(1.59), EFFICIENT_MULT);
    }

    #[test]
    fn test_quality_always_in_range() {
        let quality_cfg = QualityConfig::default();
        let economy = EconomyConfig::default();
        let mut rng = RngManager::new(7);
        let a = artist(100.0, 100.0);
        for i in 1..=12 {
            let q = song_quality(
                &a,
                ProducerTier::Legendary,
                TimeInvestment::Perfectionist,
                5_000_000,
                12,
                i,
                &quality_cfg,
                &economy,
                &mut rng,
            );
            assert!((20..=98).contains(&q));
        }
        let b = artist(20.0, 20.0);
        for i in 1..=12 {
            let q = song_quality(
                &b,
                ProducerTier::Local,
                TimeInvestment::Rushed,
                1_000,
                12,
                i,
                &quality_cfg,
                &economy,
                &mut rng,
            );
            assert!((20..=98).contains(&q));
        }
    }

    #[test]
    fn test_calibration_band_for_average_ep() {
        // talent 50, regional producer, standard time, efficient budget
        // (ratio ~1.0) on a 5-song EP: average quality must land in 55–70.
        let quality_cfg = QualityConfig::default();
        let economy = EconomyConfig::default();
        let a = artist(50.0, 50.0);
        let budget = minimum_viable_cost(
            ProducerTier::Regional,
            TimeInvestment::Standard,
            5,
            &economy,
        );

        let mut total = 0.0;
        let mut count = 0u32;
        for seed in 1..=200u64 {
            let mut rng = RngManager::new(seed);
            for i in 1..=5 {
                total += song_quality(
                    &a,
                    ProducerTier::Regional,
                    TimeInvestment::Standard,
                    budget,
                    5,
                    i,
                    &quality_cfg,
                    &economy,
                    &mut rng,
                ) as f64;
                count += 1;
            }
        }
        let avg = total / count as f64;
        assert!(
            (55.0..=70.0).contains(&avg),
            "calibration drifted: average quality {avg}"
        );
    }

    #[test]
    fn test_fatigue_lowers_later_songs() {
        let quality_cfg = QualityConfig::default();
        let economy = EconomyConfig::default();
        let a = artist(60.0, 50.0);
        let budget = minimum_viable_cost(
            ProducerTier::Regional,
            TimeInvestment::Standard,
            10,
            &economy,
        );

        // Average across many seeds so variance washes out.
        let avg_at = |index: u32| {
            let mut total = 0.0;
            for seed in 1..=300u64 {
                let mut rng = RngManager::new(seed * 31);
                total += song_quality(
                    &a,
                    ProducerTier::Regional,
                    TimeInvestment::Standard,
                    budget,
                    10,
                    index,
                    &quality_cfg,
                    &economy,
                    &mut rng,
                ) as f64;
            }
            total / 300.0
        };
        assert!(avg_at(10) < avg_at(1));
    }

    #[test]
    fn test_scale_discount_reduces_min_viable() {
        let economy = EconomyConfig::default();
        let single = minimum_viable_cost(
            ProducerTier::Regional,
            TimeInvestment::Standard,
            1,
            &economy,
        );
        let album = minimum_viable_cost(
            ProducerTier::Regional,
            TimeInvestment::Standard,
            12,
            &economy,
        );
        assert!(album < single);
    }
}
