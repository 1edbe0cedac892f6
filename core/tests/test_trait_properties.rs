//! Property tests for trait clamping and formula bounds

use proptest::prelude::*;
use uuid::Uuid;

use label_simulator_core_rs::formulas::quality::{
    budget_efficiency_multiplier, song_quality, QUALITY_MAX, QUALITY_MIN,
};
use label_simulator_core_rs::{
    Artist, GameConfig, ProducerTier, RngManager, TimeInvestment, TraitDeltas,
};

fn artist(talent: f64, work_ethic: f64) -> Artist {
    Artist::new(
        Uuid::from_u64_pair(1, 1),
        "Test Artist".to_string(),
        talent,
        work_ethic,
        50.0,
        50.0,
        0,
        0,
    )
}

proptest! {
    #[test]
    fn traits_never_escape_clamp_ranges(
        mood in -500.0f64..500.0,
        stress in -500.0f64..500.0,
        creativity in -500.0f64..500.0,
        popularity in -500.0f64..500.0,
        loyalty in -500.0f64..500.0,
        work_ethic in -500.0f64..500.0,
    ) {
        let mut subject = artist(60.0, 55.0);
        subject.apply_deltas(&TraitDeltas {
            mood,
            stress,
            creativity,
            popularity,
            loyalty,
            work_ethic,
        });
        prop_assert!(subject.traits_in_range());
    }

    #[test]
    fn budget_multiplier_is_monotone(a in 0.0f64..8.0, b in 0.0f64..8.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            budget_efficiency_multiplier(lo) <= budget_efficiency_multiplier(hi) + 1e-9
        );
    }

    #[test]
    fn quality_stays_in_bounds(
        talent in 0.0f64..100.0,
        work_ethic in 0.0f64..100.0,
        budget in 1i64..3_000_000,
        song_index in 1u32..12,
        seed in 1u64..u64::MAX,
    ) {
        let config = GameConfig::default();
        let mut rng = RngManager::new(seed);
        let subject = artist(talent, work_ethic);

        let quality = song_quality(
            &subject,
            ProducerTier::Regional,
            TimeInvestment::Standard,
            budget,
            12,
            song_index,
            &config.quality,
            &config.economy,
            &mut rng,
        );
        prop_assert!((QUALITY_MIN..=QUALITY_MAX).contains(&f64::from(quality)));
    }
}

#[test]
fn test_budget_multiplier_saturates() {
    // The luxury tail is logarithmic: ratio 8 vs ratio 16 differ by far
    // less than ratio 1 vs ratio 2.
    let mid_gain = budget_efficiency_multiplier(2.0) - budget_efficiency_multiplier(1.0);
    let tail_gain = budget_efficiency_multiplier(16.0) - budget_efficiency_multiplier(8.0);
    assert!(tail_gain < mid_gain);
    assert!(tail_gain >= 0.0);
}
