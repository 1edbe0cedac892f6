//! Streaming decay behavior over the weeks after release

use label_simulator_core_rs::formulas::revenue::{decayed_streams, initial_streams};
use label_simulator_core_rs::GameConfig;

#[test]
fn test_pure_geometric_decay_without_awareness() {
    let market = GameConfig::default().market;
    let initial = 100_000.0;

    // With no marketing there is no awareness boost, so six periods of
    // decay are exactly geometric.
    let mut streams = initial;
    for period in 0..6 {
        let result = decayed_streams(streams, period, 0.0, &market);
        assert!(result.still_active);
        streams = result.streams;
    }

    let expected = initial * market.weekly_decay.powi(6);
    assert!(
        (streams - expected).abs() < 1e-6,
        "streams = {streams}, expected = {expected}"
    );
}

#[test]
fn test_awareness_slows_decay() {
    let market = GameConfig::default().market;

    let plain = decayed_streams(50_000.0, 0, 0.0, &market);
    let boosted = decayed_streams(50_000.0, 0, 5.0, &market);
    assert!(boosted.streams > plain.streams);
}

#[test]
fn test_awareness_boost_is_capped() {
    let market = GameConfig::default().market;

    let high = decayed_streams(50_000.0, 0, 1_000.0, &market);
    let expected = 50_000.0 * market.weekly_decay * (1.0 + market.awareness_boost_cap);
    assert!((high.streams - expected).abs() < 1e-6);
}

#[test]
fn test_song_deactivates_below_revenue_floor() {
    let market = GameConfig::default().market;

    // Small enough that one more decayed period earns under the floor.
    let tiny = (market.min_weekly_revenue as f64) / market.revenue_per_stream / 2.0;
    let result = decayed_streams(tiny, 0, 0.0, &market);
    assert!(!result.still_active);
    assert_eq!(result.revenue, 0);
}

#[test]
fn test_song_deactivates_after_max_periods() {
    let market = GameConfig::default().market;

    let result = decayed_streams(1_000_000.0, market.max_decay_periods, 0.0, &market);
    assert!(!result.still_active);
    assert_eq!(result.streams, 0.0);
}

#[test]
fn test_initial_streams_scale_with_quality_and_tier() {
    let market = GameConfig::default().market;

    let low = initial_streams(40, 0, 10.0, 0, &market);
    let high = initial_streams(80, 0, 10.0, 0, &market);
    assert!(high > low);

    let tier0 = initial_streams(60, 0, 10.0, 0, &market);
    let tier3 = initial_streams(60, 3, 10.0, 0, &market);
    assert!(tier3 > tier0);

    // Tier index saturates rather than panicking.
    let beyond = initial_streams(60, 9, 10.0, 0, &market);
    assert_eq!(beyond, tier3);
}

#[test]
fn test_marketing_has_diminishing_returns() {
    let market = GameConfig::default().market;

    let none = initial_streams(60, 1, 10.0, 0, &market);
    let some = initial_streams(60, 1, 10.0, 500_000, &market);
    let more = initial_streams(60, 1, 10.0, 2_000_000, &market);

    let first_lift = some - none;
    let second_lift = more - some;
    assert!(first_lift > 0.0);
    // Quadrupling spend less than doubles the lift (square-root shape).
    assert!(second_lift < first_lift * 2.0);
}
