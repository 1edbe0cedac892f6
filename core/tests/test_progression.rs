//! Access-tier progression over a full reputation climb

use label_simulator_core_rs::{AccessTiers, GameConfig, TierTrack};

#[test]
fn test_full_climb_unlocks_everything_in_order() {
    let config = GameConfig::default().progression;
    let mut access = AccessTiers::new();

    // Reputation climbs five points a week; every threshold crossing must
    // unlock exactly one tier per track per week.
    let mut reputation = 0.0;
    for week in 1..=16 {
        reputation += 5.0;
        let unlocks = access.check_progression(reputation, week, &config);
        for unlock in &unlocks {
            assert_eq!(unlock.week, week);
        }
    }

    assert_eq!(access.tier(TierTrack::Playlist), 3);
    assert_eq!(access.tier(TierTrack::Press), 3);
    assert_eq!(access.tier(TierTrack::Venue), 3);

    // History is append-only and ordered by week.
    let history = access.history();
    assert_eq!(history.len(), 9);
    for pair in history.windows(2) {
        assert!(pair[0].week <= pair[1].week);
    }
}

#[test]
fn test_unlock_weeks_match_thresholds() {
    let config = GameConfig::default().progression;
    let mut access = AccessTiers::new();

    // +5 reputation per week: venue tier 1 (threshold 10) on week 2,
    // press tier 1 (threshold 15) on week 3, playlist tier 1 (20) on week 4.
    let mut reputation = 0.0;
    for week in 1..=4 {
        reputation += 5.0;
        access.check_progression(reputation, week, &config);
    }

    assert_eq!(access.unlocked_at(TierTrack::Venue, 1), Some(2));
    assert_eq!(access.unlocked_at(TierTrack::Press, 1), Some(3));
    assert_eq!(access.unlocked_at(TierTrack::Playlist, 1), Some(4));
}

#[test]
fn test_tiers_never_regress() {
    let config = GameConfig::default().progression;
    let mut access = AccessTiers::new();

    access.check_progression(75.0, 1, &config);
    let after_peak = (
        access.tier(TierTrack::Playlist),
        access.tier(TierTrack::Press),
        access.tier(TierTrack::Venue),
    );

    // Reputation collapse: unlocked tiers stay unlocked.
    let unlocks = access.check_progression(2.0, 2, &config);
    assert!(unlocks.is_empty());
    assert_eq!(
        (
            access.tier(TierTrack::Playlist),
            access.tier(TierTrack::Press),
            access.tier(TierTrack::Venue),
        ),
        after_peak
    );
}

#[test]
fn test_one_tier_per_track_per_check() {
    let config = GameConfig::default().progression;
    let mut access = AccessTiers::new();

    // Reputation 50 clears two playlist thresholds at once, but a single
    // check only advances one tier.
    let unlocks = access.check_progression(50.0, 1, &config);
    let playlist_unlocks = unlocks
        .iter()
        .filter(|u| u.track == TierTrack::Playlist)
        .count();
    assert_eq!(playlist_unlocks, 1);
    assert_eq!(access.tier(TierTrack::Playlist), 1);

    // The next check picks up the second threshold.
    access.check_progression(50.0, 2, &config);
    assert_eq!(access.tier(TierTrack::Playlist), 2);
}
