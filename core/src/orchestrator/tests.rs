//! Engine integration tests: full ticks over real state

use uuid::Uuid;

use crate::config::GameConfig;
use crate::models::action::{MeetingChoice, PlayerAction, SigningOffer};
use crate::models::project::{ProducerTier, ProjectStage, StageError, TimeInvestment};
use crate::models::release::MarketingSpend;
use crate::models::state::{GameState, InvariantViolation};
use crate::models::summary::ChangeRecord;
use crate::orchestrator::engine::{Engine, SimulationError, ValidationError};

fn engine() -> Engine {
    Engine::new(GameConfig::default()).expect("default config is valid")
}

fn start_state(seed: u64) -> GameState {
    GameState::new(seed, 10_000_000, &GameConfig::default())
}

fn offer() -> SigningOffer {
    SigningOffer {
        name: "Nova Lane".to_string(),
        talent: 70.0,
        work_ethic: 60.0,
        creativity: 55.0,
        mass_appeal: 50.0,
        signing_bonus: 50_000,
        weekly_cost: 0,
    }
}

fn sign(engine: &Engine, state: &GameState) -> (GameState, Uuid) {
    let (state, _) = engine
        .advance_week(state, &[PlayerAction::SignArtist { offer: offer() }])
        .expect("signing succeeds");
    let artist_id = *state.artists.keys().next().expect("one artist on roster");
    (state, artist_id)
}

#[test]
fn test_sign_artist_debits_bonus() {
    let engine = engine();
    let state = start_state(1);

    let (state, summary) = engine
        .advance_week(&state, &[PlayerAction::SignArtist { offer: offer() }])
        .unwrap();

    assert_eq!(state.artists.len(), 1);
    assert_eq!(state.money(), 10_000_000 - 50_000);
    assert_eq!(summary.money_delta, -50_000);
    assert_eq!(state.week(), 1);
}

#[test]
fn test_focus_slots_bound_the_batch() {
    let engine = engine();
    let (state, artist_id) = sign(&engine, &start_state(2));

    let meeting = PlayerAction::RoleMeeting {
        artist_id,
        choice: MeetingChoice::Encourage,
    };
    let batch = vec![meeting.clone(), meeting.clone(), meeting.clone(), meeting];
    let err = engine.advance_week(&state, &batch).unwrap_err();

    assert!(matches!(
        err,
        SimulationError::Validation(ValidationError::FocusSlotsExceeded {
            requested: 4,
            available: 3,
        })
    ));
}

#[test]
fn test_unknown_artist_rejects_whole_batch() {
    let engine = engine();
    let (state, artist_id) = sign(&engine, &start_state(3));

    // One valid action and one bad one: nothing may apply.
    let batch = vec![
        PlayerAction::RoleMeeting {
            artist_id,
            choice: MeetingChoice::Encourage,
        },
        PlayerAction::RoleMeeting {
            artist_id: Uuid::from_u64_pair(9, 9),
            choice: MeetingChoice::Encourage,
        },
    ];
    let err = engine.advance_week(&state, &batch).unwrap_err();
    assert!(matches!(
        err,
        SimulationError::Validation(ValidationError::UnknownArtist(_))
    ));
}

#[test]
fn test_error_leaves_prior_snapshot_untouched() {
    let engine = engine();
    let (state, _) = sign(&engine, &start_state(4));
    let before = serde_json::to_string(&state).unwrap();

    let bad = PlayerAction::GrantTimeOff {
        artist_id: Uuid::from_u64_pair(1, 2),
    };
    assert!(engine.advance_week(&state, &[bad]).is_err());

    assert_eq!(serde_json::to_string(&state).unwrap(), before);
}

#[test]
fn test_duplicate_finalize_budget_aborts_the_tick() {
    let engine = engine();
    let (state, artist_id) = sign(&engine, &start_state(11));
    let (state, _) = engine
        .advance_week(
            &state,
            &[PlayerAction::StartProject {
                artist_id,
                title: "Night Maps".to_string(),
                producer: ProducerTier::Regional,
                time_investment: TimeInvestment::Standard,
                budget_per_song: 200_000,
                song_count: 2,
            }],
        )
        .unwrap();
    let project_id = *state.projects.keys().next().unwrap();
    let before = serde_json::to_string(&state).unwrap();

    // Both copies pass pre-batch validation; the second must still not
    // debit the project cost a second time.
    let batch = vec![
        PlayerAction::FinalizeBudget { project_id },
        PlayerAction::FinalizeBudget { project_id },
    ];
    let err = engine.advance_week(&state, &batch).unwrap_err();
    assert!(matches!(
        err,
        SimulationError::Invariant(InvariantViolation::Stage(
            StageError::BudgetAlreadyFinalized { .. }
        ))
    ));

    // Whole batch rejected: no money left the account.
    assert_eq!(serde_json::to_string(&state).unwrap(), before);
    assert_eq!(state.money(), 10_000_000 - 50_000);
}

#[test]
fn test_album_lifecycle_to_release() {
    let engine = engine();
    let (state, artist_id) = sign(&engine, &start_state(5)); // week 1

    // Week 2: open a two-song EP.
    let (state, _) = engine
        .advance_week(
            &state,
            &[PlayerAction::StartProject {
                artist_id,
                title: "Night Maps".to_string(),
                producer: ProducerTier::Regional,
                time_investment: TimeInvestment::Standard,
                budget_per_song: 200_000,
                song_count: 2,
            }],
        )
        .unwrap();
    let project_id = *state.projects.keys().next().unwrap();
    assert!(matches!(
        state.projects[&project_id].stage(),
        ProjectStage::Planning {
            budget_finalized: false
        }
    ));

    // Week 3: commit the budget; the project enters writing the same tick.
    let money_before = state.money();
    let (state, _) = engine
        .advance_week(&state, &[PlayerAction::FinalizeBudget { project_id }])
        .unwrap();
    assert_eq!(state.money(), money_before - 400_000);
    assert!(matches!(
        state.projects[&project_id].stage(),
        ProjectStage::Writing { .. }
    ));

    // Weeks 4-5: writing window (1 week of songs + 1 extra for Standard).
    let (state, _) = engine.advance_week(&state, &[]).unwrap();
    let (state, _) = engine.advance_week(&state, &[]).unwrap();
    assert!(matches!(
        state.projects[&project_id].stage(),
        ProjectStage::Recording { .. }
    ));

    // Weeks 6-7: one song per week at Standard pace.
    let (state, _) = engine.advance_week(&state, &[]).unwrap();
    let (state, summary) = engine.advance_week(&state, &[]).unwrap();
    assert_eq!(state.songs.len(), 2);
    assert!(matches!(
        state.projects[&project_id].stage(),
        ProjectStage::Recorded
    ));
    assert!(summary
        .changes
        .iter()
        .any(|c| matches!(c, ChangeRecord::SongRecorded { .. })));
    for song in state.songs.values() {
        assert!(song.quality() >= 20 && song.quality() <= 98);
        assert!(!song.is_released());
    }

    // Week 8: plan the release for next week.
    let (state, _) = engine
        .advance_week(
            &state,
            &[PlayerAction::PlanRelease {
                project_id,
                title: "Night Maps".to_string(),
                marketing: MarketingSpend::default(),
                lead_single: false,
            }],
        )
        .unwrap();
    assert!(matches!(
        state.projects[&project_id].stage(),
        ProjectStage::Released { .. }
    ));

    // Week 9: the drop ships and streaming revenue lands.
    let money_before = state.money();
    let (state, summary) = engine.advance_week(&state, &[]).unwrap();
    assert!(summary.changes.iter().any(|c| matches!(
        c,
        ChangeRecord::ReleaseShipped {
            lead_single: false,
            ..
        }
    )));
    assert!(state.money() > money_before);
    for song in state.songs.values() {
        assert!(song.is_released());
        assert!(song.total_streams() > 0);
    }
}

#[test]
fn test_delayed_effect_fires_exactly_once() {
    let engine = engine();
    let (state, artist_id) = sign(&engine, &start_state(6));

    let (state, _) = engine
        .advance_week(
            &state,
            &[PlayerAction::RoleMeeting {
                artist_id,
                choice: MeetingChoice::PushHarder,
            }],
        )
        .unwrap();
    assert_eq!(state.effects.len(), 1);

    let fired = |summary: &crate::models::summary::WeekSummary| {
        summary
            .changes
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    ChangeRecord::EffectFired { provenance, .. }
                        if provenance == "role_meeting-push_harder-delayed"
                )
            })
            .count()
    };

    let (state, summary) = engine.advance_week(&state, &[]).unwrap();
    assert_eq!(fired(&summary), 1);
    assert!(state.effects.is_empty());

    let (_, summary) = engine.advance_week(&state, &[]).unwrap();
    assert_eq!(fired(&summary), 0);
}

#[test]
fn test_identical_runs_serialize_identically() {
    let engine = engine();

    let run = || {
        let mut state = start_state(42);
        let actions = vec![PlayerAction::SignArtist { offer: offer() }];
        let (next, _) = engine.advance_week(&state, &actions).unwrap();
        state = next;
        for _ in 0..5 {
            let (next, _) = engine.advance_week(&state, &[]).unwrap();
            state = next;
        }
        serde_json::to_string(&state).unwrap()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_month_is_four_weekly_ticks() {
    let engine = engine();
    let state = start_state(7);

    let (state, summary) = engine
        .advance_month(&state, &[PlayerAction::SignArtist { offer: offer() }])
        .unwrap();

    assert_eq!(state.week(), 4);
    assert!(state.time().is_month_end());
    assert_eq!(summary.weeks.len(), 4);
    assert_eq!(summary.month, 0);
    assert_eq!(state.artists.len(), 1);
    // Actions resolve only on the first sub-week.
    assert!(summary.weeks[0]
        .changes
        .iter()
        .any(|c| matches!(c, ChangeRecord::ActionResolved { .. })));
    for week in &summary.weeks[1..] {
        assert!(!week
            .changes
            .iter()
            .any(|c| matches!(c, ChangeRecord::ActionResolved { .. })));
    }
}

#[test]
fn test_insufficient_funds_rejected() {
    let engine = engine();
    let config = GameConfig::default();
    let state = GameState::new(8, 10_000, &config);

    let mut expensive = offer();
    expensive.signing_bonus = 5_000_000;
    let err = engine
        .advance_week(&state, &[PlayerAction::SignArtist { offer: expensive }])
        .unwrap_err();
    assert!(matches!(
        err,
        SimulationError::Validation(ValidationError::InsufficientFunds { .. })
    ));
}
