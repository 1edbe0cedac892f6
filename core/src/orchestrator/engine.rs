//! Orchestrator engine
//!
//! The weekly tick loop integrating every component, in fixed order:
//!
//! ```text
//! For each week:
//! 1. Validate the whole action batch (focus slots, funds, targets)
//! 2. Apply each action's immediate effects
//! 3. Enqueue each action's delayed effects
//! 4. Fire due delayed effects and delete them
//! 5. Advance project stages (quality formula per song recorded)
//! 6. Run the psychology model over signed artists
//! 7. Run revenue/decay over released songs, due releases and tours
//! 8. Re-evaluate access-tier progression
//! 9. Recompute artist archetypes
//! 10. Assemble the summary and return the new snapshot
//! ```
//!
//! The ordering is a correctness invariant; swapping steps changes
//! outcomes. A month is the same routine run four times with the summary
//! aggregated across the sub-ticks.
//!
//! # Atomicity
//!
//! Every tick mutates a working clone of the caller's snapshot. Any error
//! at any step discards the clone; the caller keeps the unmodified prior
//! snapshot, never a partially-advanced one.
//!
//! # Determinism
//!
//! All randomness flows through the snapshot's own `RngManager`, entity
//! maps iterate in key order, and no step performs I/O. Identical
//! (snapshot, actions, config) input produces identical output.

use thiserror::Error;
use uuid::Uuid;

use crate::config::{ConfigError, GameConfig};
use crate::core::time::WEEKS_PER_MONTH;
use crate::effects::{EffectScope, ScheduledEffect, TraitDeltas};
use crate::formulas::{archetype, psychology, quality, revenue};
use crate::models::action::PlayerAction;
use crate::models::artist::Artist;
use crate::models::project::{Project, ProjectStage};
use crate::models::release::{LeadSingle, Release, Tour};
use crate::models::song::Song;
use crate::models::state::{GameState, InvariantViolation};
use crate::models::summary::{
    ArtistDelta, ChangeRecord, MonthSummary, NarrativeEvent, WeekSummary,
};
use crate::progression::TierTrack;

/// Action-batch rejection, raised before any mutation
///
/// One bad action rejects the whole batch; partial application of an
/// invalid batch is forbidden.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{requested} actions requested but only {available} focus slots available")]
    FocusSlotsExceeded { requested: usize, available: usize },

    #[error("insufficient funds: batch needs {required}, available {available}")]
    InsufficientFunds { required: i64, available: i64 },

    #[error("unknown artist {0}")]
    UnknownArtist(Uuid),

    #[error("artist {0} is not signed to the label")]
    ArtistNotSigned(Uuid),

    #[error("unknown project {0}")]
    UnknownProject(Uuid),

    #[error("unknown release {0}")]
    UnknownRelease(Uuid),

    #[error("project {0} is not in the planning stage")]
    ProjectNotInPlanning(Uuid),

    #[error("project {0} already has a finalized budget")]
    BudgetAlreadyFinalized(Uuid),

    #[error("project {0} is not fully recorded")]
    ProjectNotRecorded(Uuid),

    #[error("invalid action parameter: {0}")]
    InvalidParameter(&'static str),
}

/// Top-level tick failure
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("action batch rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] crate::orchestrator::checkpoint::SnapshotError),
}

impl From<crate::models::project::StageError> for SimulationError {
    fn from(err: crate::models::project::StageError) -> Self {
        SimulationError::Invariant(InvariantViolation::Stage(err))
    }
}

/// The simulation engine: a validated config plus the two tick entry points
///
/// The engine itself is stateless between calls; all playthrough state
/// lives in the `GameState` snapshots it is handed.
pub struct Engine {
    config: GameConfig,
}

impl Engine {
    /// Build an engine around a validated configuration bundle
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Advance one week
    ///
    /// Returns the new snapshot plus the week's summary, or an error with
    /// the caller's snapshot untouched.
    pub fn advance_week(
        &self,
        state: &GameState,
        actions: &[PlayerAction],
    ) -> Result<(GameState, WeekSummary), SimulationError> {
        // All mutation happens on the working clone.
        let mut next = state.clone();
        next.advance_week();
        let week = next.week();

        let prior_money = next.money();
        let prior_reputation = next.reputation();
        let prior_traits: Vec<(Uuid, String, TraitSnapshot)> = next
            .artists
            .iter()
            .map(|(id, a)| (*id, a.name().to_string(), TraitSnapshot::of(a)))
            .collect();

        let mut summary = WeekSummary::new(week);

        // Step 1: whole-batch validation against the pre-action state.
        self.validate_batch(&next, actions)?;

        // Steps 2 + 3: immediate effects applied, delayed effects enqueued.
        for action in actions {
            self.apply_action(&mut next, action, &mut summary)?;
        }

        // Step 4: fire due delayed effects, deleting them as they fire.
        self.fire_due_effects(&mut next, &mut summary);

        // Step 5: project lifecycle.
        self.advance_projects(&mut next, &mut summary)?;

        // Step 6: psychology over every signed artist.
        self.run_psychology(&mut next, &mut summary);

        // Step 7: revenue and decay, weekly costs, month rollover.
        self.run_revenue(&mut next, &mut summary);
        self.apply_weekly_costs(&mut next, &mut summary);
        if next.time().is_month_end() {
            for artist in next.artists.values_mut() {
                artist.roll_month();
            }
        }

        // Step 8: access-tier progression against updated reputation.
        let unlocks = next
            .access
            .check_progression(next.reputation(), week, &self.config.progression);
        for unlock in unlocks {
            summary.record(ChangeRecord::TierUnlocked {
                track: unlock.track.name().to_string(),
                tier: unlock.tier,
            });
        }

        // Step 9: archetype recompute (pure, field write only).
        for artist in next.artists.values_mut() {
            let archetype = archetype::derive(artist);
            artist.set_archetype(archetype);
        }

        // Step 10: invariant sweep, summary assembly.
        next.check_invariants(&self.config)?;

        summary.money_delta = next.money() - prior_money;
        summary.reputation_delta = next.reputation() - prior_reputation;
        for (id, name, before) in prior_traits {
            if let Some(artist) = next.artists.get(&id) {
                let deltas = before.delta_to(artist);
                if !deltas.is_zero() {
                    summary.artist_deltas.push(ArtistDelta {
                        artist_id: id,
                        name,
                        deltas,
                    });
                }
            }
        }

        Ok((next, summary))
    }

    /// Advance one month: four weekly ticks, actions on the first,
    /// summaries aggregated
    pub fn advance_month(
        &self,
        state: &GameState,
        actions: &[PlayerAction],
    ) -> Result<(GameState, MonthSummary), SimulationError> {
        let month = state.month();
        let mut current = state.clone();
        let mut weeks = Vec::with_capacity(WEEKS_PER_MONTH);

        for sub_week in 0..WEEKS_PER_MONTH {
            let batch: &[PlayerAction] = if sub_week == 0 { actions } else { &[] };
            let (advanced, summary) = self.advance_week(&current, batch)?;
            current = advanced;
            weeks.push(summary);
        }

        Ok((current, MonthSummary::from_weeks(month, weeks)))
    }

    // ====================================================================
    // Step 1: validation
    // ====================================================================

    fn validate_batch(
        &self,
        state: &GameState,
        actions: &[PlayerAction],
    ) -> Result<(), ValidationError> {
        let capacity = state.focus_capacity() as usize;
        if actions.len() > capacity {
            return Err(ValidationError::FocusSlotsExceeded {
                requested: actions.len(),
                available: capacity,
            });
        }

        let mut required = 0i64;
        for action in actions {
            required += action.money_cost();
            self.validate_action(state, action)?;
            if let PlayerAction::FinalizeBudget { project_id } = action {
                if let Some(project) = state.projects.get(project_id) {
                    required += project.total_cost();
                }
            }
        }

        let available = state.money() + self.config.economy.overdraft_limit;
        if required > available {
            return Err(ValidationError::InsufficientFunds {
                required,
                available,
            });
        }

        Ok(())
    }

    fn validate_action(
        &self,
        state: &GameState,
        action: &PlayerAction,
    ) -> Result<(), ValidationError> {
        let signed_artist = |id: &Uuid| -> Result<(), ValidationError> {
            let artist = state
                .artists
                .get(id)
                .ok_or(ValidationError::UnknownArtist(*id))?;
            if !artist.is_signed() {
                return Err(ValidationError::ArtistNotSigned(*id));
            }
            Ok(())
        };

        match action {
            PlayerAction::SignArtist { offer } => {
                if offer.signing_bonus < 0 || offer.weekly_cost < 0 {
                    return Err(ValidationError::InvalidParameter(
                        "signing costs must be non-negative",
                    ));
                }
            }
            PlayerAction::StartProject {
                artist_id,
                budget_per_song,
                song_count,
                ..
            } => {
                signed_artist(artist_id)?;
                if *song_count == 0 {
                    return Err(ValidationError::InvalidParameter(
                        "song_count must be at least 1",
                    ));
                }
                if *budget_per_song <= 0 {
                    return Err(ValidationError::InvalidParameter(
                        "budget_per_song must be positive",
                    ));
                }
            }
            PlayerAction::FinalizeBudget { project_id } => {
                let project = state
                    .projects
                    .get(project_id)
                    .ok_or(ValidationError::UnknownProject(*project_id))?;
                match project.stage() {
                    ProjectStage::Planning {
                        budget_finalized: false,
                    } => {}
                    ProjectStage::Planning {
                        budget_finalized: true,
                    } => return Err(ValidationError::BudgetAlreadyFinalized(*project_id)),
                    _ => return Err(ValidationError::ProjectNotInPlanning(*project_id)),
                }
            }
            PlayerAction::PlanRelease {
                project_id,
                marketing,
                ..
            } => {
                let project = state
                    .projects
                    .get(project_id)
                    .ok_or(ValidationError::UnknownProject(*project_id))?;
                if !matches!(project.stage(), ProjectStage::Recorded) {
                    return Err(ValidationError::ProjectNotRecorded(*project_id));
                }
                if marketing.social < 0 || marketing.press < 0 || marketing.radio < 0 {
                    return Err(ValidationError::InvalidParameter(
                        "marketing spend must be non-negative",
                    ));
                }
            }
            PlayerAction::MarketingPush { release_id, spend } => {
                if !state.releases.contains_key(release_id) {
                    return Err(ValidationError::UnknownRelease(*release_id));
                }
                if spend.social < 0 || spend.press < 0 || spend.radio < 0 {
                    return Err(ValidationError::InvalidParameter(
                        "marketing spend must be non-negative",
                    ));
                }
            }
            PlayerAction::BookTour {
                artist_id,
                cities,
                ticket_price,
                budget,
            } => {
                signed_artist(artist_id)?;
                if *cities == 0 {
                    return Err(ValidationError::InvalidParameter(
                        "a tour needs at least one city",
                    ));
                }
                if *ticket_price <= 0 || *budget < 0 {
                    return Err(ValidationError::InvalidParameter(
                        "tour pricing must be positive",
                    ));
                }
            }
            PlayerAction::RoleMeeting { artist_id, .. }
            | PlayerAction::GrantTimeOff { artist_id } => {
                signed_artist(artist_id)?;
            }
        }
        Ok(())
    }

    // ====================================================================
    // Steps 2 + 3: action resolution
    // ====================================================================

    fn apply_action(
        &self,
        state: &mut GameState,
        action: &PlayerAction,
        summary: &mut WeekSummary,
    ) -> Result<(), SimulationError> {
        let week = state.week();

        match action {
            PlayerAction::SignArtist { offer } => {
                let id = state.next_id();
                let cycle_period = self.config.psychology.creativity_cycle_period.max(1.0) as i64;
                let cycle_offset = state.rng.range(0, cycle_period) as usize;
                let artist = Artist::new(
                    id,
                    offer.name.clone(),
                    offer.talent,
                    offer.work_ethic,
                    offer.creativity,
                    offer.mass_appeal,
                    offer.weekly_cost,
                    cycle_offset,
                );
                state.apply_money(-offer.signing_bonus);
                summary.record(ChangeRecord::ActionResolved {
                    action: action.name().to_string(),
                    detail: format!("signed {}", artist.name()),
                });
                state.artists.insert(id, artist);
            }

            PlayerAction::StartProject {
                artist_id,
                title,
                producer,
                time_investment,
                budget_per_song,
                song_count,
            } => {
                let id = state.next_id();
                let project = Project::new(
                    id,
                    *artist_id,
                    title.clone(),
                    *producer,
                    *time_investment,
                    *budget_per_song,
                    *song_count,
                    week,
                );
                summary.record(ChangeRecord::ActionResolved {
                    action: action.name().to_string(),
                    detail: format!("opened \"{}\" ({} songs)", project.title(), song_count),
                });
                state.projects.insert(id, project);
            }

            PlayerAction::FinalizeBudget { project_id } => {
                let project = state
                    .projects
                    .get_mut(project_id)
                    .ok_or(ValidationError::UnknownProject(*project_id))?;
                project.finalize_budget()?;
                let total = project.total_cost();
                let artist_id = project.artist_id();
                let title = project.title().to_string();
                state.apply_money(-total);
                if let Some(artist) = state.artists.get_mut(&artist_id) {
                    artist.add_month_revenue(-total);
                }
                summary.record(ChangeRecord::ActionResolved {
                    action: action.name().to_string(),
                    detail: format!("committed {total} cents to \"{title}\""),
                });
            }

            PlayerAction::PlanRelease {
                project_id,
                title,
                marketing,
                lead_single,
            } => {
                let artist_id = state
                    .projects
                    .get(project_id)
                    .ok_or(ValidationError::UnknownProject(*project_id))?
                    .artist_id();
                let song_ids: Vec<Uuid> = state
                    .songs
                    .values()
                    .filter(|s| s.project_id() == *project_id)
                    .map(|s| s.id())
                    .collect();

                let release_id = state.next_id();
                let (lead, main_week) = if *lead_single {
                    let lead = song_ids.first().map(|song_id| LeadSingle {
                        song_id: *song_id,
                        week: week + 1,
                        shipped: false,
                    });
                    (lead, week + 2)
                } else {
                    (None, week + 1)
                };

                let release = Release::new(
                    release_id,
                    *project_id,
                    artist_id,
                    title.clone(),
                    song_ids,
                    main_week,
                    lead,
                    *marketing,
                );
                state.apply_money(-marketing.total());
                state
                    .projects
                    .get_mut(project_id)
                    .ok_or(ValidationError::UnknownProject(*project_id))?
                    .mark_released(release_id)?;
                summary.record(ChangeRecord::ActionResolved {
                    action: action.name().to_string(),
                    detail: format!("planned release \"{title}\" for week {main_week}"),
                });
                state.releases.insert(release_id, release);
            }

            PlayerAction::MarketingPush { release_id, spend } => {
                let release = state
                    .releases
                    .get_mut(release_id)
                    .ok_or(ValidationError::UnknownRelease(*release_id))?;
                release.add_marketing(spend, &self.config.market);
                let title = release.title().to_string();
                state.apply_money(-spend.total());
                summary.record(ChangeRecord::ActionResolved {
                    action: action.name().to_string(),
                    detail: format!("pushed {} cents behind \"{title}\"", spend.total()),
                });
            }

            PlayerAction::BookTour {
                artist_id,
                cities,
                ticket_price,
                budget,
            } => {
                let id = state.next_id();
                let tour = Tour::new(id, *artist_id, *cities, week + 1, *budget, *ticket_price);
                state.apply_money(-budget);
                if let Some(artist) = state.artists.get_mut(artist_id) {
                    artist.add_month_revenue(-budget);
                }
                summary.record(ChangeRecord::ActionResolved {
                    action: action.name().to_string(),
                    detail: format!("booked a {cities}-city tour for week {}", week + 1),
                });
                state.tours.insert(id, tour);
            }

            PlayerAction::RoleMeeting { artist_id, .. }
            | PlayerAction::GrantTimeOff { artist_id } => {
                let effects = action.effects();
                let artist = state
                    .artists
                    .get_mut(artist_id)
                    .ok_or(ValidationError::UnknownArtist(*artist_id))?;
                artist.apply_deltas(&effects.immediate);
                summary.record(ChangeRecord::ActionResolved {
                    action: action.name().to_string(),
                    detail: format!("with {}", artist.name()),
                });
            }
        }

        // Step 3: delayed effects always go to the registry, never inline.
        for spec in action.effects().delayed {
            state.effects.push(ScheduledEffect {
                trigger_week: week + spec.offset.max(1),
                deltas: spec.deltas,
                scope: spec.scope,
                provenance: action.provenance(),
            });
        }

        Ok(())
    }

    // ====================================================================
    // Step 4: delayed effects
    // ====================================================================

    fn fire_due_effects(&self, state: &mut GameState, summary: &mut WeekSummary) {
        let week = state.week();
        for effect in state.effects.drain_due(week) {
            let targets: Vec<Uuid> = match effect.scope {
                EffectScope::Artist { id } => state
                    .artists
                    .contains_key(&id)
                    .then_some(id)
                    .into_iter()
                    .collect(),
                EffectScope::AllSigned => state.signed_artist_ids(),
            };
            for id in &targets {
                if let Some(artist) = state.artists.get_mut(id) {
                    artist.apply_deltas(&effect.deltas);
                }
            }
            summary.record(ChangeRecord::EffectFired {
                provenance: effect.provenance,
                artists: targets.len(),
            });
        }
    }

    // ====================================================================
    // Step 5: project lifecycle
    // ====================================================================

    fn advance_projects(
        &self,
        state: &mut GameState,
        summary: &mut WeekSummary,
    ) -> Result<(), SimulationError> {
        let week = state.week();
        let project_ids: Vec<Uuid> = state.projects.keys().copied().collect();

        for project_id in project_ids {
            let Some(stage) = state.projects.get(&project_id).map(|p| p.stage().clone()) else {
                continue;
            };
            let before = stage.ordinal();

            match stage {
                ProjectStage::Planning {
                    budget_finalized: true,
                } => {
                    if let Some(project) = state.projects.get_mut(&project_id) {
                        project.begin_writing(week)?;
                        summary.record(ChangeRecord::StageAdvanced {
                            project_id,
                            title: project.title().to_string(),
                            stage: project.stage().name().to_string(),
                        });
                    }
                }
                ProjectStage::Writing {
                    started_week,
                    duration_weeks,
                } => {
                    if week >= started_week + duration_weeks {
                        if let Some(project) = state.projects.get_mut(&project_id) {
                            project.begin_recording(week)?;
                            summary.record(ChangeRecord::StageAdvanced {
                                project_id,
                                title: project.title().to_string(),
                                stage: project.stage().name().to_string(),
                            });
                        }
                    }
                }
                ProjectStage::Recording { .. } => {
                    self.record_songs(state, project_id, summary)?;
                }
                // Recorded waits for an explicit release plan; Released and
                // unfinalized Planning have nothing to do this week.
                _ => {}
            }

            let Some(project) = state.projects.get(&project_id) else {
                continue;
            };
            let after = project.stage().ordinal();
            if after < before {
                return Err(InvariantViolation::StageRegression {
                    project_id,
                    before,
                    after,
                }
                .into());
            }
            if project.is_overdue(week) {
                summary.record(ChangeRecord::ProjectOverdue {
                    project_id,
                    title: project.title().to_string(),
                    weeks_late: week.saturating_sub(project.due_week()),
                });
            }
        }
        Ok(())
    }

    /// Record this week's songs for one recording-stage project
    fn record_songs(
        &self,
        state: &mut GameState,
        project_id: Uuid,
        summary: &mut WeekSummary,
    ) -> Result<(), SimulationError> {
        let Some((artist_id, producer, time, budget, song_count, title)) =
            state.projects.get(&project_id).map(|p| {
                (
                    p.artist_id(),
                    p.producer(),
                    p.time_investment(),
                    p.budget_per_song(),
                    p.song_count(),
                    p.title().to_string(),
                )
            })
        else {
            return Ok(());
        };
        let Some(artist) = state.artists.get(&artist_id).cloned() else {
            // Artist left the roster; the project stalls and surfaces as
            // overdue rather than failing the tick.
            return Ok(());
        };

        for _ in 0..time.songs_per_week() {
            let done = state
                .projects
                .get(&project_id)
                .map(|p| p.songs_created() >= song_count)
                .unwrap_or(true);
            if done {
                break;
            }
            let Some(project) = state.projects.get_mut(&project_id) else {
                break;
            };
            let index = project.record_song()?;

            let song_quality = quality::song_quality(
                &artist,
                producer,
                time,
                budget,
                song_count,
                index,
                &self.config.quality,
                &self.config.economy,
                &mut state.rng,
            );

            let song_id = state.next_id();
            let song_title = format!("{title} #{index}");
            summary.record(ChangeRecord::SongRecorded {
                song_id,
                title: song_title.clone(),
                quality: song_quality,
            });
            state.songs.insert(
                song_id,
                Song::new(song_id, project_id, artist_id, song_title, song_quality),
            );
        }

        if let Some(project) = state.projects.get_mut(&project_id) {
            if matches!(project.stage(), ProjectStage::Recording { .. })
                && project.songs_created() == song_count
            {
                project.mark_recorded()?;
                summary.record(ChangeRecord::StageAdvanced {
                    project_id,
                    title: project.title().to_string(),
                    stage: project.stage().name().to_string(),
                });
            }
        }
        Ok(())
    }

    // ====================================================================
    // Step 6: psychology
    // ====================================================================

    fn run_psychology(&self, state: &mut GameState, summary: &mut WeekSummary) {
        let week = state.week();

        for artist_id in state.signed_artist_ids() {
            let workload = psychology::WorkloadSnapshot {
                active_projects: state.active_project_count(artist_id),
                recording: state.projects.values().any(|p| {
                    p.artist_id() == artist_id
                        && matches!(p.stage(), ProjectStage::Recording { .. })
                }),
                released_this_week: state.releases.values().any(|r| {
                    r.artist_id() == artist_id
                        && (r.main_due(week) || r.lead_due(week).is_some())
                }),
            };

            let Some(artist) = state.artists.get_mut(&artist_id) else {
                continue;
            };
            let outcome =
                psychology::weekly_drift(artist, &workload, week, &self.config.psychology);
            artist.apply_deltas(&outcome.deltas);

            if outcome.breakdown_intervention {
                summary.event(NarrativeEvent::BreakdownIntervention {
                    artist_id,
                    name: artist.name().to_string(),
                });
            }
            if outcome.fame_complications {
                summary.event(NarrativeEvent::FameComplications {
                    artist_id,
                    name: artist.name().to_string(),
                });
            }
        }
    }

    // ====================================================================
    // Step 7: revenue and decay
    // ====================================================================

    fn run_revenue(&self, state: &mut GameState, summary: &mut WeekSummary) {
        let week = state.week();

        // 7a. Ship due lead singles and main drops.
        let release_ids: Vec<Uuid> = state.releases.keys().copied().collect();
        for release_id in release_ids {
            self.ship_due_release(state, release_id, week, summary);
        }

        // 7b. Weekly decay over previously released, still-active songs.
        self.decay_catalog(state, week, summary);

        // 7c. Resolve due tours.
        self.resolve_tours(state, week, summary);

        // 7d. Awareness decays after this week's boosts were taken.
        let market = &self.config.market;
        for release in state.releases.values_mut() {
            if release.is_released() {
                release.decay_awareness(market);
            }
        }
    }

    fn ship_due_release(
        &self,
        state: &mut GameState,
        release_id: Uuid,
        week: usize,
        summary: &mut WeekSummary,
    ) {
        let market = &self.config.market;

        // Lead single phase.
        let lead = state.releases.get(&release_id).and_then(|r| {
            r.lead_due(week)
                .map(|s| (s, r.marketing().total(), r.title().to_string()))
        });
        if let Some((lead_song_id, marketing_total, title)) = lead {
            self.ship_song(state, lead_song_id, week, marketing_total);
            if let Some(release) = state.releases.get_mut(&release_id) {
                release.mark_lead_shipped();
            }
            summary.record(ChangeRecord::ReleaseShipped {
                release_id,
                title,
                songs: 1,
                lead_single: true,
            });
        }

        // Main drop.
        let main = state.releases.get(&release_id).and_then(|r| {
            r.main_due(week).then(|| {
                (
                    r.song_ids().to_vec(),
                    r.marketing().total(),
                    r.title().to_string(),
                )
            })
        });
        let Some((song_ids, marketing_total, title)) = main else {
            return;
        };

        let mut first_week_streams = 0u64;
        let mut qualities = Vec::new();
        let mut shipped = 0usize;
        for song_id in song_ids {
            if state.songs.get(&song_id).is_some_and(|s| !s.is_released()) {
                self.ship_song(state, song_id, week, marketing_total);
                shipped += 1;
            }
            if let Some(song) = state.songs.get(&song_id) {
                first_week_streams += song.last_streams().round() as u64;
                qualities.push(f64::from(song.quality()));
            }
        }
        if let Some(release) = state.releases.get_mut(&release_id) {
            release.mark_released(market);
        }

        summary.record(ChangeRecord::ReleaseShipped {
            release_id,
            title: title.clone(),
            songs: shipped,
            lead_single: false,
        });

        // Reputation moves with release quality; good releases also bank
        // creative capital.
        if !qualities.is_empty() {
            let avg = qualities.iter().sum::<f64>() / qualities.len() as f64;
            let gain = (avg - 50.0) * self.config.economy.reputation_per_quality_point;
            state.add_reputation(gain);
            state.add_creative_capital(gain.max(0.0));
        }

        if first_week_streams >= market.chart_debut_streams {
            state.add_reputation(self.config.economy.chart_debut_reputation);
            summary.event(NarrativeEvent::ChartDebut {
                release_id,
                title,
                first_week_streams,
            });
        }
    }

    fn decay_catalog(&self, state: &mut GameState, week: usize, summary: &mut WeekSummary) {
        let market = &self.config.market;
        let mut songs_paying = 0usize;
        let mut total_streams = 0u64;
        let mut total_revenue = 0i64;

        let song_ids: Vec<Uuid> = state.songs.keys().copied().collect();
        for song_id in song_ids {
            let Some(song) = state.songs.get(&song_id) else {
                continue;
            };
            // Release-week revenue was already credited at shipping.
            if !song.is_active() || song.release_week() == Some(week) {
                continue;
            }
            let artist_id = song.artist_id();
            let awareness = state
                .releases
                .values()
                .find(|r| r.song_ids().contains(&song_id))
                .map(|r| r.awareness())
                .unwrap_or(0.0);
            let result = revenue::decayed_streams(
                song.last_streams(),
                song.decay_periods(),
                awareness,
                market,
            );

            if let Some(song) = state.songs.get_mut(&song_id) {
                if result.still_active {
                    song.apply_period(result.streams, result.revenue);
                } else {
                    song.deactivate();
                }
            }
            if result.still_active {
                state.apply_money(result.revenue);
                if let Some(artist) = state.artists.get_mut(&artist_id) {
                    artist.add_month_revenue(result.revenue);
                }
                songs_paying += 1;
                total_streams += result.streams.round() as u64;
                total_revenue += result.revenue;
            }
        }

        if songs_paying > 0 {
            summary.record(ChangeRecord::StreamingRevenue {
                songs_paying,
                streams: total_streams,
                revenue: total_revenue,
            });
        }
    }

    fn resolve_tours(&self, state: &mut GameState, week: usize, summary: &mut WeekSummary) {
        let market = &self.config.market;
        let tour_ids: Vec<Uuid> = state.tours.keys().copied().collect();

        for tour_id in tour_ids {
            let due = state.tours.get(&tour_id).map(|t| {
                (
                    t.artist_id(),
                    t.cities(),
                    t.ticket_price(),
                    t.budget(),
                    t.due(week),
                )
            });
            let Some((artist_id, cities, ticket_price, budget, true)) = due else {
                continue;
            };
            let popularity = state
                .artists
                .get(&artist_id)
                .map(|a| a.popularity())
                .unwrap_or(0.0);
            let venue_tier = state.access.tier(TierTrack::Venue);

            let outcome = revenue::tour_result(
                tour_id,
                artist_id,
                cities,
                venue_tier,
                popularity,
                state.reputation(),
                ticket_price,
                budget,
                market,
                &mut state.rng,
            );

            // The budget was charged at booking; only gross revenue lands now.
            let gross = outcome.ticket_revenue + outcome.merch_revenue;
            state.apply_money(gross);
            state.add_reputation(self.config.economy.tour_reputation_gain);
            if let Some(artist) = state.artists.get_mut(&artist_id) {
                artist.add_month_revenue(gross);
                artist.set_popularity(artist.popularity() + f64::from(cities) * 0.5);
            }
            if let Some(tour) = state.tours.get_mut(&tour_id) {
                tour.mark_completed();
            }

            summary.record(ChangeRecord::TourCompleted {
                tour_id,
                cities,
                attendance: outcome.attendance,
                net_revenue: outcome.net_revenue,
            });
            summary.tour_outcomes.push(outcome);
        }
    }

    /// Put one song on streaming: initial estimate, first-week revenue
    fn ship_song(&self, state: &mut GameState, song_id: Uuid, week: usize, marketing_total: i64) {
        let market = &self.config.market;
        let playlist_tier = state.access.tier(TierTrack::Playlist);
        let reputation = state.reputation();

        let Some((song_quality, artist_id, released)) = state
            .songs
            .get(&song_id)
            .map(|s| (s.quality(), s.artist_id(), s.is_released()))
        else {
            return;
        };
        if released {
            return;
        }

        let streams = revenue::initial_streams(
            song_quality,
            playlist_tier,
            reputation,
            marketing_total,
            market,
        );
        let first_revenue = revenue::revenue_for_streams(streams, market);

        if let Some(song) = state.songs.get_mut(&song_id) {
            song.release(week, streams);
            song.credit_revenue(first_revenue);
        }
        state.apply_money(first_revenue);
        if let Some(artist) = state.artists.get_mut(&artist_id) {
            artist.add_month_revenue(first_revenue);
            // Shipping music is how popularity is built.
            artist.set_popularity(artist.popularity() + f64::from(song_quality) / 40.0);
        }
    }

    /// Weekly artist retainers
    fn apply_weekly_costs(&self, state: &mut GameState, summary: &mut WeekSummary) {
        let mut total = 0i64;
        let mut artists = 0usize;
        for artist in state.artists.values_mut() {
            if !artist.is_signed() {
                continue;
            }
            let cost = artist.weekly_cost();
            if cost > 0 {
                artist.add_month_revenue(-cost);
                total += cost;
                artists += 1;
            }
        }
        if total > 0 {
            state.apply_money(-total);
            summary.record(ChangeRecord::WeeklyCosts { artists, total });
        }
    }
}

/// Snapshot of the volatile traits used for per-artist summary deltas
#[derive(Debug, Clone, Copy)]
struct TraitSnapshot {
    mood: f64,
    stress: f64,
    creativity: f64,
    popularity: f64,
    loyalty: f64,
    work_ethic: f64,
}

impl TraitSnapshot {
    fn of(artist: &Artist) -> Self {
        Self {
            mood: artist.mood(),
            stress: artist.stress(),
            creativity: artist.creativity(),
            popularity: artist.popularity(),
            loyalty: artist.loyalty(),
            work_ethic: artist.work_ethic(),
        }
    }

    fn delta_to(&self, artist: &Artist) -> TraitDeltas {
        TraitDeltas {
            mood: artist.mood() - self.mood,
            stress: artist.stress() - self.stress,
            creativity: artist.creativity() - self.creativity,
            popularity: artist.popularity() - self.popularity,
            loyalty: artist.loyalty() - self.loyalty,
            work_ethic: artist.work_ethic() - self.work_ethic,
        }
    }
}
