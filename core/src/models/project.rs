//! Recording project model
//!
//! A project walks a strict one-way pipeline:
//!
//! ```text
//! planning → writing → recording → recorded → released
//! ```
//!
//! Each stage carries its own payload (tagged union) so stage-specific
//! fields cannot exist outside the stage they belong to. Transitions are
//! guarded and monotonic; a skip or reversal is a `StageError`, which the
//! orchestrator treats as an invariant violation.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::EconomyConfig;

/// Producer hired for a project. Skill feeds the quality formula; the cost
/// multiplier feeds minimum viable cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProducerTier {
    Local,
    Regional,
    National,
    Legendary,
}

impl ProducerTier {
    /// Producer skill constant blended with artist talent
    pub fn skill(&self) -> f64 {
        match self {
            ProducerTier::Local => 40.0,
            ProducerTier::Regional => 55.0,
            ProducerTier::National => 75.0,
            ProducerTier::Legendary => 95.0,
        }
    }

    /// Multiplier on base per-song cost
    pub fn cost_multiplier(&self) -> f64 {
        match self {
            ProducerTier::Local => 0.6,
            ProducerTier::Regional => 1.0,
            ProducerTier::National => 1.8,
            ProducerTier::Legendary => 3.2,
        }
    }
}

/// How much studio time the project books per song
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeInvestment {
    Rushed,
    Standard,
    Extended,
    Perfectionist,
}

impl TimeInvestment {
    /// Base quality factor (rushed hurts, perfectionist helps)
    pub fn quality_factor(&self) -> f64 {
        match self {
            TimeInvestment::Rushed => 0.85,
            TimeInvestment::Standard => 1.0,
            TimeInvestment::Extended => 1.08,
            TimeInvestment::Perfectionist => 1.15,
        }
    }

    /// How strongly artist work ethic amplifies the time factor
    pub fn work_ethic_synergy(&self) -> f64 {
        match self {
            TimeInvestment::Rushed => 0.02,
            TimeInvestment::Standard => 0.05,
            TimeInvestment::Extended => 0.08,
            TimeInvestment::Perfectionist => 0.12,
        }
    }

    /// Multiplier on base per-song cost
    pub fn cost_multiplier(&self) -> f64 {
        match self {
            TimeInvestment::Rushed => 0.8,
            TimeInvestment::Standard => 1.0,
            TimeInvestment::Extended => 1.25,
            TimeInvestment::Perfectionist => 1.6,
        }
    }

    /// Writing weeks added on top of the song-count baseline
    pub fn extra_writing_weeks(&self) -> usize {
        match self {
            TimeInvestment::Rushed => 0,
            TimeInvestment::Standard => 1,
            TimeInvestment::Extended => 2,
            TimeInvestment::Perfectionist => 3,
        }
    }

    /// Songs recorded per week once in the recording stage
    pub fn songs_per_week(&self) -> u32 {
        match self {
            TimeInvestment::Rushed => 2,
            _ => 1,
        }
    }
}

/// Project pipeline stage with stage-specific payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum ProjectStage {
    Planning {
        budget_finalized: bool,
    },
    Writing {
        started_week: usize,
        duration_weeks: usize,
    },
    Recording {
        songs_created: u32,
    },
    Recorded,
    Released {
        release_id: Uuid,
    },
}

impl ProjectStage {
    /// Position in the pipeline; must never decrease for a given project
    pub fn ordinal(&self) -> u8 {
        match self {
            ProjectStage::Planning { .. } => 0,
            ProjectStage::Writing { .. } => 1,
            ProjectStage::Recording { .. } => 2,
            ProjectStage::Recorded => 3,
            ProjectStage::Released { .. } => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProjectStage::Planning { .. } => "planning",
            ProjectStage::Writing { .. } => "writing",
            ProjectStage::Recording { .. } => "recording",
            ProjectStage::Recorded => "recorded",
            ProjectStage::Released { .. } => "released",
        }
    }
}

/// Illegal stage transition (internal bug class, surfaced as an
/// invariant violation by the orchestrator)
#[derive(Debug, Error, PartialEq)]
pub enum StageError {
    #[error("project {project_id} cannot move from {from} to {to}")]
    IllegalTransition {
        project_id: Uuid,
        from: &'static str,
        to: &'static str,
    },

    #[error("project {project_id} budget is already finalized")]
    BudgetAlreadyFinalized { project_id: Uuid },

    #[error("project {project_id} recorded {created} of {expected} songs; cannot mark recorded")]
    SongsIncomplete {
        project_id: Uuid,
        created: u32,
        expected: u32,
    },
}

/// An in-flight recording project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    id: Uuid,
    artist_id: Uuid,
    title: String,
    stage: ProjectStage,
    producer: ProducerTier,
    time_investment: TimeInvestment,

    /// Allocated recording budget per song (cents)
    budget_per_song: i64,

    /// Planned number of songs
    song_count: u32,

    /// Total committed cost (cents), debited when the budget is finalized
    total_cost: i64,

    /// Cost recognized so far as songs land (cents)
    cost_consumed: i64,

    started_week: usize,

    /// Week by which the project should have reached `recorded`;
    /// past this without resolution is a surfaced anomaly, not an error
    due_week: usize,
}

impl Project {
    pub fn new(
        id: Uuid,
        artist_id: Uuid,
        title: String,
        producer: ProducerTier,
        time_investment: TimeInvestment,
        budget_per_song: i64,
        song_count: u32,
        started_week: usize,
    ) -> Self {
        let total_cost = budget_per_song * i64::from(song_count);
        let due_week = started_week + Self::expected_duration(song_count, time_investment) + 2;
        Self {
            id,
            artist_id,
            title,
            stage: ProjectStage::Planning {
                budget_finalized: false,
            },
            producer,
            time_investment,
            budget_per_song,
            song_count,
            total_cost,
            cost_consumed: 0,
            started_week,
            due_week,
        }
    }

    /// Writing weeks plus recording weeks for a given scope
    pub fn expected_duration(song_count: u32, time: TimeInvestment) -> usize {
        let writing = (song_count as usize).div_ceil(2) + time.extra_writing_weeks();
        let recording = (song_count as usize).div_ceil(time.songs_per_week() as usize);
        writing + recording
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn artist_id(&self) -> Uuid {
        self.artist_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn stage(&self) -> &ProjectStage {
        &self.stage
    }

    pub fn producer(&self) -> ProducerTier {
        self.producer
    }

    pub fn time_investment(&self) -> TimeInvestment {
        self.time_investment
    }

    pub fn budget_per_song(&self) -> i64 {
        self.budget_per_song
    }

    pub fn song_count(&self) -> u32 {
        self.song_count
    }

    pub fn total_cost(&self) -> i64 {
        self.total_cost
    }

    pub fn cost_consumed(&self) -> i64 {
        self.cost_consumed
    }

    pub fn started_week(&self) -> usize {
        self.started_week
    }

    pub fn due_week(&self) -> usize {
        self.due_week
    }

    /// Songs recorded so far (0 outside the recording stage window)
    pub fn songs_created(&self) -> u32 {
        match self.stage {
            ProjectStage::Recording { songs_created } => songs_created,
            ProjectStage::Recorded | ProjectStage::Released { .. } => self.song_count,
            _ => 0,
        }
    }

    /// True for any stage before `released`
    pub fn is_active(&self) -> bool {
        !matches!(self.stage, ProjectStage::Released { .. })
    }

    /// Past due without reaching `recorded`, a data anomaly to surface
    pub fn is_overdue(&self, week: usize) -> bool {
        week > self.due_week && self.stage.ordinal() < ProjectStage::Recorded.ordinal()
    }

    /// Minimum viable cost for this project's producer/time/scope combination
    pub fn minimum_viable_cost(&self, economy: &EconomyConfig) -> i64 {
        crate::formulas::quality::minimum_viable_cost(
            self.producer,
            self.time_investment,
            self.song_count,
            economy,
        )
    }

    // ------------------------------------------------------------------
    // Guarded transitions
    // ------------------------------------------------------------------

    /// Planning guard: budget allocation must be finalized before writing.
    /// Finalizing twice is an error so a repeated action cannot debit the
    /// label account a second time.
    pub fn finalize_budget(&mut self) -> Result<(), StageError> {
        match &mut self.stage {
            ProjectStage::Planning { budget_finalized } => {
                if *budget_finalized {
                    return Err(StageError::BudgetAlreadyFinalized {
                        project_id: self.id,
                    });
                }
                *budget_finalized = true;
                Ok(())
            }
            other => Err(StageError::IllegalTransition {
                project_id: self.id,
                from: other.name(),
                to: "planning",
            }),
        }
    }

    pub fn budget_finalized(&self) -> bool {
        matches!(
            self.stage,
            ProjectStage::Planning {
                budget_finalized: true
            }
        )
    }

    /// planning → writing (requires finalized budget)
    pub fn begin_writing(&mut self, week: usize) -> Result<(), StageError> {
        match self.stage {
            ProjectStage::Planning {
                budget_finalized: true,
            } => {
                let duration = (self.song_count as usize).div_ceil(2)
                    + self.time_investment.extra_writing_weeks();
                self.stage = ProjectStage::Writing {
                    started_week: week,
                    duration_weeks: duration.max(1),
                };
                Ok(())
            }
            ref other => Err(StageError::IllegalTransition {
                project_id: self.id,
                from: other.name(),
                to: "writing",
            }),
        }
    }

    /// writing → recording (time-gated by writing duration)
    pub fn begin_recording(&mut self, week: usize) -> Result<(), StageError> {
        match self.stage {
            ProjectStage::Writing {
                started_week,
                duration_weeks,
            } if week >= started_week + duration_weeks => {
                self.stage = ProjectStage::Recording { songs_created: 0 };
                Ok(())
            }
            ref other => Err(StageError::IllegalTransition {
                project_id: self.id,
                from: other.name(),
                to: "recording",
            }),
        }
    }

    /// True once the writing window has elapsed
    pub fn writing_complete(&self, week: usize) -> bool {
        matches!(
            self.stage,
            ProjectStage::Writing { started_week, duration_weeks }
                if week >= started_week + duration_weeks
        )
    }

    /// Record one song; also recognizes its cost share
    pub fn record_song(&mut self) -> Result<u32, StageError> {
        match &mut self.stage {
            ProjectStage::Recording { songs_created } if *songs_created < self.song_count => {
                *songs_created += 1;
                let index = *songs_created;
                self.cost_consumed += self.budget_per_song;
                Ok(index)
            }
            other => Err(StageError::IllegalTransition {
                project_id: self.id,
                from: other.name(),
                to: "recording",
            }),
        }
    }

    /// recording → recorded, only once `songs_created == song_count`
    pub fn mark_recorded(&mut self) -> Result<(), StageError> {
        match self.stage {
            ProjectStage::Recording { songs_created } => {
                if songs_created == self.song_count {
                    self.stage = ProjectStage::Recorded;
                    Ok(())
                } else {
                    Err(StageError::SongsIncomplete {
                        project_id: self.id,
                        created: songs_created,
                        expected: self.song_count,
                    })
                }
            }
            ref other => Err(StageError::IllegalTransition {
                project_id: self.id,
                from: other.name(),
                to: "recorded",
            }),
        }
    }

    /// recorded → released (explicit player action, terminal)
    pub fn mark_released(&mut self, release_id: Uuid) -> Result<(), StageError> {
        match self.stage {
            ProjectStage::Recorded => {
                self.stage = ProjectStage::Released { release_id };
                Ok(())
            }
            ref other => Err(StageError::IllegalTransition {
                project_id: self.id,
                from: other.name(),
                to: "released",
            }),
        }
    }
}
