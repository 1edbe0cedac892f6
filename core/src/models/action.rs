//! Player actions
//!
//! Each week the player picks up to `focus_slot_capacity` actions from a
//! small enumerated set. An action carries immediate trait effects (summed
//! into target fields during resolution) and delayed effects (written to
//! the scheduled-effect registry, never applied inline). Money movements
//! are applied by the orchestrator during resolution, after the whole
//! batch has validated.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::effects::{EffectScope, TraitDeltas};
use crate::models::project::{ProducerTier, TimeInvestment};
use crate::models::release::MarketingSpend;

/// Scouted artist offer carried by a `SignArtist` action
///
/// Candidate stats come from the surrounding system (scouting is out of
/// scope here); the core just validates and signs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SigningOffer {
    pub name: String,
    pub talent: f64,
    pub work_ethic: f64,
    pub creativity: f64,
    pub mass_appeal: f64,
    /// One-off signing bonus (cents)
    pub signing_bonus: i64,
    /// Weekly retainer (cents)
    pub weekly_cost: i64,
}

/// Conversation stance in a role meeting with an artist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingChoice {
    /// Supportive check-in: mood and loyalty now, stress relief next week
    Encourage,
    /// Demand more output: work ethic now, at the cost of delayed mood/stress
    PushHarder,
    /// Hands-off creative trust: creativity now, delayed mood lift
    CreativeFreedom,
}

/// One player-chosen action for the coming week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlayerAction {
    /// Sign a scouted artist to the roster
    SignArtist { offer: SigningOffer },

    /// Open a new recording project for a signed artist
    StartProject {
        artist_id: Uuid,
        title: String,
        producer: ProducerTier,
        time_investment: TimeInvestment,
        budget_per_song: i64,
        song_count: u32,
    },

    /// Commit a planning-stage project's budget (debits the full cost)
    FinalizeBudget { project_id: Uuid },

    /// Plan the release of a recorded project
    PlanRelease {
        project_id: Uuid,
        title: String,
        marketing: MarketingSpend,
        /// Ship the first song one week ahead of the main date
        lead_single: bool,
    },

    /// Push additional marketing behind an existing release
    MarketingPush {
        release_id: Uuid,
        spend: MarketingSpend,
    },

    /// Book a multi-city tour for a signed artist
    BookTour {
        artist_id: Uuid,
        cities: u32,
        ticket_price: i64,
        budget: i64,
    },

    /// Sit down with an artist
    RoleMeeting {
        artist_id: Uuid,
        choice: MeetingChoice,
    },

    /// Send an artist on a week off
    GrantTimeOff { artist_id: Uuid },
}

/// A delayed effect emitted by an action, relative to the resolution week
#[derive(Debug, Clone, PartialEq)]
pub struct DelayedSpec {
    /// Weeks after the current tick at which the effect fires (>= 1)
    pub offset: usize,
    pub deltas: TraitDeltas,
    pub scope: EffectScope,
}

/// Immediate and delayed trait effects of one action
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionEffects {
    /// Applied to the target artist during resolution
    pub immediate: TraitDeltas,
    /// Written to the scheduled-effect registry
    pub delayed: Vec<DelayedSpec>,
}

impl PlayerAction {
    /// Stable name used in provenance strings and summary text
    pub fn name(&self) -> &'static str {
        match self {
            PlayerAction::SignArtist { .. } => "sign_artist",
            PlayerAction::StartProject { .. } => "start_project",
            PlayerAction::FinalizeBudget { .. } => "finalize_budget",
            PlayerAction::PlanRelease { .. } => "plan_release",
            PlayerAction::MarketingPush { .. } => "marketing_push",
            PlayerAction::BookTour { .. } => "book_tour",
            PlayerAction::RoleMeeting { .. } => "role_meeting",
            PlayerAction::GrantTimeOff { .. } => "grant_time_off",
        }
    }

    /// Provenance key for delayed effects: `action-choice-delayed`
    pub fn provenance(&self) -> String {
        match self {
            PlayerAction::RoleMeeting { choice, .. } => {
                let choice_name = match choice {
                    MeetingChoice::Encourage => "encourage",
                    MeetingChoice::PushHarder => "push_harder",
                    MeetingChoice::CreativeFreedom => "creative_freedom",
                };
                format!("{}-{}-delayed", self.name(), choice_name)
            }
            other => format!("{}-delayed", other.name()),
        }
    }

    /// Direct money cost of this action, validated against funds up front
    pub fn money_cost(&self) -> i64 {
        match self {
            PlayerAction::SignArtist { offer } => offer.signing_bonus,
            PlayerAction::MarketingPush { spend, .. } => spend.total(),
            PlayerAction::BookTour { budget, .. } => *budget,
            PlayerAction::PlanRelease { marketing, .. } => marketing.total(),
            // Project cost is debited by FinalizeBudget against the
            // project's own committed total, not here.
            _ => 0,
        }
    }

    /// Trait effects of this action against its target artist, if any
    pub fn effects(&self) -> ActionEffects {
        match self {
            PlayerAction::RoleMeeting { artist_id, choice } => {
                let scope = EffectScope::Artist { id: *artist_id };
                match choice {
                    MeetingChoice::Encourage => ActionEffects {
                        immediate: TraitDeltas {
                            mood: 4.0,
                            loyalty: 2.0,
                            ..Default::default()
                        },
                        delayed: vec![DelayedSpec {
                            offset: 1,
                            deltas: TraitDeltas {
                                stress: -3.0,
                                ..Default::default()
                            },
                            scope,
                        }],
                    },
                    MeetingChoice::PushHarder => ActionEffects {
                        immediate: TraitDeltas {
                            work_ethic: 3.0,
                            stress: 4.0,
                            ..Default::default()
                        },
                        delayed: vec![DelayedSpec {
                            offset: 1,
                            deltas: TraitDeltas {
                                mood: -3.0,
                                loyalty: -1.0,
                                ..Default::default()
                            },
                            scope,
                        }],
                    },
                    MeetingChoice::CreativeFreedom => ActionEffects {
                        immediate: TraitDeltas {
                            creativity: 5.0,
                            ..Default::default()
                        },
                        delayed: vec![DelayedSpec {
                            offset: 1,
                            deltas: TraitDeltas {
                                mood: 3.0,
                                ..Default::default()
                            },
                            scope,
                        }],
                    },
                }
            }
            PlayerAction::GrantTimeOff { artist_id } => ActionEffects {
                immediate: TraitDeltas {
                    stress: -10.0,
                    mood: 6.0,
                    ..Default::default()
                },
                delayed: vec![DelayedSpec {
                    offset: 2,
                    deltas: TraitDeltas {
                        creativity: 4.0,
                        ..Default::default()
                    },
                    scope: EffectScope::Artist { id: *artist_id },
                }],
            },
            // Structural actions carry no trait effects of their own
            _ => ActionEffects::default(),
        }
    }
}
