//! Week and month summaries
//!
//! The transient output contract of a tick: everything that changed, in
//! resolution order, plus any forced narrative events. Consumed by the
//! surrounding presentation/notification layers; never persisted.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::effects::TraitDeltas;
use crate::models::release::TourOutcome;

/// One human-readable record of something that changed during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeRecord {
    /// A player action resolved its immediate effects
    ActionResolved { action: String, detail: String },

    /// A scheduled effect fired
    EffectFired { provenance: String, artists: usize },

    /// A project moved one stage forward
    StageAdvanced {
        project_id: Uuid,
        title: String,
        stage: String,
    },

    /// A song finished recording with its final quality
    SongRecorded {
        song_id: Uuid,
        title: String,
        quality: u8,
    },

    /// A project sits past its due week without resolving (non-fatal)
    ProjectOverdue {
        project_id: Uuid,
        title: String,
        weeks_late: usize,
    },

    /// A lead single or main release shipped
    ReleaseShipped {
        release_id: Uuid,
        title: String,
        songs: usize,
        lead_single: bool,
    },

    /// Streaming revenue credited this week
    StreamingRevenue {
        songs_paying: usize,
        streams: u64,
        revenue: i64,
    },

    /// A tour resolved
    TourCompleted {
        tour_id: Uuid,
        cities: u32,
        attendance: u64,
        net_revenue: i64,
    },

    /// An access tier unlocked
    TierUnlocked { track: String, tier: u8 },

    /// Weekly artist retainers charged
    WeeklyCosts { artists: usize, total: i64 },
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeRecord::ActionResolved { action, detail } => {
                write!(f, "{action}: {detail}")
            }
            ChangeRecord::EffectFired {
                provenance,
                artists,
            } => write!(f, "delayed effect {provenance} hit {artists} artist(s)"),
            ChangeRecord::StageAdvanced { title, stage, .. } => {
                write!(f, "\"{title}\" advanced to {stage}")
            }
            ChangeRecord::SongRecorded { title, quality, .. } => {
                write!(f, "\"{title}\" recorded at quality {quality}")
            }
            ChangeRecord::ProjectOverdue {
                title, weeks_late, ..
            } => write!(f, "\"{title}\" is {weeks_late} week(s) overdue"),
            ChangeRecord::ReleaseShipped {
                title,
                songs,
                lead_single,
                ..
            } => {
                if *lead_single {
                    write!(f, "lead single from \"{title}\" shipped")
                } else {
                    write!(f, "\"{title}\" shipped with {songs} song(s)")
                }
            }
            ChangeRecord::StreamingRevenue {
                songs_paying,
                streams,
                revenue,
            } => write!(
                f,
                "{songs_paying} song(s) streamed {streams} times for {} cents",
                revenue
            ),
            ChangeRecord::TourCompleted {
                cities,
                attendance,
                net_revenue,
                ..
            } => write!(
                f,
                "tour played {cities} cities to {attendance} people, net {net_revenue} cents"
            ),
            ChangeRecord::TierUnlocked { track, tier } => {
                write!(f, "{track} access reached tier {tier}")
            }
            ChangeRecord::WeeklyCosts { artists, total } => {
                write!(f, "weekly retainers for {artists} artist(s): {total} cents")
            }
        }
    }
}

/// Forced narrative events surfaced by the tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NarrativeEvent {
    /// Stress and mood crossed the breakdown thresholds simultaneously
    BreakdownIntervention { artist_id: Uuid, name: String },

    /// Popularity and monthly revenue both ran hot
    FameComplications { artist_id: Uuid, name: String },

    /// A release's first week cleared the chart-debut bar
    ChartDebut {
        release_id: Uuid,
        title: String,
        first_week_streams: u64,
    },
}

/// Net trait movement for one artist over a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistDelta {
    pub artist_id: Uuid,
    pub name: String,
    pub deltas: TraitDeltas,
}

/// Everything that changed during one weekly tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSummary {
    pub week: usize,
    pub money_delta: i64,
    pub reputation_delta: f64,
    pub changes: Vec<ChangeRecord>,
    pub artist_deltas: Vec<ArtistDelta>,
    pub events: Vec<NarrativeEvent>,
    pub tour_outcomes: Vec<TourOutcome>,
}

impl WeekSummary {
    pub fn new(week: usize) -> Self {
        Self {
            week,
            money_delta: 0,
            reputation_delta: 0.0,
            changes: Vec::new(),
            artist_deltas: Vec::new(),
            events: Vec::new(),
            tour_outcomes: Vec::new(),
        }
    }

    pub fn record(&mut self, change: ChangeRecord) {
        self.changes.push(change);
    }

    pub fn event(&mut self, event: NarrativeEvent) {
        self.events.push(event);
    }
}

/// Four weekly summaries aggregated into a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub month: usize,
    pub money_delta: i64,
    pub reputation_delta: f64,
    pub changes: Vec<ChangeRecord>,
    pub events: Vec<NarrativeEvent>,
    pub weeks: Vec<WeekSummary>,
}

impl MonthSummary {
    /// Aggregate consecutive week summaries
    pub fn from_weeks(month: usize, weeks: Vec<WeekSummary>) -> Self {
        let money_delta = weeks.iter().map(|w| w.money_delta).sum();
        let reputation_delta = weeks.iter().map(|w| w.reputation_delta).sum();
        let changes = weeks.iter().flat_map(|w| w.changes.clone()).collect();
        let events = weeks.iter().flat_map(|w| w.events.clone()).collect();
        Self {
            month,
            money_delta,
            reputation_delta,
            changes,
            events,
            weeks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_aggregation() {
        let mut w1 = WeekSummary::new(1);
        w1.money_delta = -500;
        w1.reputation_delta = 1.0;
        let mut w2 = WeekSummary::new(2);
        w2.money_delta = 2_000;
        w2.reputation_delta = 0.5;
        w2.record(ChangeRecord::TierUnlocked {
            track: "press".to_string(),
            tier: 1,
        });

        let month = MonthSummary::from_weeks(0, vec![w1, w2]);
        assert_eq!(month.money_delta, 1_500);
        assert_eq!(month.reputation_delta, 1.5);
        assert_eq!(month.changes.len(), 1);
        assert_eq!(month.weeks.len(), 2);
    }

    #[test]
    fn test_change_record_display() {
        let record = ChangeRecord::TierUnlocked {
            track: "playlist".to_string(),
            tier: 2,
        };
        assert_eq!(record.to_string(), "playlist access reached tier 2");
    }
}
