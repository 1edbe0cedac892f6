//! Song model
//!
//! A song belongs to exactly one project. Quality is computed once, at the
//! moment the song is recorded, and never changes afterwards. Streaming
//! fields track the per-song decay model: last-period streams drive next
//! period's geometric decay, and a song goes inactive once its weekly
//! revenue falls below the configured floor or it exhausts its decay
//! periods.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    id: Uuid,
    project_id: Uuid,
    artist_id: Uuid,
    title: String,

    /// Fixed at recording; 20–98
    quality: u8,

    released: bool,
    release_week: Option<usize>,

    /// Cumulative streams since release
    total_streams: u64,

    /// Cumulative revenue since release (cents)
    total_revenue: i64,

    /// Streams earned in the most recent period (decay input)
    last_streams: f64,

    /// Number of decay periods consumed since release
    decay_periods: u32,

    /// False once the song stops contributing revenue
    active: bool,
}

impl Song {
    /// Create a just-recorded song. Quality is write-once here.
    pub fn new(id: Uuid, project_id: Uuid, artist_id: Uuid, title: String, quality: u8) -> Self {
        Self {
            id,
            project_id,
            artist_id,
            title,
            quality,
            released: false,
            release_week: None,
            total_streams: 0,
            total_revenue: 0,
            last_streams: 0.0,
            decay_periods: 0,
            active: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn project_id(&self) -> Uuid {
        self.project_id
    }

    pub fn artist_id(&self) -> Uuid {
        self.artist_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn release_week(&self) -> Option<usize> {
        self.release_week
    }

    pub fn total_streams(&self) -> u64 {
        self.total_streams
    }

    pub fn total_revenue(&self) -> i64 {
        self.total_revenue
    }

    pub fn last_streams(&self) -> f64 {
        self.last_streams
    }

    pub fn decay_periods(&self) -> u32 {
        self.decay_periods
    }

    /// Still contributing weekly streaming revenue
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mark released with its first-period stream estimate
    pub fn release(&mut self, week: usize, initial_streams: f64) {
        if self.released {
            return; // re-releasing is a no-op
        }
        self.released = true;
        self.release_week = Some(week);
        self.last_streams = initial_streams;
        self.total_streams = initial_streams.round() as u64;
        self.active = true;
    }

    /// Record one post-release period's streams and revenue
    pub fn apply_period(&mut self, streams: f64, revenue: i64) {
        self.last_streams = streams;
        self.total_streams += streams.round() as u64;
        self.total_revenue += revenue;
        self.decay_periods += 1;
    }

    /// Credit revenue for the release week itself (no decay period consumed)
    pub fn credit_revenue(&mut self, revenue: i64) {
        self.total_revenue += revenue;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.last_streams = 0.0;
    }
}
