//! Release and tour models
//!
//! A release groups one or more recorded songs with a marketing budget and
//! an optional lead-single strategy (one song goes out ahead of the main
//! date). The awareness accumulator models the marketing tail: it is built
//! from per-channel spend at release time, decays weekly, and temporarily
//! lifts post-release streams above pure decay.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::MarketConfig;

/// Per-channel marketing spend (cents)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketingSpend {
    pub social: i64,
    pub press: i64,
    pub radio: i64,
}

impl MarketingSpend {
    pub fn total(&self) -> i64 {
        self.social + self.press + self.radio
    }

    /// Awareness points contributed by this spend
    pub fn awareness(&self, market: &MarketConfig) -> f64 {
        let reference = market.marketing_reference_spend.max(1) as f64;
        (self.social as f64 / reference) * market.awareness_social_coeff
            + (self.press as f64 / reference) * market.awareness_press_coeff
            + (self.radio as f64 / reference) * market.awareness_radio_coeff
    }
}

/// A planned or shipped release
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    id: Uuid,
    project_id: Uuid,
    artist_id: Uuid,
    title: String,
    song_ids: Vec<Uuid>,

    /// Week the main release ships
    release_week: usize,

    /// Lead single shipping ahead of the main date, if any
    lead_single: Option<LeadSingle>,

    marketing: MarketingSpend,

    /// Decaying marketing-awareness accumulator
    awareness: f64,

    /// Main drop has shipped
    released: bool,
}

/// Lead-single phase of a multi-phase release
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeadSingle {
    pub song_id: Uuid,
    pub week: usize,
    pub shipped: bool,
}

impl Release {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        project_id: Uuid,
        artist_id: Uuid,
        title: String,
        song_ids: Vec<Uuid>,
        release_week: usize,
        lead_single: Option<LeadSingle>,
        marketing: MarketingSpend,
    ) -> Self {
        Self {
            id,
            project_id,
            artist_id,
            title,
            song_ids,
            release_week,
            lead_single,
            marketing,
            awareness: 0.0,
            released: false,
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

    pub fn song_ids(&self) -> &[Uuid] {
        &self.song_ids
    }

    pub fn release_week(&self) -> usize {
        self.release_week
    }

    pub fn lead_single(&self) -> Option<&LeadSingle> {
        self.lead_single.as_ref()
    }

    pub fn marketing(&self) -> &MarketingSpend {
        &self.marketing
    }

    pub fn awareness(&self) -> f64 {
        self.awareness
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Lead single due this week and not yet shipped
    pub fn lead_due(&self, week: usize) -> Option<Uuid> {
        match &self.lead_single {
            Some(lead) if !lead.shipped && week >= lead.week => Some(lead.song_id),
            _ => None,
        }
    }

    pub fn mark_lead_shipped(&mut self) {
        if let Some(lead) = &mut self.lead_single {
            lead.shipped = true;
        }
    }

    /// Main drop due this week and not yet shipped
    pub fn main_due(&self, week: usize) -> bool {
        !self.released && week >= self.release_week
    }

    /// Ship the main drop, charging marketing into awareness
    pub fn mark_released(&mut self, market: &MarketConfig) {
        self.released = true;
        self.awareness += self.marketing.awareness(market);
    }

    /// Additional marketing push. Before the main drop the spend only
    /// accumulates (`mark_released` converts the whole total to awareness);
    /// after it, the push credits awareness immediately.
    pub fn add_marketing(&mut self, spend: &MarketingSpend, market: &MarketConfig) {
        self.marketing.social += spend.social;
        self.marketing.press += spend.press;
        self.marketing.radio += spend.radio;
        if self.released {
            self.awareness += spend.awareness(market);
        }
    }

    /// Weekly awareness decay
    pub fn decay_awareness(&mut self, market: &MarketConfig) {
        self.awareness *= market.awareness_decay;
        if self.awareness < 0.01 {
            self.awareness = 0.0;
        }
    }
}

/// A booked multi-city tour, resolved on its scheduled week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    id: Uuid,
    artist_id: Uuid,

    /// Number of cities played
    cities: u32,

    /// Week the tour resolves
    week: usize,

    /// Up-front tour budget (cents), charged at booking
    budget: i64,

    /// Ticket price per head (cents)
    ticket_price: i64,

    completed: bool,
}

impl Tour {
    pub fn new(
        id: Uuid,
        artist_id: Uuid,
        cities: u32,
        week: usize,
        budget: i64,
        ticket_price: i64,
    ) -> Self {
        Self {
            id,
            artist_id,
            cities,
            week,
            budget,
            ticket_price,
            completed: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn artist_id(&self) -> Uuid {
        self.artist_id
    }

    pub fn cities(&self) -> u32 {
        self.cities
    }

    pub fn week(&self) -> usize {
        self.week
    }

    pub fn budget(&self) -> i64 {
        self.budget
    }

    pub fn ticket_price(&self) -> i64 {
        self.ticket_price
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn due(&self, week: usize) -> bool {
        !self.completed && week >= self.week
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
    }
}

/// Resolved financial result of one tour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourOutcome {
    pub tour_id: Uuid,
    pub artist_id: Uuid,
    pub cities: u32,

    /// Total attendance across all cities
    pub attendance: u64,

    /// Ticket revenue (cents)
    pub ticket_revenue: i64,

    /// Merchandise revenue (cents)
    pub merch_revenue: i64,

    /// Ticket + merch − budget (cents)
    pub net_revenue: i64,
}
