//! Streaming and live-performance revenue formulas
//!
//! Streaming follows the per-song decay model: an initial stream estimate
//! at release, then a geometric weekly decay floored at a minimum-revenue
//! threshold and capped at a maximum number of decay periods. The release's
//! awareness accumulator (marketing tail) temporarily lifts decayed streams.
//!
//! Live performance: expected attendance per city from venue capacity,
//! base sell-through and popularity/reputation modifiers, perturbed by a
//! bounded percentage independently per city.

use uuid::Uuid;

use crate::config::MarketConfig;
use crate::models::release::TourOutcome;
use crate::rng::RngManager;

/// First-period stream estimate for a song at release
///
/// Inputs: recorded quality (20–98), current playlist tier, label
/// reputation (0–100) and total marketing spend in cents. Output: expected
/// streams for the release week, >= 0.
pub fn initial_streams(
    quality: u8,
    playlist_tier: u8,
    reputation: f64,
    marketing_spend: i64,
    market: &MarketConfig,
) -> f64 {
    let quality_factor = (f64::from(quality) / 60.0).powf(market.quality_exponent);

    let tier_index = (playlist_tier as usize).min(market.playlist_tier_multipliers.len() - 1);
    let tier_multiplier = market.playlist_tier_multipliers[tier_index];

    let reputation_factor = 1.0 + reputation.clamp(0.0, 100.0) * market.reputation_stream_bonus;

    let marketing_factor = 1.0
        + market.marketing_stream_coeff
            * (marketing_spend.max(0) as f64 / market.marketing_reference_spend.max(1) as f64)
                .sqrt();

    market.base_streams * quality_factor * tier_multiplier * reputation_factor * marketing_factor
}

/// One post-release decay period for a song
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodResult {
    pub streams: f64,
    /// Revenue in cents for the period
    pub revenue: i64,
    /// False once the song has fallen below the revenue floor or run out
    /// of decay periods
    pub still_active: bool,
}

/// Apply one geometric decay period to a song's streams
///
/// `awareness` is the owning release's current accumulator; it lifts the
/// decayed figure by up to `awareness_boost_cap`.
pub fn decayed_streams(
    last_streams: f64,
    decay_periods_used: u32,
    awareness: f64,
    market: &MarketConfig,
) -> PeriodResult {
    if decay_periods_used >= market.max_decay_periods {
        return PeriodResult {
            streams: 0.0,
            revenue: 0,
            still_active: false,
        };
    }

    let boost = 1.0 + (awareness * market.awareness_boost_coeff).min(market.awareness_boost_cap);
    let streams = last_streams * market.weekly_decay * boost;
    let revenue = revenue_for_streams(streams, market);

    if revenue < market.min_weekly_revenue {
        // Below the floor the song stops contributing entirely.
        return PeriodResult {
            streams: 0.0,
            revenue: 0,
            still_active: false,
        };
    }

    PeriodResult {
        streams,
        revenue,
        still_active: true,
    }
}

/// Streams to cents at the configured per-stream rate
pub fn revenue_for_streams(streams: f64, market: &MarketConfig) -> i64 {
    (streams * market.revenue_per_stream).round() as i64
}

/// Resolve a multi-city tour
///
/// Expected attendance is deterministic; each city's actual attendance is
/// the expected value perturbed independently by the bounded variance.
#[allow(clippy::too_many_arguments)]
pub fn tour_result(
    tour_id: Uuid,
    artist_id: Uuid,
    cities: u32,
    venue_tier: u8,
    popularity: f64,
    reputation: f64,
    ticket_price: i64,
    budget: i64,
    market: &MarketConfig,
    rng: &mut RngManager,
) -> TourOutcome {
    let tier_index = (venue_tier as usize).min(market.venue_capacities.len() - 1);
    let capacity = f64::from(market.venue_capacities[tier_index]);

    let popularity_modifier =
        1.0 - market.popularity_sell_coeff / 2.0 + market.popularity_sell_coeff * (popularity / 100.0);
    let reputation_modifier =
        1.0 - market.reputation_sell_coeff / 2.0 + market.reputation_sell_coeff * (reputation / 100.0);

    let expected = (capacity * market.base_sell_through * popularity_modifier * reputation_modifier)
        .min(capacity);

    let mut attendance = 0u64;
    let mut ticket_revenue = 0i64;
    let mut merch_revenue = 0i64;

    for _ in 0..cities {
        let actual = (expected * rng.variance(market.attendance_variance))
            .clamp(0.0, capacity)
            .round();
        attendance += actual as u64;
        ticket_revenue += (actual as i64) * ticket_price;
        merch_revenue +=
            ((actual * market.merch_attendance_fraction) as i64) * market.merch_per_head;
    }

    TourOutcome {
        tour_id,
        artist_id,
        cities,
        attendance,
        ticket_revenue,
        merch_revenue,
        net_revenue: ticket_revenue + merch_revenue - budget,
    }
}
