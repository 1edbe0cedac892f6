//! Game configuration bundle
//!
//! One strongly typed, read-only struct assembled once and passed by
//! reference into every formula call. Nothing in the engine reaches into a
//! global; a formula's tuning inputs are always visible in its signature.
//!
//! The defaults here are the calibrated baseline economy. A caller may load
//! an alternative bundle from JSON (serde) but the engine validates it
//! before any tick runs: a malformed bundle is a `ConfigError`, fatal for
//! the tick, never a silent fallback.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by config validation
///
/// Any of these aborts engine construction; a tick never runs against an
/// invalid bundle.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be within (0, 1] (got {value})")]
    NotARate { field: &'static str, value: f64 },

    #[error("{field} must not be empty")]
    EmptyList { field: &'static str },

    #[error("{field} thresholds must be strictly increasing")]
    UnorderedThresholds { field: &'static str },
}

/// Complete configuration bundle for one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GameConfig {
    pub economy: EconomyConfig,
    pub quality: QualityConfig,
    pub market: MarketConfig,
    pub psychology: PsychologyConfig,
    pub progression: ProgressionConfig,
}

impl GameConfig {
    /// Validate every section. Called once by `Engine::new`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.economy.validate()?;
        self.quality.validate()?;
        self.market.validate()?;
        self.psychology.validate()?;
        self.progression.validate()?;
        Ok(())
    }
}

/// Label-economy constants. All money values are i64 cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomyConfig {
    /// Base recording cost per song before producer/time multipliers (cents)
    pub base_song_cost: i64,

    /// How far below zero the label account may go before the tick aborts
    /// (cents, expressed as a positive number)
    pub overdraft_limit: i64,

    /// Per-song economies-of-scale discount on minimum viable cost
    pub scale_discount_per_song: f64,

    /// Discount never reduces minimum viable cost below this fraction
    pub scale_discount_floor: f64,

    /// Player actions allowed per week
    pub focus_slot_capacity: u8,

    /// Reputation gained per quality point above 50 on a release
    pub reputation_per_quality_point: f64,

    /// Flat reputation gained for completing a tour
    pub tour_reputation_gain: f64,

    /// Extra reputation for a chart debut
    pub chart_debut_reputation: f64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            base_song_cost: 150_000,      // $1,500 per song baseline
            overdraft_limit: 250_000,     // $2,500 allowed overdraft
            scale_discount_per_song: 0.015,
            scale_discount_floor: 0.85,
            focus_slot_capacity: 3,
            reputation_per_quality_point: 0.08,
            tour_reputation_gain: 1.5,
            chart_debut_reputation: 2.0,
        }
    }
}

impl EconomyConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_song_cost <= 0 {
            return Err(ConfigError::NonPositive {
                field: "economy.base_song_cost",
                value: self.base_song_cost as f64,
            });
        }
        if self.scale_discount_floor <= 0.0 || self.scale_discount_floor > 1.0 {
            return Err(ConfigError::NotARate {
                field: "economy.scale_discount_floor",
                value: self.scale_discount_floor,
            });
        }
        if self.focus_slot_capacity == 0 {
            return Err(ConfigError::NonPositive {
                field: "economy.focus_slot_capacity",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Song-quality formula coefficients
///
/// The piecewise budget-efficiency breakpoints live as named constants in
/// `formulas::quality`; this section carries the tunable weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Weight of artist talent in the base blend
    pub talent_weight: f64,

    /// Weight of producer skill in the base blend
    pub producer_weight: f64,

    /// Half-width of the popularity factor band (0.10 → 0.95x..1.05x)
    pub popularity_band: f64,

    /// Geometric per-song fatigue beyond `fatigue_free_songs`
    pub fatigue_rate: f64,

    /// Songs per project recorded before session fatigue sets in
    pub fatigue_free_songs: u32,

    /// Full width of the mood factor band (0.2 → 0.9x..1.1x)
    pub mood_band: f64,

    /// Work-ethic synergy scale applied on top of the time-investment factor
    pub work_ethic_synergy: f64,

    /// Variance band half-width at the bottom of the skill scale
    pub variance_base: f64,

    /// Variance band half-width at the top of the skill scale
    pub variance_floor: f64,

    /// Baseline probability of a breakout outlier
    pub breakout_chance_base: f64,

    /// Breakout probability gained per point of missing combined skill
    pub breakout_skill_bias: f64,

    /// Baseline probability of a critical-failure outlier
    pub critical_failure_chance_base: f64,

    /// Critical-failure probability gained per point of missing combined skill
    pub critical_failure_skill_bias: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            talent_weight: 0.62,
            producer_weight: 0.52,
            popularity_band: 0.10,
            fatigue_rate: 0.97,
            fatigue_free_songs: 3,
            mood_band: 0.2,
            work_ethic_synergy: 1.0,
            variance_base: 0.12,
            variance_floor: 0.03,
            breakout_chance_base: 0.02,
            breakout_skill_bias: 0.0002,
            critical_failure_chance_base: 0.02,
            critical_failure_skill_bias: 0.0003,
        }
    }
}

impl QualityConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.talent_weight <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "quality.talent_weight",
                value: self.talent_weight,
            });
        }
        if self.producer_weight <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "quality.producer_weight",
                value: self.producer_weight,
            });
        }
        if self.fatigue_rate <= 0.0 || self.fatigue_rate > 1.0 {
            return Err(ConfigError::NotARate {
                field: "quality.fatigue_rate",
                value: self.fatigue_rate,
            });
        }
        Ok(())
    }
}

/// Streaming and live-performance market formulas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Weekly streams a quality-60 release earns before modifiers
    pub base_streams: f64,

    /// Superlinear quality exponent for initial streams
    pub quality_exponent: f64,

    /// Stream multiplier gained per reputation point
    pub reputation_stream_bonus: f64,

    /// Initial-stream multiplier per playlist tier, indexed by tier
    pub playlist_tier_multipliers: Vec<f64>,

    /// Marketing spend that yields a 1x marketing factor contribution (cents)
    pub marketing_reference_spend: i64,

    /// Strength of the square-root marketing factor on initial streams
    pub marketing_stream_coeff: f64,

    /// Geometric weekly decay applied to the prior period's streams
    pub weekly_decay: f64,

    /// A song stops contributing once its weekly revenue falls below this (cents)
    pub min_weekly_revenue: i64,

    /// Hard cap on decay periods per song
    pub max_decay_periods: u32,

    /// Revenue per stream (cents; fractional, rounded per week)
    pub revenue_per_stream: f64,

    /// Awareness points per reference-spend unit, per channel
    pub awareness_social_coeff: f64,
    pub awareness_press_coeff: f64,
    pub awareness_radio_coeff: f64,

    /// Weekly geometric decay of the awareness accumulator
    pub awareness_decay: f64,

    /// Stream boost per awareness point (capped at `awareness_boost_cap`)
    pub awareness_boost_coeff: f64,
    pub awareness_boost_cap: f64,

    /// First-week streams needed for a chart debut event
    pub chart_debut_streams: u64,

    /// Venue capacity per venue access tier, indexed by tier
    pub venue_capacities: Vec<u32>,

    /// Baseline fraction of venue capacity filled
    pub base_sell_through: f64,

    /// Sell-through modifier strength from artist popularity
    pub popularity_sell_coeff: f64,

    /// Sell-through modifier strength from label reputation
    pub reputation_sell_coeff: f64,

    /// Bounded per-city attendance variance (0.2 → ±20%)
    pub attendance_variance: f64,

    /// Fraction of attendees buying merchandise
    pub merch_attendance_fraction: f64,

    /// Merchandise revenue per buying attendee (cents)
    pub merch_per_head: i64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_streams: 50_000.0,
            quality_exponent: 1.8,
            reputation_stream_bonus: 0.004,
            playlist_tier_multipliers: vec![1.0, 1.6, 2.6, 4.0],
            marketing_reference_spend: 500_000, // $5,000
            marketing_stream_coeff: 0.35,
            weekly_decay: 0.85,
            min_weekly_revenue: 500, // $5
            max_decay_periods: 36,
            revenue_per_stream: 0.35, // cents
            awareness_social_coeff: 10.0,
            awareness_press_coeff: 7.0,
            awareness_radio_coeff: 12.0,
            awareness_decay: 0.75,
            awareness_boost_coeff: 0.02,
            awareness_boost_cap: 0.5,
            chart_debut_streams: 250_000,
            venue_capacities: vec![150, 600, 2_500, 12_000],
            base_sell_through: 0.6,
            popularity_sell_coeff: 0.5,
            reputation_sell_coeff: 0.2,
            attendance_variance: 0.2,
            merch_attendance_fraction: 0.55,
            merch_per_head: 800, // $8
        }
    }
}

impl MarketConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.weekly_decay <= 0.0 || self.weekly_decay > 1.0 {
            return Err(ConfigError::NotARate {
                field: "market.weekly_decay",
                value: self.weekly_decay,
            });
        }
        if self.awareness_decay <= 0.0 || self.awareness_decay > 1.0 {
            return Err(ConfigError::NotARate {
                field: "market.awareness_decay",
                value: self.awareness_decay,
            });
        }
        if self.playlist_tier_multipliers.is_empty() {
            return Err(ConfigError::EmptyList {
                field: "market.playlist_tier_multipliers",
            });
        }
        if self.venue_capacities.is_empty() {
            return Err(ConfigError::EmptyList {
                field: "market.venue_capacities",
            });
        }
        if self.base_streams <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "market.base_streams",
                value: self.base_streams,
            });
        }
        if self.base_sell_through <= 0.0 || self.base_sell_through > 1.0 {
            return Err(ConfigError::NotARate {
                field: "market.base_sell_through",
                value: self.base_sell_through,
            });
        }
        Ok(())
    }
}

/// Artist psychology drift and forced-event thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsychologyConfig {
    /// Weekly stress per active (non-released) project
    pub stress_per_active_project: f64,

    /// Extra weekly stress while a project is in the recording stage
    pub stress_recording_load: f64,

    /// Extra stress on a week the artist has a release go out
    pub stress_release_week: f64,

    /// Extra stress while the artist's last month ran a negative ROI
    pub stress_negative_roi: f64,

    /// Baseline weekly stress recovery (subtracted every week)
    pub stress_recovery: f64,

    /// Mood lost per point of current stress, per week
    pub stress_mood_bleed: f64,

    /// Mood equilibrium band: no drift inside [low, high]
    pub mood_equilibrium_low: f64,
    pub mood_equilibrium_high: f64,

    /// Fixed weekly drift toward the equilibrium band when outside it
    pub mood_drift: f64,

    /// Creativity cycle period in weeks and amplitude in trait points
    pub creativity_cycle_period: f64,
    pub creativity_cycle_amplitude: f64,

    /// Creativity lost per point of current stress, per week
    pub creativity_stress_penalty: f64,

    /// Creativity bonus when mood exceeds the bonus threshold
    pub creativity_mood_bonus: f64,
    pub creativity_mood_bonus_threshold: f64,

    /// Breakdown intervention fires when stress > threshold AND mood < threshold
    pub breakdown_stress_threshold: f64,
    pub breakdown_mood_threshold: f64,
    pub breakdown_stress_relief: f64,
    pub breakdown_mood_recovery: f64,

    /// Fame complications fire when popularity and monthly revenue both exceed
    pub fame_popularity_threshold: f64,
    pub fame_revenue_threshold: i64,
    pub fame_stress_spike: f64,
    pub fame_loyalty_hit: f64,
}

impl Default for PsychologyConfig {
    fn default() -> Self {
        Self {
            stress_per_active_project: 3.0,
            stress_recording_load: 2.0,
            stress_release_week: 4.0,
            stress_negative_roi: 2.5,
            stress_recovery: 1.5,
            stress_mood_bleed: 0.05,
            mood_equilibrium_low: 45.0,
            mood_equilibrium_high: 65.0,
            mood_drift: 2.0,
            creativity_cycle_period: 12.0,
            creativity_cycle_amplitude: 1.5,
            creativity_stress_penalty: 0.03,
            creativity_mood_bonus: 2.0,
            creativity_mood_bonus_threshold: 70.0,
            breakdown_stress_threshold: 85.0,
            breakdown_mood_threshold: 25.0,
            breakdown_stress_relief: 35.0,
            breakdown_mood_recovery: 20.0,
            fame_popularity_threshold: 80.0,
            fame_revenue_threshold: 2_000_000, // $20,000/month
            fame_stress_spike: 12.0,
            fame_loyalty_hit: 5.0,
        }
    }
}

impl PsychologyConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.creativity_cycle_period <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "psychology.creativity_cycle_period",
                value: self.creativity_cycle_period,
            });
        }
        if self.mood_equilibrium_low > self.mood_equilibrium_high {
            return Err(ConfigError::UnorderedThresholds {
                field: "psychology.mood_equilibrium",
            });
        }
        Ok(())
    }
}

/// Reputation thresholds for the three access-tier tracks
///
/// `thresholds[n]` is the reputation required to move from tier n to n+1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionConfig {
    pub playlist_thresholds: Vec<f64>,
    pub press_thresholds: Vec<f64>,
    pub venue_thresholds: Vec<f64>,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            playlist_thresholds: vec![20.0, 45.0, 70.0],
            press_thresholds: vec![15.0, 40.0, 65.0],
            venue_thresholds: vec![10.0, 35.0, 60.0],
        }
    }
}

impl ProgressionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (field, list) in [
            ("progression.playlist_thresholds", &self.playlist_thresholds),
            ("progression.press_thresholds", &self.press_thresholds),
            ("progression.venue_thresholds", &self.venue_thresholds),
        ] {
            if list.is_empty() {
                return Err(ConfigError::EmptyList { field });
            }
            if list.windows(2).any(|w| w[0] >= w[1]) {
                return Err(ConfigError::UnorderedThresholds { field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_bad_decay_rate_rejected() {
        let mut config = GameConfig::default();
        config.market.weekly_decay = 1.5;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotARate {
                field: "market.weekly_decay",
                value: 1.5
            })
        );
    }

    #[test]
    fn test_unordered_thresholds_rejected() {
        let mut config = GameConfig::default();
        config.progression.press_thresholds = vec![40.0, 15.0];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnorderedThresholds { .. })
        ));
    }

    #[test]
    fn test_empty_venue_capacities_rejected() {
        let mut config = GameConfig::default();
        config.market.venue_capacities.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyList { .. })));
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
