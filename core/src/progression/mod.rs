//! Access-tier progression
//!
//! Three independent unlock tracks (playlist, press, venue), each gated by
//! an ordered list of reputation thresholds. A tick upgrades a track by at
//! most one tier, even if reputation jumped past several thresholds at
//! once; the next upgrade waits for a later tick. Unlock weeks are recorded
//! in an append-only history, write-once per (track, tier).

use serde::{Deserialize, Serialize};

use crate::config::ProgressionConfig;

/// One of the three independent unlock tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierTrack {
    Playlist,
    Press,
    Venue,
}

impl TierTrack {
    pub const ALL: [TierTrack; 3] = [TierTrack::Playlist, TierTrack::Press, TierTrack::Venue];

    pub fn name(&self) -> &'static str {
        match self {
            TierTrack::Playlist => "playlist",
            TierTrack::Press => "press",
            TierTrack::Venue => "venue",
        }
    }
}

/// Record of one tier unlock (append-only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierUnlock {
    pub track: TierTrack,
    /// Tier reached by this unlock (1-based; tier 0 is the starting level)
    pub tier: u8,
    pub week: usize,
}

/// Current tier per track plus the unlock history
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AccessTiers {
    playlist: u8,
    press: u8,
    venue: u8,
    history: Vec<TierUnlock>,
}

impl AccessTiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tier(&self, track: TierTrack) -> u8 {
        match track {
            TierTrack::Playlist => self.playlist,
            TierTrack::Press => self.press,
            TierTrack::Venue => self.venue,
        }
    }

    pub fn history(&self) -> &[TierUnlock] {
        &self.history
    }

    /// Week a given (track, tier) unlocked, if it has
    pub fn unlocked_at(&self, track: TierTrack, tier: u8) -> Option<usize> {
        self.history
            .iter()
            .find(|u| u.track == track && u.tier == tier)
            .map(|u| u.week)
    }

    /// Check one track against its thresholds, upgrading at most one step
    ///
    /// Returns the unlock if one happened. Re-checking an already-unlocked
    /// tier is a no-op; the recorded unlock week never changes.
    fn check_track(
        &mut self,
        track: TierTrack,
        thresholds: &[f64],
        reputation: f64,
        week: usize,
    ) -> Option<TierUnlock> {
        let current = self.tier(track) as usize;
        if current >= thresholds.len() {
            return None; // track maxed out
        }
        if reputation < thresholds[current] {
            return None;
        }

        let next = (current + 1) as u8;
        match track {
            TierTrack::Playlist => self.playlist = next,
            TierTrack::Press => self.press = next,
            TierTrack::Venue => self.venue = next,
        }

        // Write-once guard: duplicate history entries are an internal bug,
        // but the append-only list makes them visible rather than silent.
        debug_assert!(self.unlocked_at(track, next).is_none());
        let unlock = TierUnlock {
            track,
            tier: next,
            week,
        };
        self.history.push(unlock);
        Some(unlock)
    }

    /// Re-evaluate every track against current reputation
    ///
    /// At most one upgrade per track per call.
    pub fn check_progression(
        &mut self,
        reputation: f64,
        week: usize,
        config: &ProgressionConfig,
    ) -> Vec<TierUnlock> {
        let mut unlocks = Vec::new();
        for track in TierTrack::ALL {
            let thresholds = match track {
                TierTrack::Playlist => &config.playlist_thresholds,
                TierTrack::Press => &config.press_thresholds,
                TierTrack::Venue => &config.venue_thresholds,
            };
            if let Some(unlock) = self.check_track(track, thresholds, reputation, week) {
                unlocks.push(unlock);
            }
        }
        unlocks
    }
}
