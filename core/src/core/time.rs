//! Time management for the simulation
//!
//! The simulation operates in discrete weekly ticks. Four weeks form a
//! month. This module provides deterministic time advancement.

use serde::{Deserialize, Serialize};

/// Number of weekly ticks aggregated into one month
pub const WEEKS_PER_MONTH: usize = 4;

/// Manages simulation time in discrete weeks and derived months
///
/// # Example
/// ```
/// use label_simulator_core_rs::TimeManager;
///
/// let mut time = TimeManager::new();
/// assert_eq!(time.current_week(), 0);
/// assert_eq!(time.current_month(), 0);
///
/// time.advance_week();
/// assert_eq!(time.current_week(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TimeManager {
    /// Total weeks elapsed since career start
    current_week: usize,
}

impl TimeManager {
    /// Create a new TimeManager at week 0
    pub fn new() -> Self {
        Self { current_week: 0 }
    }

    /// Resume from a known week (snapshot restore)
    pub fn from_week(week: usize) -> Self {
        Self { current_week: week }
    }

    /// Advance time by one week
    pub fn advance_week(&mut self) {
        self.current_week += 1;
    }

    /// Get the current week (total weeks since start)
    pub fn current_week(&self) -> usize {
        self.current_week
    }

    /// Get the current month (0-indexed, four weeks per month)
    pub fn current_month(&self) -> usize {
        self.current_week / WEEKS_PER_MONTH
    }

    /// Week within the current month (0..4)
    pub fn week_of_month(&self) -> usize {
        self.current_week % WEEKS_PER_MONTH
    }

    /// True on the last week of a month (monthly formulas fire here)
    pub fn is_month_end(&self) -> bool {
        self.current_week > 0 && self.current_week % WEEKS_PER_MONTH == 0
    }
}
