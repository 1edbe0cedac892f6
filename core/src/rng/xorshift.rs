//! xorshift64* random number generator
//!
//! Fast, high-quality PRNG that is deterministic and suitable for
//! simulation purposes.
//!
//! # Determinism
//!
//! Same seed → same sequence. This is CRITICAL for:
//! - Debugging (reproduce an exact playthrough)
//! - Testing (verify tick outcomes)
//! - Replay (a restored snapshot continues identically)

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use label_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let value = rng.next();
/// let roll = rng.range(0, 100); // [0, 100)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        // xorshift state must never be zero
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate the next random u64, advancing the internal state
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate a random value in range [min, max)
    ///
    /// # Panics
    /// Panics if min >= max
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let value = self.next();
        let range_size = (max - min) as u64;
        min + (value % range_size) as i64
    }

    /// Generate random f64 in range [0.0, 1.0)
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform multiplier in `[1 - pct, 1 + pct]`
    ///
    /// Used for bounded-percentage perturbations such as per-city tour
    /// attendance (±20%) and the song-quality variance band.
    pub fn variance(&mut self, pct: f64) -> f64 {
        1.0 + (self.next_f64() * 2.0 - 1.0) * pct
    }

    /// Bernoulli draw: true with probability `p` (clamped to [0, 1])
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p.clamp(0.0, 1.0)
    }

    /// Get current RNG state (for snapshot inspection)
    pub fn get_state(&self) -> u64 {
        self.state
    }
}
