//! xorshift64* random number generator
//!
//! Fast, high-quality PRNG suitable for simulation purposes. 64-bit
//! state, 64-bit output.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. This is CRITICAL for:
//! - Debugging (reproduce an exact simulation run)
//! - Testing (verify behavior)
//! - Batch runs (independently re-derivable per-run streams)

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use council_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let value = rng.next();
/// let range_value = rng.range(0, 100); // [0, 100)
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is remapped to 1 (xorshift requires nonzero state).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value
    ///
    /// Advances the internal state and returns a random value.
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

    /// Generate random value in range [min, max)
    ///
    /// # Panics
    /// Panics if min >= max
    ///
    /// # Example
    /// ```
    /// use council_simulator_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let pick = rng.range(0, 15); // index into a word list
    /// assert!((0..15).contains(&pick));
    /// ```
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let value = self.next();
        let range_size = (max - min) as u64;
        min + (value % range_size) as i64
    }

    /// Get current RNG state (for replay)
    pub fn get_state(&self) -> u64 {
        self.state
    }

    /// Generate random f64 in range [0.0, 1.0)
    ///
    /// Used for sampling from probability distributions.
    ///
    /// # Example
    /// ```
    /// use council_simulator_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let weight = rng.next_f64();
    /// assert!(weight >= 0.0 && weight < 1.0);
    /// ```
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        // Convert to [0.0, 1.0) by taking the top 53 bits
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Shuffle a slice in place (Fisher-Yates)
    ///
    /// Used by the bimodal quality generator, which interleaves the two
    /// quality groups before clipping.
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        if values.len() < 2 {
            return;
        }
        for i in (1..values.len()).rev() {
            let j = self.range(0, (i + 1) as i64) as usize;
            values.swap(i, j);
        }
    }

    /// Sample `count` distinct indices from `[0, population)` without
    /// replacement, in random order.
    ///
    /// `count` is clamped to `population`. Used for participation
    /// sampling (active members) and coalition membership draws.
    ///
    /// # Example
    /// ```
    /// use council_simulator_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(7);
    /// let picked = rng.sample_indices(10, 3);
    /// assert_eq!(picked.len(), 3);
    /// let mut sorted = picked.clone();
    /// sorted.sort_unstable();
    /// sorted.dedup();
    /// assert_eq!(sorted.len(), 3); // all distinct
    /// ```
    pub fn sample_indices(&mut self, population: usize, count: usize) -> Vec<usize> {
        let count = count.min(population);
        let mut pool: Vec<usize> = (0..population).collect();
        // Partial Fisher-Yates: the first `count` slots end up random
        // and distinct.
        for i in 0..count {
            let j = self.range(i as i64, population as i64) as usize;
            pool.swap(i, j);
        }
        pool.truncate(count);
        pool
    }
}
