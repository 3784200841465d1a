//! Random number service for dungeon generation.
//!
//! Wraps a seeded ChaCha RNG so tests can inject deterministic sequences
//! while production callers draw from entropy.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generation random number source.
///
/// Every randomized decision in the generator goes through this service,
/// passed down the call chain by mutable borrow.
#[derive(Debug, Clone)]
pub struct GenRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl GenRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Roll an integer in `min..=max`, inclusive both ends.
    ///
    /// Returns `min` if `max <= min`.
    pub fn range(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Returns true with probability `chance`/100
    pub fn percent(&mut self, chance: u32) -> bool {
        self.rng.gen_range(0..100) < chance
    }

    /// Choose a random element from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.rng.gen_range(0..items.len())])
        }
    }

    /// Roll against a weighted table of (cumulative threshold, value) pairs.
    ///
    /// Rolls 1..=100 and returns the first entry whose threshold is at least
    /// the rolled value, or None when the roll exceeds every threshold.
    pub fn weighted_opt<T: Copy>(&mut self, table: &[(u8, T)]) -> Option<T> {
        let roll = self.range(1, 100) as u8;
        table
            .iter()
            .find(|(threshold, _)| roll <= *threshold)
            .map(|(_, value)| *value)
    }

    /// Roll against a weighted table whose thresholds cover 1..=100.
    ///
    /// Falls back to the last entry if the table leaves a gap below 100.
    pub fn weighted<T: Copy>(&mut self, table: &[(u8, T)]) -> T {
        self.weighted_opt(table)
            .unwrap_or(table[table.len() - 1].1)
    }
}

impl Default for GenRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
