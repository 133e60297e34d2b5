//! Deterministic seeded randomness.
//!
//! Every procedural decision in the engine (star types, mineral layouts,
//! base prices, market stock) draws from a [`SeededRng`] derived from the
//! galaxy seed and a coordinate. The same seed and coordinate must always
//! produce the same stream, on every platform - regenerating a system is
//! how callers "peek" at undiscovered space without persisting anything.

use crate::coord::Coordinate;

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// A deterministic random number generator using xorshift.
///
/// This simple PRNG ensures that the same seed always produces the same
/// sequence of random numbers across all platforms.
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let mut state = FNV_OFFSET_BASIS;
        for &byte in seed.iter() {
            state ^= byte as u64;
            state = state.wrapping_mul(FNV_PRIME);
        }
        Self::from_state(state)
    }

    /// Create an RNG keyed by a galaxy seed string and a coordinate.
    ///
    /// The seed string is hashed FNV-1a byte-by-byte, then the three
    /// coordinates are folded in x, y, z order. This fixed folding order is
    /// part of the engine's compatibility contract.
    pub fn for_coordinate(seed: &str, coord: &Coordinate) -> Self {
        let mut state = FNV_OFFSET_BASIS;
        for &byte in seed.as_bytes() {
            state ^= byte as u64;
            state = state.wrapping_mul(FNV_PRIME);
        }
        for component in [coord.x, coord.y, coord.z] {
            for byte in component.to_le_bytes() {
                state ^= byte as u64;
                state = state.wrapping_mul(FNV_PRIME);
            }
        }
        Self::from_state(state)
    }

    /// Derive a sub-stream from this RNG, labeled so different consumers
    /// of the same coordinate (system generation vs. market stock) do not
    /// share a stream.
    pub fn derive(&self, label: &str) -> Self {
        let mut state = self.state;
        for &byte in label.as_bytes() {
            state ^= byte as u64;
            state = state.wrapping_mul(FNV_PRIME);
        }
        Self::from_state(state)
    }

    fn from_state(state: u64) -> Self {
        // Ensure non-zero state
        let state = if state == 0 { 0x853c49e6748fea9b } else { state };
        Self { state }
    }

    /// Generate next random u64.
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64*
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate a random u32.
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Generate a random number in range [0, max).
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// Generate a random number in range [lo, hi] (inclusive).
    pub fn next_range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        lo + self.next_range(hi - lo + 1)
    }

    /// Generate a random float in range [0.0, 1.0).
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() as f32) / (u32::MAX as f32)
    }

    /// Generate a boolean with given probability of true.
    pub fn chance(&mut self, probability: f32) -> bool {
        self.next_f32() < probability
    }

    /// Pick an index into a weight table.
    ///
    /// Weights are relative; a zero total falls back to index 0.
    pub fn pick_weighted(&mut self, weights: &[u32]) -> usize {
        let total: u32 = weights.iter().sum();
        if total == 0 {
            return 0;
        }
        let mut roll = self.next_range(total);
        for (i, &w) in weights.iter().enumerate() {
            if roll < w {
                return i;
            }
            roll -= w;
        }
        weights.len() - 1
    }
}
