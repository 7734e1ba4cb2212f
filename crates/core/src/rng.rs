//! RNG module - seedable randomness for tile spawns
//!
//! The engine is generic over any [`rand::Rng`], so callers can inject
//! `StdRng`, `SmallRng`, or a scripted generator in tests. The default is
//! [`SimpleRng`], a tiny LCG that makes `Game::new(seed)` reproducible across
//! platforms and crate versions.
//!
//! Spawn policy:
//! - position: uniform over the empty cells
//! - value: 4 with `four_chance_percent` probability, 2 otherwise

use rand::{Rng, RngCore, SeedableRng};

use crate::types::Position;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    fn step(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RngCore for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.step());
        let lo = u64::from(self.step());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SimpleRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// Choose the value of a new tile: 4 with `four_chance_percent` odds, else 2.
pub fn spawn_value<R: Rng + ?Sized>(rng: &mut R, four_chance_percent: u8) -> u32 {
    if rng.gen_range(0..100u32) < u32::from(four_chance_percent) {
        4
    } else {
        2
    }
}

/// Choose a cell uniformly from `empty`. Returns None if there is none.
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, empty: &[Position]) -> Option<Position> {
    if empty.is_empty() {
        return None;
    }
    empty.get(rng.gen_range(0..empty.len())).copied()
}
