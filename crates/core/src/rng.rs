//! RNG module - piece selection
//!
//! [`Spawner`] picks the next piece from a catalog. The default policy is an
//! independent uniform draw with replacement; [`SpawnPolicy::Bag`] deals out
//! one shuffled copy of every catalog entry before refilling.
//!
//! The randomness source is any [`rand::Rng`], so tests can inject a scripted
//! or seeded generator. [`SimpleRng`] is the default: a small LCG that gives
//! identical piece streams for identical seeds on every platform.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::pieces::{PieceDefinition, PieceInstance};

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
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RngCore for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// How the spawner chooses the next piece
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// Independent uniform draw with replacement
    #[default]
    Uniform,
    /// Deal a shuffled copy of the whole catalog, then refill
    Bag,
}

impl SpawnPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "uniform" | "iid" => Some(SpawnPolicy::Uniform),
            "bag" | "7bag" | "bag7" => Some(SpawnPolicy::Bag),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnPolicy::Uniform => "uniform",
            SpawnPolicy::Bag => "bag",
        }
    }
}

/// Chooses new piece instances from a catalog
#[derive(Debug, Clone)]
pub struct Spawner<R = SimpleRng> {
    policy: SpawnPolicy,
    rng: R,
    /// Catalog indices still to be dealt (bag policy only)
    bag: Vec<usize>,
}

impl<R: Rng> Spawner<R> {
    pub fn new(policy: SpawnPolicy, rng: R) -> Self {
        Self {
            policy,
            rng,
            bag: Vec::new(),
        }
    }

    pub fn policy(&self) -> SpawnPolicy {
        self.policy
    }

    /// Forget any partially dealt bag
    pub fn reset(&mut self) {
        self.bag.clear();
    }

    /// Draw a fresh instance at rotation 0. The anchor is left at the origin
    /// for the caller to position.
    ///
    /// # Panics
    ///
    /// Panics if `catalog` is empty.
    pub fn next(&mut self, catalog: &[Arc<PieceDefinition>]) -> PieceInstance {
        assert!(
            !catalog.is_empty(),
            "cannot spawn from an empty piece catalog"
        );

        let idx = match self.policy {
            SpawnPolicy::Uniform => self.rng.gen_range(0..catalog.len()),
            SpawnPolicy::Bag => self.deal(catalog.len()),
        };
        PieceInstance::new(Arc::clone(&catalog[idx]))
    }

    fn deal(&mut self, len: usize) -> usize {
        // A bag dealt from a different catalog size is stale.
        if self.bag.iter().any(|&i| i >= len) {
            self.bag.clear();
        }
        if self.bag.is_empty() {
            self.bag.extend(0..len);
            self.bag.shuffle(&mut self.rng);
        }
        self.bag.pop().unwrap_or(0)
    }
}
