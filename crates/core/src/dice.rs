//! Six-sided dice, the only source of randomness in a game.

use chrono::Utc;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

/// Faces on a standard die.
pub const DIE_FACES: u8 = 6;

/// Source of die rolls consumed by combat and mission assignment.
pub trait DiceRoller {
    /// Roll one die, returning a value in `1..=6`.
    fn roll_d6(&mut self) -> u8;

    /// Pick an index uniformly in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// [`DiceRoller`] backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngDice<R = StdRng> {
    rng: R,
}

impl<R: Rng> RngDice<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDice<StdRng> {
    /// Deterministic dice for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Dice seeded from the current wall clock.
    pub fn from_time() -> Self {
        let now = Utc::now();
        let seed = now
            .timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_micros()) as u64;
        debug!(seed, "seeding dice from clock");
        Self::seeded(seed)
    }
}

impl<R: Rng> DiceRoller for RngDice<R> {
    fn roll_d6(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_FACES)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}
