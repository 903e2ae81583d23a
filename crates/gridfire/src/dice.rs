//! Seeded randomness for reaction hooks

use crate::config::{CombatTuning, RollRange};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic roll source
///
/// The same seed always produces the same sequence of rolls.
#[derive(Debug, Clone)]
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    /// Create dice from a seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Roll a value in `range`, both ends inclusive
    ///
    /// A range with `min >= max` always yields `min`.
    pub fn roll(&mut self, range: RollRange) -> u32 {
        if range.min >= range.max {
            range.min
        } else {
            self.rng.gen_range(range.min..=range.max)
        }
    }

    /// Uniform float in `low..high`, or `low` for an empty range
    pub fn uniform(&mut self, low: f32, high: f32) -> f32 {
        if low >= high {
            low
        } else {
            self.rng.gen_range(low..high)
        }
    }
}

/// Everything a reaction hook may need beyond the two participants
pub struct ReactionContext<'a> {
    dice: &'a mut Dice,
    tuning: &'a CombatTuning,
}

impl<'a> ReactionContext<'a> {
    /// Bundle dice and tuning for one collision pass
    pub fn new(dice: &'a mut Dice, tuning: &'a CombatTuning) -> Self {
        Self { dice, tuning }
    }

    /// Combat tuning for this pass
    pub fn tuning(&self) -> &CombatTuning {
        self.tuning
    }

    /// Roll a value in `range`
    pub fn roll(&mut self, range: RollRange) -> u32 {
        self.dice.roll(range)
    }
}
