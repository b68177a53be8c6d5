//! Dice abstraction: the engine's sole entropy source.

use passline_types::DIE_SIDES;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of single-die rolls. [`GameState::resolve_roll`] draws two
/// independent values per call; implementations must return a uniform
/// value in 1..=6.
///
/// [`GameState::resolve_roll`]: crate::GameState::resolve_roll
pub trait Dice {
    fn roll_die(&mut self) -> u8;
}

/// Fair dice backed by a seedable PRNG.
pub struct FairDice {
    rng: StdRng,
}

impl FairDice {
    /// Dice seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible dice for replays and simulations.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Dice for FairDice {
    fn roll_die(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_SIDES)
    }
}
