//! Deterministic fixtures for driving the engine in tests.

use std::collections::VecDeque;

use crate::rng::Dice;

/// Dice that replay a scripted sequence of die values and panic once the
/// script runs out.
pub struct ScriptedDice {
    rolls: VecDeque<u8>,
}

impl ScriptedDice {
    /// Scripts individual die values, consumed in order.
    pub fn new(dice: &[u8]) -> Self {
        Self {
            rolls: dice.iter().copied().collect(),
        }
    }

    /// Scripts whole-roll totals, splitting each into a valid die pair.
    pub fn totals(totals: &[u8]) -> Self {
        let mut rolls = VecDeque::with_capacity(totals.len() * 2);
        for &total in totals {
            let (d1, d2) = pair_for_total(total);
            rolls.push_back(d1);
            rolls.push_back(d2);
        }
        Self { rolls }
    }

    /// Die values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn roll_die(&mut self) -> u8 {
        self.rolls.pop_front().expect("dice script exhausted")
    }
}

/// Splits a roll total in 2..=12 into a die pair that sums to it.
pub fn pair_for_total(total: u8) -> (u8, u8) {
    assert!((2..=12).contains(&total), "impossible roll total: {total}");
    let d1 = total.saturating_sub(6).max(1);
    (d1, total - d1)
}
