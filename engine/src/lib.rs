//! Craps rules engine.
//!
//! Two layers, leaves first: the [`catalog`] module holds the stateless
//! per-bet rules (outcome checks, payout rates, wager bounds) and the state
//! machine in [`GameState`] owns the balance, point, and wager ledger and
//! exposes the only two mutating operations: applying a wager-change batch
//! and resolving a dice roll.
//!
//! The engine performs no I/O. The only entropy enters through the
//! [`Dice`] trait, so tests and replays can script every roll.

pub mod catalog;
mod rng;
mod state;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

#[cfg(test)]
mod integration_tests;

pub use catalog::{Bet, PayRate};
pub use rng::{Dice, FairDice};
pub use state::{BetResolution, GameError, GameState, RoundPhase};
