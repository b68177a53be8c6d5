//! Common types used throughout passline.
//!
//! This crate holds the closed enumerations shared by the engine and its
//! callers, the per-change reason codes returned from wager batches, and the
//! versioned [`Snapshot`] record with its binary codec. No game logic lives
//! here.

mod bets;
mod constants;
mod snapshot;

pub use bets::{BetFailReason, BetKind, BetOutcome, WagerChange};
pub use constants::*;
pub use snapshot::Snapshot;
