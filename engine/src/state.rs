//! Game state machine: balance, point, wager ledger, and the two mutating
//! operations (wager-change batches and dice resolution).

use commonware_codec::Error as CodecError;
use passline_types::{BetFailReason, BetKind, BetOutcome, Snapshot, WagerChange};
use thiserror::Error;
use tracing::debug;

use crate::catalog::{self, Bet};
use crate::rng::Dice;

/// Structural failures of the mutating operations. These are caller bugs or
/// lifecycle violations, reported before any state is touched; rule-level
/// rejections travel as [`BetFailReason`] codes instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The game has finished; reset or start a new one to continue.
    #[error("game is already over")]
    GameOver,
    /// The come-out roll needs a Pass or Don't Pass wager on the table.
    #[error("a pass or don't pass bet is required before the come-out roll")]
    LineBetRequired,
}

/// Phase of the current round, derived from the point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    ComeOut,
    Point(u8),
}

/// Settlement of one wagered kind by a roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BetResolution {
    pub kind: BetKind,
    pub outcome: BetOutcome,
    /// The wager that was at stake when the dice were thrown.
    pub wager: u64,
    /// Amount returned to the balance: wager plus winnings on a win, the
    /// bare wager on a push, zero on a loss or while undecided.
    pub credited: u64,
}

/// The collective state of one game: a single player, a single shooter.
///
/// Mutation happens only through [`GameState::apply_wager_changes`] and
/// [`GameState::resolve_roll`]; everything else is a read accessor. Once
/// `finished` turns true the state is terminal until [`GameState::reset`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    balance: u64,
    point: Option<u8>,
    /// Ledger of active wagers in placement order. A kind is present iff
    /// its wager is strictly positive.
    wagers: Vec<(BetKind, u64)>,
    last_roll: Option<(u8, u8)>,
    round: u32,
    finished: bool,
}

impl GameState {
    /// A fresh game with the given starting balance.
    pub fn new(balance: u64) -> Self {
        Self {
            balance,
            point: None,
            wagers: Vec::new(),
            last_roll: None,
            round: 0,
            finished: false,
        }
    }

    /// Balance not currently wagered.
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// The established point, or None during the come-out.
    pub fn point(&self) -> Option<u8> {
        self.point
    }

    pub fn phase(&self) -> RoundPhase {
        match self.point {
            Some(point) => RoundPhase::Point(point),
            None => RoundPhase::ComeOut,
        }
    }

    /// Dice from the most recent roll, or None before the first roll.
    pub fn last_roll(&self) -> Option<(u8, u8)> {
        self.last_roll
    }

    /// Number of rolls resolved so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Current wager on `kind`, 0 when absent.
    pub fn wager(&self, kind: BetKind) -> u64 {
        catalog::ledger_wager(&self.wagers, kind)
    }

    /// The active ledger in placement order.
    pub fn wagers(&self) -> &[(BetKind, u64)] {
        &self.wagers
    }

    /// Live view of one bet kind: wager, bounds, removability, rate.
    pub fn bet(&self, kind: BetKind) -> Bet<'_> {
        Bet::new(kind, self)
    }

    /// Clears the round (point, wagers, roll counter, finished flag) for a
    /// fresh come-out, keeping the balance.
    pub fn reset(&mut self) {
        self.round = 0;
        self.point = None;
        self.wagers.clear();
        self.finished = false;
    }

    /// Applies a batch of wager changes in order, all-or-nothing.
    ///
    /// Each change replaces the wager on its kind; zero removes the bet.
    /// The returned vector holds one [`BetFailReason`] per change. On the
    /// first failure the whole batch rolls back: earlier entries read
    /// `Success` but none of them is committed, and changes after the
    /// failure read `Unknown` because they were never examined.
    pub fn apply_wager_changes(
        &mut self,
        changes: &[WagerChange],
    ) -> Result<Vec<BetFailReason>, GameError> {
        if self.finished {
            return Err(GameError::GameOver);
        }

        let old_wagers = self.wagers.clone();
        let old_balance = self.balance;

        let mut reasons = Vec::with_capacity(changes.len());
        for change in changes {
            let reason = self.apply_one(change);
            let failed = !reason.is_success();
            reasons.push(reason);
            if failed {
                break;
            }
        }
        while reasons.len() < changes.len() {
            reasons.push(BetFailReason::Unknown);
        }

        if reasons.last().is_some_and(|reason| !reason.is_success()) {
            self.wagers = old_wagers;
            self.balance = old_balance;
        } else {
            debug!(
                changes = changes.len(),
                balance = self.balance,
                "committed wager batch"
            );
        }

        Ok(reasons)
    }

    /// Validates and tentatively applies a single change. Balance and
    /// ledger mutations made here are undone wholesale by the caller when
    /// a failure reason comes back.
    fn apply_one(&mut self, change: &WagerChange) -> BetFailReason {
        if change.wager < 0 {
            return BetFailReason::NegativeWager;
        }
        let new_wager = change.wager as u64;

        let Ok(kind) = BetKind::try_from(change.kind) else {
            return BetFailReason::InvalidType;
        };
        let old_wager = self.wager(kind);

        let balance = self.balance as i128 + old_wager as i128 - new_wager as i128;
        if balance < 0 {
            return BetFailReason::NotEnoughBalance;
        }
        self.balance = balance as u64;

        let max_wager = catalog::max_wager(kind, self.point, &self.wagers);
        if old_wager == 0 && new_wager > 0 && max_wager == 0 {
            return BetFailReason::CannotAddBet;
        }
        if new_wager > max_wager {
            return BetFailReason::WagerAboveMax;
        }

        if old_wager > 0 && new_wager == 0 && !catalog::can_remove(kind, &self.wagers) {
            return BetFailReason::CannotRemoveBet;
        }
        if new_wager < catalog::min_wager(kind, old_wager) {
            return BetFailReason::WagerBelowMin;
        }

        self.set_wager(kind, new_wager);
        BetFailReason::Success
    }

    fn set_wager(&mut self, kind: BetKind, wager: u64) {
        if let Some(entry) = self.wagers.iter_mut().find(|(k, _)| *k == kind) {
            entry.1 = wager;
        } else if wager > 0 {
            self.wagers.push((kind, wager));
        }
        self.wagers.retain(|(_, w)| *w > 0);
    }

    /// Rolls the dice and settles every active wager against the result.
    ///
    /// Wins credit wager plus winnings, pushes return the wager, losses
    /// forfeit it; undecided bets stay on the table. The zero-wager Pass
    /// probe then decides the round: a decided probe finishes the game, an
    /// undecided come-out establishes the point, and anything else rolls
    /// again. Returns one [`BetResolution`] per staked kind in ledger
    /// order.
    pub fn resolve_roll<D: Dice + ?Sized>(
        &mut self,
        dice: &mut D,
    ) -> Result<Vec<BetResolution>, GameError> {
        if self.finished {
            return Err(GameError::GameOver);
        }
        if self.point.is_none()
            && self.wager(BetKind::Pass) == 0
            && self.wager(BetKind::DontPass) == 0
        {
            return Err(GameError::LineBetRequired);
        }

        let d1 = dice.roll_die();
        let d2 = dice.roll_die();
        let total = d1 + d2;

        // Settle against a snapshot of the ledger; undecided wagers are
        // carried into the rebuilt ledger in their original order.
        let staked = std::mem::take(&mut self.wagers);
        let mut resolutions = Vec::with_capacity(staked.len());
        for (kind, wager) in staked {
            let outcome = catalog::check(kind, self.point, total);
            let credited = match outcome {
                BetOutcome::Win => {
                    wager.saturating_add(catalog::pay_rate(kind, self.point).winnings(wager))
                }
                BetOutcome::Tie => wager,
                BetOutcome::Lose | BetOutcome::Undecided => 0,
            };
            if outcome.is_decided() {
                self.balance = self.balance.saturating_add(credited);
            } else {
                self.wagers.push((kind, wager));
            }
            resolutions.push(BetResolution {
                kind,
                outcome,
                wager,
                credited,
            });
        }

        // A zero-wager Pass probe is the phase-transition authority: when
        // it decides, every real wager must already have settled.
        if catalog::check(BetKind::Pass, self.point, total).is_decided() {
            assert!(
                self.wagers.is_empty(),
                "wagers remain after the round resolved: {:?}",
                self.wagers
            );
            self.finished = true;
        } else if self.point.is_none() {
            self.point = Some(total);
        }

        self.last_roll = Some((d1, d2));
        self.round += 1;
        debug!(
            d1,
            d2,
            total,
            balance = self.balance,
            point = ?self.point,
            finished = self.finished,
            "resolved roll"
        );
        Ok(resolutions)
    }

    /// Captures the state as a versioned snapshot record.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            balance: self.balance,
            last_roll: self.last_roll,
            point: self.point,
            round: self.round,
            finished: self.finished,
            wagers: self.wagers.clone(),
        }
    }

    /// Rebuilds a state from a snapshot, re-validating its invariants.
    pub fn restore(snapshot: &Snapshot) -> Result<Self, CodecError> {
        snapshot.validate()?;
        Ok(Self {
            balance: snapshot.balance,
            point: snapshot.point,
            wagers: snapshot.wagers.clone(),
            last_roll: snapshot.last_roll,
            round: snapshot.round,
            finished: snapshot.finished,
        })
    }
}
