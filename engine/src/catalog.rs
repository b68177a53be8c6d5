//! Bet catalog: per-kind legality and payout rules.
//!
//! Each bet kind is a pure rule record over the current point, its own
//! wager, and sibling wagers. The state machine consults the catalog for
//! outcome checks, payout rates, and wager bounds; the catalog never
//! mutates anything.

use passline_types::{BetKind, BetOutcome};

use crate::state::GameState;

/// Exact payout rate expressed as a fraction of the wager.
///
/// Rates stay in integer numerator/denominator form so that
/// `floor(wager * rate)` is bit-exact over any number of rounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PayRate {
    pub num: u64,
    pub den: u64,
}

impl PayRate {
    /// Even money (1:1), the line-bet rate.
    pub const EVEN: PayRate = PayRate { num: 1, den: 1 };

    /// The rate of a bet that cannot currently win.
    pub const ZERO: PayRate = PayRate { num: 0, den: 1 };

    /// Winnings on a winning wager, floored to a whole unit. The wager
    /// itself is returned separately on a win.
    pub fn winnings(&self, wager: u64) -> u64 {
        wager.saturating_mul(self.num) / self.den
    }

    /// The same odds seen from the other side of the table.
    pub fn inverted(&self) -> PayRate {
        if self.num == 0 {
            return PayRate::ZERO;
        }
        PayRate {
            num: self.den,
            den: self.num,
        }
    }
}

/// True odds behind the Pass line, by point. Kept in the unreduced 6:n
/// form (ways to roll a 7 against ways to roll the point).
fn pass_odds_rate(point: u8) -> PayRate {
    match point {
        4 | 10 => PayRate { num: 6, den: 3 },
        5 | 9 => PayRate { num: 6, den: 4 },
        6 | 8 => PayRate { num: 6, den: 5 },
        _ => PayRate::ZERO,
    }
}

/// Largest odds wager per unit of line wager (the 3-4-5x rule).
fn odds_multiple(point: u8) -> u64 {
    match point {
        4 | 10 => 3,
        5 | 9 => 4,
        6 | 8 => 5,
        _ => 0,
    }
}

/// Evaluates `kind` against a roll total under the current point.
///
/// Odds kinds cannot exist during the come-out (no point to ride on), so a
/// come-out check on them reports Undecided.
pub fn check(kind: BetKind, point: Option<u8>, total: u8) -> BetOutcome {
    match (kind, point) {
        (BetKind::Pass, None) => match total {
            7 | 11 => BetOutcome::Win,
            2 | 3 | 12 => BetOutcome::Lose,
            _ => BetOutcome::Undecided,
        },
        (BetKind::Pass | BetKind::PassOdds, Some(point)) => {
            if total == point {
                BetOutcome::Win
            } else if total == 7 {
                BetOutcome::Lose
            } else {
                BetOutcome::Undecided
            }
        }
        (BetKind::DontPass, None) => match total {
            2 | 3 => BetOutcome::Win,
            7 | 11 => BetOutcome::Lose,
            // Bar 12: the don't side pushes instead of winning.
            12 => BetOutcome::Tie,
            _ => BetOutcome::Undecided,
        },
        (BetKind::DontPass | BetKind::DontPassOdds, Some(point)) => {
            if total == 7 {
                BetOutcome::Win
            } else if total == point {
                BetOutcome::Lose
            } else {
                BetOutcome::Undecided
            }
        }
        (BetKind::PassOdds | BetKind::DontPassOdds, None) => BetOutcome::Undecided,
    }
}

/// Payout rate for `kind` under the current point.
pub fn pay_rate(kind: BetKind, point: Option<u8>) -> PayRate {
    match kind {
        BetKind::Pass | BetKind::DontPass => PayRate::EVEN,
        BetKind::PassOdds => point.map_or(PayRate::ZERO, pass_odds_rate),
        BetKind::DontPassOdds => point.map_or(PayRate::ZERO, |p| pass_odds_rate(p).inverted()),
    }
}

pub(crate) fn ledger_wager(ledger: &[(BetKind, u64)], kind: BetKind) -> u64 {
    ledger
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, w)| *w)
        .unwrap_or(0)
}

/// Smallest wager `kind` may be changed to. Pass is a contract bet and can
/// never be decreased; everything else can go to zero.
pub(crate) fn min_wager(kind: BetKind, current: u64) -> u64 {
    match kind {
        BetKind::Pass => current,
        BetKind::DontPass | BetKind::PassOdds | BetKind::DontPassOdds => 0,
    }
}

/// Largest wager `kind` may be changed to, given the point and sibling
/// wagers. Zero means the kind cannot be added at all right now.
pub(crate) fn max_wager(kind: BetKind, point: Option<u8>, ledger: &[(BetKind, u64)]) -> u64 {
    let current = ledger_wager(ledger, kind);
    match kind {
        BetKind::Pass | BetKind::DontPass => {
            if current > 0 {
                // Line bets lock at their placed amount.
                current
            } else if point.is_none() {
                // Fresh line bet on the come-out, capped only by balance.
                u64::MAX
            } else {
                0
            }
        }
        BetKind::PassOdds => match point {
            Some(point) => {
                ledger_wager(ledger, BetKind::Pass).saturating_mul(odds_multiple(point))
            }
            None => 0,
        },
        BetKind::DontPassOdds => match point {
            // The lay-side cap: the amount whose win equals the pass side's
            // maximum odds win (6x the line wager at every point).
            Some(point) => {
                let base =
                    ledger_wager(ledger, BetKind::DontPass).saturating_mul(odds_multiple(point));
                pass_odds_rate(point).winnings(base)
            }
            None => 0,
        },
    }
}

/// Whether `kind` may be taken down once placed. Pass is a contract bet;
/// Don't Pass stays put only while odds ride on it (removing it first
/// would orphan them).
pub(crate) fn can_remove(kind: BetKind, ledger: &[(BetKind, u64)]) -> bool {
    match kind {
        BetKind::Pass => false,
        BetKind::DontPass => ledger_wager(ledger, BetKind::DontPassOdds) == 0,
        BetKind::PassOdds | BetKind::DontPassOdds => true,
    }
}

/// Live view of one bet kind against the current game state: its wager and
/// the bounds a change must satisfy right now.
#[derive(Clone, Copy)]
pub struct Bet<'a> {
    kind: BetKind,
    state: &'a GameState,
}

impl<'a> Bet<'a> {
    pub(crate) fn new(kind: BetKind, state: &'a GameState) -> Self {
        Self { kind, state }
    }

    pub fn kind(&self) -> BetKind {
        self.kind
    }

    /// Current wager, 0 when the kind is not on the table.
    pub fn wager(&self) -> u64 {
        self.state.wager(self.kind)
    }

    /// Outcome of this bet for a hypothetical roll total.
    pub fn check(&self, total: u8) -> BetOutcome {
        check(self.kind, self.state.point(), total)
    }

    pub fn pay_rate(&self) -> PayRate {
        pay_rate(self.kind, self.state.point())
    }

    /// Winnings this bet would pay on top of its wager if it won now.
    pub fn winnings(&self) -> u64 {
        self.pay_rate().winnings(self.wager())
    }

    pub fn min_wager(&self) -> u64 {
        min_wager(self.kind, self.wager())
    }

    pub fn max_wager(&self) -> u64 {
        max_wager(self.kind, self.state.point(), self.state.wagers())
    }

    pub fn can_remove(&self) -> bool {
        can_remove(self.kind, self.state.wagers())
    }
}
