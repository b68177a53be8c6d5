use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, Read, ReadExt, Write};
use std::fmt;
use std::str::FromStr;

/// Kinds of bets a player can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BetKind {
    /// Line bet on the shooter winning.
    Pass = 0,
    /// Line bet on the shooter losing. A come-out 12 is barred (push).
    DontPass = 1,
    /// True-odds bet behind Pass, available once a point is set.
    PassOdds = 2,
    /// True-odds bet behind Don't Pass, available once a point is set.
    DontPassOdds = 3,
}

impl BetKind {
    /// All kinds, in ledger display order.
    pub const ALL: [BetKind; 4] = [
        BetKind::Pass,
        BetKind::DontPass,
        BetKind::PassOdds,
        BetKind::DontPassOdds,
    ];

    /// The line bet an odds bet rides on, or None for line bets themselves.
    pub fn parent(&self) -> Option<BetKind> {
        match self {
            BetKind::PassOdds => Some(BetKind::Pass),
            BetKind::DontPassOdds => Some(BetKind::DontPass),
            BetKind::Pass | BetKind::DontPass => None,
        }
    }

    /// True for Pass and Don't Pass.
    pub fn is_line(&self) -> bool {
        self.parent().is_none()
    }

    /// Stable string code, as used by front ends.
    pub fn code(&self) -> &'static str {
        match self {
            BetKind::Pass => "pass",
            BetKind::DontPass => "dont_pass",
            BetKind::PassOdds => "pass_odds",
            BetKind::DontPassOdds => "dont_pass_odds",
        }
    }
}

impl TryFrom<u8> for BetKind {
    type Error = ();

    fn try_from(v: u8) -> Result<Self, ()> {
        match v {
            0 => Ok(BetKind::Pass),
            1 => Ok(BetKind::DontPass),
            2 => Ok(BetKind::PassOdds),
            3 => Ok(BetKind::DontPassOdds),
            _ => Err(()),
        }
    }
}

impl FromStr for BetKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "pass" => Ok(BetKind::Pass),
            "dont_pass" => Ok(BetKind::DontPass),
            "pass_odds" => Ok(BetKind::PassOdds),
            "dont_pass_odds" => Ok(BetKind::DontPassOdds),
            _ => Err(()),
        }
    }
}

impl fmt::Display for BetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Write for BetKind {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for BetKind {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        BetKind::try_from(value).map_err(|_| Error::InvalidEnum(value))
    }
}

impl FixedSize for BetKind {
    const SIZE: usize = 1;
}

/// Outcome of checking one bet against a roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BetOutcome {
    /// The roll does not decide this bet; it stays on the table.
    Undecided,
    /// The bet wins; the wager returns along with winnings.
    Win,
    /// The bet loses; the wager is forfeit.
    Lose,
    /// Push: the wager returns without profit.
    Tie,
}

impl BetOutcome {
    /// True once the roll settles the bet one way or another.
    pub fn is_decided(&self) -> bool {
        *self != BetOutcome::Undecided
    }
}

/// Reason code for one entry of a wager-change batch.
///
/// A batch is all-or-nothing: the first failing change aborts it, entries
/// after the failure are marked [`BetFailReason::Unknown`], and the state
/// rolls back to its pre-call values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum BetFailReason {
    /// The change was applied (or would have been, absent a later failure).
    Success = 0,
    /// The change was never examined because an earlier one failed.
    Unknown = 1,
    /// Requested wager was negative.
    NegativeWager = 2,
    /// The bet-kind code does not name a known kind.
    InvalidType = 3,
    /// Applying the change would overdraw the balance.
    NotEnoughBalance = 4,
    /// This kind cannot be newly placed right now.
    CannotAddBet = 5,
    /// Requested wager exceeds the kind's current maximum.
    WagerAboveMax = 6,
    /// This kind cannot be taken down once placed.
    CannotRemoveBet = 7,
    /// Requested wager is below the kind's current minimum.
    WagerBelowMin = 8,
}

impl BetFailReason {
    pub fn is_success(&self) -> bool {
        *self == BetFailReason::Success
    }
}

/// One proposed wager change: replace the wager on `kind` with `wager`.
///
/// The kind is carried as a raw code and the wager as a signed amount so
/// unvalidated front-end input surfaces as per-change reason codes
/// ([`BetFailReason::InvalidType`], [`BetFailReason::NegativeWager`]) rather
/// than being unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WagerChange {
    /// Raw bet-kind code, validated during apply.
    pub kind: u8,
    /// Requested total wager for the kind; zero removes the bet.
    pub wager: i64,
}

impl WagerChange {
    /// A change on a known kind.
    pub fn new(kind: BetKind, wager: u64) -> Self {
        Self {
            kind: kind as u8,
            wager: wager as i64,
        }
    }

    /// A change from untrusted input; codes and amounts are checked when the
    /// batch is applied.
    pub fn raw(kind: u8, wager: i64) -> Self {
        Self { kind, wager }
    }
}
