use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};

use crate::{is_point_number, BetKind, DIE_SIDES, MAX_LEDGER_ENTRIES, SNAPSHOT_VERSION};

/// Versioned snapshot of a game in progress.
///
/// Wire format:
/// [version:u8=1]
/// [balance:u64]
/// [has_roll:bool] [d1:u8] [d2:u8] (dice present only when has_roll)
/// [point:Option<u8>]
/// [round:u32]
/// [finished:bool]
/// [wager_count:u8] [kind:u8, amount:u64]*count (ledger order preserved)
///
/// Reading rejects any other version with a distinct unsupported-format
/// error instead of attempting a best-effort parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub balance: u64,
    pub last_roll: Option<(u8, u8)>,
    pub point: Option<u8>,
    pub round: u32,
    pub finished: bool,
    pub wagers: Vec<(BetKind, u64)>,
}

impl Snapshot {
    /// Checks the record's internal consistency.
    ///
    /// Enforced here (and therefore on every decode): dice in range, point
    /// in the point-number domain, wagers strictly positive with no
    /// duplicate kinds, odds bets only alongside their parent line bet while
    /// a point is set, and an empty ledger once finished.
    pub fn validate(&self) -> Result<(), Error> {
        if let Some((d1, d2)) = self.last_roll {
            if !(1..=DIE_SIDES).contains(&d1) || !(1..=DIE_SIDES).contains(&d2) {
                return Err(Error::Invalid("Snapshot", "die value out of range"));
            }
        }
        if let Some(point) = self.point {
            if !is_point_number(point) {
                return Err(Error::Invalid("Snapshot", "invalid point number"));
            }
        }
        if self.wagers.len() > MAX_LEDGER_ENTRIES {
            return Err(Error::Invalid("Snapshot", "too many wagers"));
        }
        if self.finished && !self.wagers.is_empty() {
            return Err(Error::Invalid("Snapshot", "wagers remain after finish"));
        }
        for (idx, (kind, amount)) in self.wagers.iter().enumerate() {
            if *amount == 0 {
                return Err(Error::Invalid("Snapshot", "zero wager in ledger"));
            }
            if self.wagers[..idx].iter().any(|(k, _)| k == kind) {
                return Err(Error::Invalid("Snapshot", "duplicate bet kind"));
            }
            if let Some(parent) = kind.parent() {
                let covered = self.wagers.iter().any(|(k, w)| *k == parent && *w > 0);
                if self.point.is_none() || !covered {
                    return Err(Error::Invalid("Snapshot", "odds bet without parent line bet"));
                }
            }
        }
        Ok(())
    }

    /// The wager on `kind`, or 0 when absent from the ledger.
    pub fn wager(&self, kind: BetKind) -> u64 {
        self.wagers
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, w)| *w)
            .unwrap_or(0)
    }
}

impl Write for Snapshot {
    fn write(&self, writer: &mut impl BufMut) {
        SNAPSHOT_VERSION.write(writer);
        self.balance.write(writer);
        match self.last_roll {
            Some((d1, d2)) => {
                true.write(writer);
                d1.write(writer);
                d2.write(writer);
            }
            None => false.write(writer),
        }
        self.point.write(writer);
        self.round.write(writer);
        self.finished.write(writer);
        (self.wagers.len() as u8).write(writer);
        for (kind, amount) in &self.wagers {
            kind.write(writer);
            amount.write(writer);
        }
    }
}

impl Read for Snapshot {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let version = u8::read(reader)?;
        if version != SNAPSHOT_VERSION {
            return Err(Error::Invalid("Snapshot", "unsupported version"));
        }

        let balance = u64::read(reader)?;
        let last_roll = if bool::read(reader)? {
            Some((u8::read(reader)?, u8::read(reader)?))
        } else {
            None
        };
        let point = Option::<u8>::read(reader)?;
        let round = u32::read(reader)?;
        let finished = bool::read(reader)?;

        let count = u8::read(reader)? as usize;
        if count > MAX_LEDGER_ENTRIES {
            return Err(Error::Invalid("Snapshot", "too many wagers"));
        }
        let mut wagers = Vec::with_capacity(count);
        for _ in 0..count {
            let kind = BetKind::read(reader)?;
            let amount = u64::read(reader)?;
            wagers.push((kind, amount));
        }

        let snapshot = Self {
            balance,
            last_roll,
            point,
            round,
            finished,
            wagers,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }
}

impl EncodeSize for Snapshot {
    fn encode_size(&self) -> usize {
        SNAPSHOT_VERSION.encode_size()
            + self.balance.encode_size()
            + match self.last_roll {
                Some((d1, d2)) => true.encode_size() + d1.encode_size() + d2.encode_size(),
                None => false.encode_size(),
            }
            + self.point.encode_size()
            + self.round.encode_size()
            + self.finished.encode_size()
            + 1
            + self
                .wagers
                .iter()
                .map(|(kind, amount)| kind.encode_size() + amount.encode_size())
                .sum::<usize>()
    }
}
