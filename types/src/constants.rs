/// Point numbers a come-out roll can establish.
pub const POINT_NUMBERS: [u8; 6] = [4, 5, 6, 8, 9, 10];

/// Sides on a single die.
pub const DIE_SIDES: u8 = 6;

/// Default starting balance for a new player.
pub const STARTING_BALANCE: u64 = 1_000;

/// Current snapshot wire-format version.
pub const SNAPSHOT_VERSION: u8 = 1;

/// Upper bound on ledger entries in a snapshot (one per bet kind).
pub const MAX_LEDGER_ENTRIES: usize = 4;

/// Returns true if `total` can be established as a point.
pub fn is_point_number(total: u8) -> bool {
    POINT_NUMBERS.contains(&total)
}
