//! Integration tests for the rules engine.
//!
//! These tests drive full games through the public operations only:
//! wager-change batches, dice resolution, snapshots, and reset.

#[cfg(test)]
mod tests {
    use crate::mocks::ScriptedDice;
    use crate::{FairDice, GameState};
    use commonware_codec::{Encode, Error, ReadExt};
    use passline_types::{BetFailReason, BetKind, BetOutcome, Snapshot, WagerChange};

    fn place(state: &mut GameState, kind: BetKind, wager: u64) {
        let reasons = state
            .apply_wager_changes(&[WagerChange::new(kind, wager)])
            .unwrap();
        assert!(reasons.iter().all(|r| r.is_success()), "{:?}", reasons);
    }

    /// Come-out 7 with Pass 10: win pays even money and ends the round.
    #[test]
    fn test_pass_natural_scenario() {
        let mut state = GameState::new(1_000);
        place(&mut state, BetKind::Pass, 10);

        let resolutions = state
            .resolve_roll(&mut ScriptedDice::totals(&[7]))
            .unwrap();
        assert_eq!(resolutions[0].outcome, BetOutcome::Win);
        assert_eq!(resolutions[0].credited, 20);
        assert_eq!(state.balance(), 1_010);
        assert!(state.is_finished());
    }

    /// Come-out 12 with Don't Pass 10: barred, wager comes back.
    #[test]
    fn test_dont_pass_push_scenario() {
        let mut state = GameState::new(1_000);
        place(&mut state, BetKind::DontPass, 10);

        let resolutions = state
            .resolve_roll(&mut ScriptedDice::new(&[6, 6]))
            .unwrap();
        assert_eq!(resolutions[0].outcome, BetOutcome::Tie);
        assert_eq!(resolutions[0].credited, 10);
        assert_eq!(state.balance(), 1_000);
        assert!(state.is_finished());
    }

    /// Point 5: Pass odds cap at 4x the line wager; an oversized request
    /// fails and a capped one sticks.
    #[test]
    fn test_pass_odds_cap_at_point_five() {
        let mut state = GameState::new(1_000);
        place(&mut state, BetKind::Pass, 10);
        state
            .resolve_roll(&mut ScriptedDice::totals(&[5]))
            .unwrap();
        assert_eq!(state.point(), Some(5));
        assert_eq!(state.wager(BetKind::Pass), 10);
        assert_eq!(state.bet(BetKind::PassOdds).max_wager(), 40);

        let reasons = state
            .apply_wager_changes(&[WagerChange::new(BetKind::PassOdds, 60)])
            .unwrap();
        assert_eq!(reasons, vec![BetFailReason::WagerAboveMax]);
        assert_eq!(state.wager(BetKind::PassOdds), 0);

        place(&mut state, BetKind::PassOdds, 40);
        assert_eq!(state.wager(BetKind::PassOdds), 40);
    }

    /// Point 6: the cap is 5x, so 60 fails and 50 succeeds.
    #[test]
    fn test_pass_odds_cap_at_point_six() {
        let mut state = GameState::new(1_000);
        place(&mut state, BetKind::Pass, 10);
        state
            .resolve_roll(&mut ScriptedDice::totals(&[6]))
            .unwrap();
        assert_eq!(state.bet(BetKind::PassOdds).max_wager(), 50);

        let reasons = state
            .apply_wager_changes(&[WagerChange::new(BetKind::PassOdds, 60)])
            .unwrap();
        assert_eq!(reasons, vec![BetFailReason::WagerAboveMax]);
        place(&mut state, BetKind::PassOdds, 50);
    }

    /// Pass odds of 30 on point 6 pay exactly 30 + 36 when the point hits.
    #[test]
    fn test_pass_odds_payout_exactness() {
        let mut state = GameState::new(1_000);
        place(&mut state, BetKind::Pass, 10);
        state
            .resolve_roll(&mut ScriptedDice::totals(&[6]))
            .unwrap();
        place(&mut state, BetKind::PassOdds, 30);
        assert_eq!(state.balance(), 960);

        let resolutions = state
            .resolve_roll(&mut ScriptedDice::totals(&[6]))
            .unwrap();
        let odds = resolutions
            .iter()
            .find(|r| r.kind == BetKind::PassOdds)
            .unwrap();
        assert_eq!(odds.outcome, BetOutcome::Win);
        assert_eq!(odds.credited, 66);
        // Pass pays 20 on top.
        assert_eq!(state.balance(), 960 + 20 + 66);
        assert!(state.is_finished());
    }

    /// A full point cycle for the don't side: establish 4, lay odds, seven
    /// out, collect both bets.
    #[test]
    fn test_dont_side_seven_out() {
        let mut state = GameState::new(1_000);
        place(&mut state, BetKind::DontPass, 10);
        state
            .resolve_roll(&mut ScriptedDice::totals(&[4]))
            .unwrap();
        assert_eq!(state.bet(BetKind::DontPassOdds).max_wager(), 60);
        place(&mut state, BetKind::DontPassOdds, 60);

        let resolutions = state
            .resolve_roll(&mut ScriptedDice::totals(&[7]))
            .unwrap();
        let line = resolutions
            .iter()
            .find(|r| r.kind == BetKind::DontPass)
            .unwrap();
        let odds = resolutions
            .iter()
            .find(|r| r.kind == BetKind::DontPassOdds)
            .unwrap();
        assert_eq!(line.credited, 20);
        // 60 laid at 1:2 wins 30.
        assert_eq!(odds.credited, 90);
        assert_eq!(state.balance(), 1_000 - 10 - 60 + 20 + 90);
        assert!(state.is_finished());
    }

    /// Atomicity: a failing batch leaves balance and ledger bit-identical.
    #[test]
    fn test_failed_batch_is_invisible() {
        let mut state = GameState::new(1_000);
        place(&mut state, BetKind::Pass, 10);
        place(&mut state, BetKind::DontPass, 20);
        state
            .resolve_roll(&mut ScriptedDice::totals(&[8]))
            .unwrap();

        let before = state.snapshot();
        let reasons = state
            .apply_wager_changes(&[
                WagerChange::new(BetKind::PassOdds, 50),
                WagerChange::new(BetKind::DontPassOdds, 30),
                WagerChange::new(BetKind::Pass, 0),
                WagerChange::new(BetKind::DontPass, 0),
            ])
            .unwrap();
        assert_eq!(
            reasons,
            vec![
                BetFailReason::Success,
                BetFailReason::Success,
                BetFailReason::CannotRemoveBet,
                BetFailReason::Unknown,
            ]
        );
        assert_eq!(state.snapshot(), before);
    }

    /// Odds bets never appear without their parent: removing the Don't Pass
    /// line bet while odds ride on it has to fail.
    #[test]
    fn test_odds_keep_their_parent_alive() {
        let mut state = GameState::new(1_000);
        place(&mut state, BetKind::DontPass, 10);
        state
            .resolve_roll(&mut ScriptedDice::totals(&[9]))
            .unwrap();
        place(&mut state, BetKind::DontPassOdds, 40);

        // Taking down the line first would orphan the odds.
        let reasons = state
            .apply_wager_changes(&[
                WagerChange::new(BetKind::DontPass, 0),
                WagerChange::new(BetKind::DontPassOdds, 0),
            ])
            .unwrap();
        assert_eq!(
            reasons,
            vec![BetFailReason::CannotRemoveBet, BetFailReason::Unknown]
        );
        assert_eq!(state.wager(BetKind::DontPass), 10);
        assert_eq!(state.wager(BetKind::DontPassOdds), 40);

        // Odds first, then the line.
        let reasons = state
            .apply_wager_changes(&[
                WagerChange::new(BetKind::DontPassOdds, 0),
                WagerChange::new(BetKind::DontPass, 0),
            ])
            .unwrap();
        assert!(reasons.iter().all(|r| r.is_success()));
        assert!(state.wagers().is_empty());
        assert_eq!(state.balance(), 1_000);
    }

    /// Snapshots round-trip through the binary codec at every stage of a
    /// game.
    #[test]
    fn test_snapshot_roundtrip_through_codec() {
        let mut state = GameState::new(1_000);
        let mut stages = vec![state.snapshot()];

        place(&mut state, BetKind::Pass, 10);
        stages.push(state.snapshot());
        state
            .resolve_roll(&mut ScriptedDice::totals(&[10]))
            .unwrap();
        place(&mut state, BetKind::PassOdds, 30);
        stages.push(state.snapshot());
        state
            .resolve_roll(&mut ScriptedDice::totals(&[7]))
            .unwrap();
        stages.push(state.snapshot());

        for snapshot in stages {
            let encoded = snapshot.encode();
            let decoded = Snapshot::read(&mut &encoded[..]).unwrap();
            assert_eq!(decoded, snapshot);
            assert_eq!(GameState::restore(&decoded).unwrap().snapshot(), snapshot);
        }
    }

    #[test]
    fn test_snapshot_version_gate() {
        let state = GameState::new(500);
        let mut encoded = state.snapshot().encode().to_vec();
        encoded[0] = 9;
        let err = Snapshot::read(&mut &encoded[..]).unwrap_err();
        assert!(matches!(err, Error::Invalid("Snapshot", "unsupported version")));
    }

    /// Money is conserved across a long seeded session: the balance moves
    /// only by what placements stake and resolutions credit.
    #[test]
    fn test_seeded_session_conserves_money() {
        let mut state = GameState::new(1_000);
        let mut dice = FairDice::seeded(1234);

        let mut placed: u64 = 0;
        let mut credited: u64 = 0;
        for _ in 0..200 {
            if state.is_finished() {
                state.reset();
            }
            if state.point().is_none() && state.wager(BetKind::Pass) == 0 {
                if state.balance() < 10 {
                    break;
                }
                place(&mut state, BetKind::Pass, 10);
                placed += 10;
            }
            let resolutions = state.resolve_roll(&mut dice).unwrap();
            for r in &resolutions {
                if r.outcome.is_decided() {
                    credited += r.credited;
                }
            }
            assert_eq!(
                state.balance() as i128,
                1_000 - placed as i128 + credited as i128
            );
        }
    }
}
