//! Headless Monte-Carlo driver for the passline engine.
//!
//! Plays many games to completion with a fixed policy: a line bet on every
//! come-out, odds at the table cap once a point is established. One
//! decision is made before each roll, never more. Useful for eyeballing
//! house-edge figures and as an end-to-end smoke test of the engine.

use anyhow::{ensure, Context, Result};
use passline_engine::{FairDice, GameState};
use passline_types::{BetKind, WagerChange};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Simulation parameters.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Number of games to play to completion.
    pub games: u64,
    /// Bankroll at the start of the run.
    pub starting_balance: u64,
    /// Flat line wager per game.
    pub line_wager: u64,
    /// Lay odds at the cap once a point is established.
    pub take_odds: bool,
    /// Bet Don't Pass instead of Pass on a coin flip.
    pub mix_sides: bool,
    /// Seed for dice and policy decisions.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            games: 1_000,
            starting_balance: passline_types::STARTING_BALANCE,
            line_wager: 10,
            take_odds: true,
            mix_sides: false,
            seed: 0,
        }
    }
}

/// Aggregate results of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub games: u64,
    pub rolls: u64,
    pub wins: u64,
    pub losses: u64,
    pub pushes: u64,
    pub final_balance: u64,
    /// True when the bankroll could no longer cover a line wager.
    pub busted: bool,
}

/// Runs games until the configured count or the bankroll runs dry.
pub struct Simulator {
    config: Config,
    dice: FairDice,
    policy: StdRng,
    state: GameState,
}

impl Simulator {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            dice: FairDice::seeded(config.seed),
            policy: StdRng::seed_from_u64(config.seed.wrapping_add(1)),
            state: GameState::new(config.starting_balance),
        }
    }

    pub fn run(&mut self) -> Result<Totals> {
        let mut totals = Totals::default();

        for game in 0..self.config.games {
            if self.state.balance() < self.config.line_wager {
                totals.busted = true;
                break;
            }

            let opening = self.state.balance();
            self.play_one_game()
                .with_context(|| format!("game {game} aborted"))?;
            let closing = self.state.balance();

            totals.games += 1;
            totals.rolls += u64::from(self.state.round());
            if closing > opening {
                totals.wins += 1;
            } else if closing < opening {
                totals.losses += 1;
            } else {
                totals.pushes += 1;
            }
            debug!(game, opening, closing, rolls = self.state.round(), "game finished");

            self.state.reset();
        }

        totals.final_balance = self.state.balance();
        info!(
            games = totals.games,
            rolls = totals.rolls,
            wins = totals.wins,
            losses = totals.losses,
            pushes = totals.pushes,
            final_balance = totals.final_balance,
            busted = totals.busted,
            "simulation complete"
        );
        Ok(totals)
    }

    /// One game: line bet, roll, odds at the cap once on the point, then
    /// roll until the round resolves.
    fn play_one_game(&mut self) -> Result<()> {
        let side = if self.config.mix_sides && self.policy.gen_bool(0.5) {
            BetKind::DontPass
        } else {
            BetKind::Pass
        };

        let reasons = self
            .state
            .apply_wager_changes(&[WagerChange::new(side, self.config.line_wager)])
            .context("line bet rejected")?;
        ensure!(
            reasons.iter().all(|r| r.is_success()),
            "line bet refused: {reasons:?}"
        );

        while !self.state.is_finished() {
            self.take_odds_if_open(side)?;
            self.state
                .resolve_roll(&mut self.dice)
                .context("roll failed mid-game")?;
        }
        Ok(())
    }

    fn take_odds_if_open(&mut self, side: BetKind) -> Result<()> {
        if !self.config.take_odds || self.state.point().is_none() {
            return Ok(());
        }
        let odds = match side {
            BetKind::Pass => BetKind::PassOdds,
            _ => BetKind::DontPassOdds,
        };
        if self.state.wager(odds) > 0 {
            return Ok(());
        }
        let cap = self.state.bet(odds).max_wager().min(self.state.balance());
        if cap == 0 {
            return Ok(());
        }
        let reasons = self
            .state
            .apply_wager_changes(&[WagerChange::new(odds, cap)])
            .context("odds wager rejected")?;
        ensure!(
            reasons.iter().all(|r| r.is_success()),
            "odds wager refused: {reasons:?}"
        );
        Ok(())
    }
}
