use anyhow::Result;
use clap::Parser;
use passline_simulator::{Config, Simulator};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of games to play.
    #[arg(short, long, default_value_t = 1_000)]
    games: u64,

    /// Starting bankroll.
    #[arg(short, long, default_value_t = passline_types::STARTING_BALANCE)]
    balance: u64,

    /// Flat line wager per game.
    #[arg(short, long, default_value_t = 10)]
    wager: u64,

    /// Skip odds bets and play the line only.
    #[arg(long)]
    no_odds: bool,

    /// Flip a coin between Pass and Don't Pass each game.
    #[arg(long)]
    mix_sides: bool,

    /// Seed for dice and policy decisions.
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<()> {
    // Parse args
    let args = Args::parse();

    // Create logger
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut simulator = Simulator::new(Config {
        games: args.games,
        starting_balance: args.balance,
        line_wager: args.wager,
        take_odds: !args.no_odds,
        mix_sides: args.mix_sides,
        seed: args.seed,
    });
    let totals = simulator.run()?;

    info!(
        net = totals.final_balance as i64 - args.balance as i64,
        "run finished"
    );
    Ok(())
}
