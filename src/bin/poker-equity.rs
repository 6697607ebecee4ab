use clap::Parser;
use log::error;
use poker_equity::cards::parse_cards;
use poker_equity::deck::available_cards;
use poker_equity::{compute_equity_with, EquityRequest, SimulationConfig};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Debug, Parser)]
#[clap(version = poker_equity::VERSION, about = "Texas Hold'em equity calculator")]
struct Cli {
    /// Your two hole cards, e.g. "As Kd".
    #[clap(long, required_unless_present = "list_cards")]
    hand: Option<String>,
    /// Community cards dealt so far, up to five.
    #[clap(long, default_value = "")]
    board: String,
    /// Number of players including you.
    #[clap(long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(2..=10))]
    players: u8,
    /// Current pot size.
    #[clap(long, default_value_t = 0.0)]
    pot: f64,
    /// Amount you have to call.
    #[clap(long, default_value_t = 0.0)]
    call: f64,
    /// Number of simulated deals.
    #[clap(long, default_value_t = poker_equity::config::DEFAULT_TRIALS)]
    trials: usize,
    /// Seed for a reproducible run.
    #[clap(long)]
    seed: Option<u64>,
    /// Worker threads, defaults to the available parallelism.
    #[clap(long)]
    workers: Option<usize>,
    /// Chance that each opponent folds in a trial.
    #[clap(long, default_value_t = poker_equity::config::DEFAULT_FOLD_PROBABILITY)]
    fold_probability: f64,
    /// Stop after this many milliseconds and report the partial result.
    #[clap(long)]
    timeout_ms: Option<u64>,
    /// Print the cards still available after --hand and --board, then exit.
    #[clap(long)]
    list_cards: bool,
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let hand = cli.hand.as_deref().unwrap_or_default();

    if cli.list_cards {
        let mut known = parse_cards(hand)?;
        known.extend(parse_cards(&cli.board)?);
        for card in available_cards(&known) {
            println!("{card}  {}", card.name());
        }
        return Ok(());
    }

    let request = EquityRequest::parse(hand, &cli.board, cli.players as usize, cli.pot, cli.call)?;

    let mut config = SimulationConfig::default()
        .with_trials(cli.trials)
        .with_fold_probability(cli.fold_probability);
    if let Some(workers) = cli.workers {
        config = config.with_workers(workers);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(ms) = cli.timeout_ms {
        config = config.with_deadline(Duration::from_millis(ms));
    }

    let report = compute_equity_with(&request, &config)?;
    if report.cancelled {
        println!("Stopped early after {} trials.", report.trials_run);
    }
    println!("Your win equity: {:.2}%", report.win_equity * 100.0);
    println!("Your fold equity: {:.2}%", report.fold_equity * 100.0);
    println!("Expected value of call/bet: {:.2}", report.expected_value);
    Ok(())
}
