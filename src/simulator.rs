//! Monte Carlo showdown simulation.
//!
//! Every trial deals two cards to each opponent from a fresh copy of the
//! deck, completes the board, and compares seven-card hands. Trials are split
//! across scoped worker threads; each worker owns its RNG stream, deck copy
//! and [`Tally`], and the tallies are merged once all workers finish.

use crate::cards::Card;
use crate::config::{ConfigError, SimulationConfig};
use crate::deck::{Deck, DeckError};
use crate::evaluator::{evaluate, evaluate_mask, EvalError, HandValue};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use log::{debug, info, trace};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SimulationError {
    #[error(transparent)]
    Hand(#[from] HandError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("need at least 2 players, got {0}")]
    TooFewPlayers(usize),
    #[error("not enough cards remaining: need {required}, have {remaining}")]
    InsufficientDeck { required: usize, remaining: usize },
    #[error("simulation cancelled before any trial completed")]
    Cancelled,
    #[error("simulation worker panicked")]
    WorkerPanicked,
}

/// Running counts for a batch of trials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub trials: u64,
    pub wins: u64,
    pub folds: u64,
    pub opponent_slots: u64,
}

impl Tally {
    pub fn record(&mut self, outcome: &TrialOutcome) {
        self.trials += 1;
        if outcome.player_wins() {
            self.wins += 1;
        }
        self.folds += outcome.folds() as u64;
        self.opponent_slots += outcome.opponents.len() as u64;
    }

    pub fn merge(self, other: Tally) -> Tally {
        Tally {
            trials: self.trials + other.trials,
            wins: self.wins + other.wins,
            folds: self.folds + other.folds,
            opponent_slots: self.opponent_slots + other.opponent_slots,
        }
    }

    pub fn losses(&self) -> u64 {
        self.trials - self.wins
    }

    /// Share of trials won, 0 when no trial ran.
    pub fn win_equity(&self) -> f64 {
        ratio(self.wins, self.trials)
    }

    /// Share of opponent slots that folded, 0 when none were observed.
    pub fn fold_equity(&self) -> f64 {
        ratio(self.folds, self.opponent_slots)
    }
}

fn ratio(n: u64, d: u64) -> f64 {
    if d == 0 {
        0.0
    } else {
        n as f64 / d as f64
    }
}

/// Result of one trial. Buffers are reused across trials by a worker.
#[derive(Debug, Clone, Default)]
pub struct TrialOutcome {
    pub player: HandValue,
    pub opponents: Vec<HandValue>,
    pub folded: Vec<bool>,
    holes: Vec<u64>,
}

impl TrialOutcome {
    /// Ties count as wins: the player wins unless some opponent is strictly
    /// better.
    pub fn player_wins(&self) -> bool {
        self.opponents.iter().all(|o| self.player >= *o)
    }

    pub fn folds(&self) -> usize {
        self.folded.iter().filter(|f| **f).count()
    }

    fn clear(&mut self) {
        self.player = HandValue::default();
        self.opponents.clear();
        self.folded.clear();
        self.holes.clear();
    }
}

/// Aggregated result of [`simulate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationStats {
    pub tally: Tally,
    pub requested: u64,
    /// Set when cancellation or the deadline stopped the run early.
    pub cancelled: bool,
}

impl SimulationStats {
    pub fn win_equity(&self) -> f64 {
        self.tally.win_equity()
    }

    pub fn fold_equity(&self) -> f64 {
        self.tally.fold_equity()
    }

    pub fn trials_run(&self) -> u64 {
        self.tally.trials
    }
}

/// A validated simulation setup: the player's hand, the known board and the
/// deck of cards still unseen.
#[derive(Debug, Clone)]
pub struct Simulation {
    hole: HoleCards,
    board_mask: u64,
    missing: usize,
    opponents: usize,
    fold_probability: f64,
    base: Deck,
    /// Player's value when the board is already complete.
    river: Option<HandValue>,
}

impl Simulation {
    pub fn new(
        hole: HoleCards,
        board: &Board,
        num_players: usize,
        fold_probability: f64,
    ) -> Result<Self, SimulationError> {
        validate_holdem(&hole, board)?;
        if num_players < 2 {
            return Err(SimulationError::TooFewPlayers(num_players));
        }
        if !(0.0..=1.0).contains(&fold_probability) {
            return Err(ConfigError::FoldProbability(fold_probability).into());
        }

        let known: Vec<Card> =
            hole.as_array().into_iter().chain(board.as_slice().iter().copied()).collect();
        let base = Deck::without(&known)?;
        let river = if board.missing() == 0 { Some(evaluate(&known)?) } else { None };
        let sim = Self {
            hole,
            board_mask: board.as_slice().iter().fold(0, |m, c| m | c.mask()),
            missing: board.missing(),
            opponents: num_players - 1,
            fold_probability,
            base,
            river,
        };

        let required = sim.required_cards();
        if sim.base.len() < required {
            return Err(SimulationError::InsufficientDeck { required, remaining: sim.base.len() });
        }
        Ok(sim)
    }

    /// Cards each trial draws: two per opponent plus the rest of the board.
    pub fn required_cards(&self) -> usize {
        self.opponents * 2 + self.missing
    }

    pub fn remaining_cards(&self) -> usize {
        self.base.len()
    }

    /// Play one trial into `out`.
    pub fn run_trial<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        out: &mut TrialOutcome,
    ) -> Result<(), SimulationError> {
        out.clear();
        let mut deck = self.base.clone();

        for _ in 0..self.opponents {
            let hole = deck.draw_random(rng)?.mask() | deck.draw_random(rng)?.mask();
            out.holes.push(hole);
        }
        let mut board = self.board_mask;
        for _ in 0..self.missing {
            board |= deck.draw_random(rng)?.mask();
        }

        out.player = match self.river {
            Some(value) => value,
            None => evaluate_mask(board | self.hole.mask()),
        };
        for &hole in &out.holes {
            out.opponents.push(evaluate_mask(board | hole));
            out.folded.push(rng.random_bool(self.fold_probability));
        }
        Ok(())
    }

    fn run_worker(
        &self,
        worker: usize,
        seed: u64,
        trials: u64,
        config: &SimulationConfig,
        started: Instant,
        abort: &AtomicBool,
    ) -> Result<(Tally, bool), SimulationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(worker as u64);

        let mut tally = Tally::default();
        let mut outcome = TrialOutcome::default();
        let mut stopped = false;
        for _ in 0..trials {
            if abort.load(Ordering::Relaxed) || should_stop(config, started, tally.trials) {
                stopped = true;
                break;
            }
            if let Err(e) = self.run_trial(&mut rng, &mut outcome) {
                abort.store(true, Ordering::Relaxed);
                return Err(e);
            }
            tally.record(&outcome);
        }
        trace!("worker {worker} finished {} of {trials} trials", tally.trials);
        Ok((tally, stopped))
    }
}

/// The cancel token is honoured before any trial; the deadline only once
/// this worker has finished at least one.
fn should_stop(config: &SimulationConfig, started: Instant, done: u64) -> bool {
    config.cancel.as_ref().is_some_and(|c| c.is_cancelled())
        || (done > 0 && config.deadline.is_some_and(|d| started.elapsed() >= d))
}

/// Run `config.trials` trials and aggregate wins and fold signals.
///
/// All validation happens before the first trial. A run stopped by the
/// cancel token or deadline returns the partial statistics with
/// `cancelled` set, or [`SimulationError::Cancelled`] if nothing ran.
///
/// ```
/// use poker_equity::config::SimulationConfig;
/// use poker_equity::hand::{Board, HoleCards};
/// use poker_equity::simulator::simulate;
///
/// let hole: HoleCards = "As Ah".parse().unwrap();
/// let config = SimulationConfig::default().with_trials(2_000).with_seed(1);
/// let stats = simulate(&hole, &Board::default(), 2, &config).unwrap();
/// assert_eq!(stats.trials_run(), 2_000);
/// assert!(stats.win_equity() > 0.7);
/// ```
pub fn simulate(
    hole: &HoleCards,
    board: &Board,
    num_players: usize,
    config: &SimulationConfig,
) -> Result<SimulationStats, SimulationError> {
    config.validate()?;
    let sim = Simulation::new(*hole, board, num_players, config.fold_probability)?;

    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let trials = config.trials as u64;
    let workers = config.workers.min(config.trials).max(1);
    debug!(
        "simulating {trials} trials on {workers} workers: {} players, {} cards left, seed {seed}",
        num_players,
        sim.remaining_cards()
    );

    let started = Instant::now();
    let abort = AtomicBool::new(false);
    let per_worker = trials / workers as u64;
    let extra = trials % workers as u64;

    let results: Vec<Result<(Tally, bool), SimulationError>> = thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .map(|w| {
                let share = per_worker + u64::from((w as u64) < extra);
                let (sim, abort) = (&sim, &abort);
                s.spawn(move || sim.run_worker(w, seed, share, config, started, abort))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or(Err(SimulationError::WorkerPanicked)))
            .collect()
    });

    let mut tally = Tally::default();
    let mut cancelled = false;
    for result in results {
        let (t, stopped) = result?;
        tally = tally.merge(t);
        cancelled |= stopped;
    }

    if cancelled {
        info!("simulation stopped early after {} of {trials} trials", tally.trials);
        if tally.trials == 0 {
            return Err(SimulationError::Cancelled);
        }
    }
    Ok(SimulationStats { tally, requested: trials, cancelled })
}
