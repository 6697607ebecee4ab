//! Equity entry point: validate a request, run the simulation, price the call.

use crate::cards::{parse_cards, Card, CardParseError};
use crate::config::{ConfigError, SimulationConfig};
use crate::deck::DeckError;
use crate::ev::{compute_ev, pot_odds};
use crate::evaluator::EvalError;
use crate::hand::{Board, HandError, HoleCards};
use crate::simulator::{simulate, SimulationError};
use log::{debug, warn};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EquityError {
    #[error(transparent)]
    InvalidCard(#[from] CardParseError),
    #[error("invalid hand: {0}")]
    InvalidHand(HandError),
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),
    #[error("too many community cards: {0}")]
    TooManyBoardCards(usize),
    #[error("player count must be between 2 and 10, got {0}")]
    InvalidPlayerCount(usize),
    #[error("{name} must be a finite amount >= 0, got {value}")]
    InvalidAmount { name: &'static str, value: f64 },
    #[error("trial count must be at least 1")]
    InvalidTrials,
    #[error("invalid simulation config: {0}")]
    InvalidConfig(ConfigError),
    #[error("not enough cards remaining: need {required}, have {remaining}")]
    InsufficientDeck { required: usize, remaining: usize },
    #[error("deck is exhausted")]
    DeckExhausted,
    #[error("expected 5 to 7 cards, got {0}")]
    InvalidHandSize(usize),
    #[error("equity calculation cancelled")]
    Cancelled,
    #[error("simulation worker panicked")]
    WorkerPanicked,
}

impl From<HandError> for EquityError {
    fn from(e: HandError) -> Self {
        match e {
            HandError::DuplicateBoardCard(c) | HandError::Overlap(c) => {
                EquityError::DuplicateCard(c)
            }
            HandError::TooManyBoardCards(n) => EquityError::TooManyBoardCards(n),
            other => EquityError::InvalidHand(other),
        }
    }
}

impl From<DeckError> for EquityError {
    fn from(e: DeckError) -> Self {
        match e {
            DeckError::DuplicateCard(c) => EquityError::DuplicateCard(c),
            DeckError::Exhausted => EquityError::DeckExhausted,
        }
    }
}

impl From<EvalError> for EquityError {
    fn from(e: EvalError) -> Self {
        match e {
            EvalError::InvalidHand(h) => h.into(),
            EvalError::InvalidHandSize(n) => EquityError::InvalidHandSize(n),
            EvalError::DuplicateCard(c) => EquityError::DuplicateCard(c),
            EvalError::NotEnoughCards(n) => EquityError::InvalidHandSize(n),
        }
    }
}

impl From<ConfigError> for EquityError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::ZeroTrials => EquityError::InvalidTrials,
            other => EquityError::InvalidConfig(other),
        }
    }
}

impl From<SimulationError> for EquityError {
    fn from(e: SimulationError) -> Self {
        match e {
            SimulationError::Hand(h) => h.into(),
            SimulationError::Deck(d) => d.into(),
            SimulationError::Config(c) => c.into(),
            SimulationError::Eval(e) => e.into(),
            SimulationError::TooFewPlayers(n) => EquityError::InvalidPlayerCount(n),
            SimulationError::InsufficientDeck { required, remaining } => {
                EquityError::InsufficientDeck { required, remaining }
            }
            SimulationError::Cancelled => EquityError::Cancelled,
            SimulationError::WorkerPanicked => EquityError::WorkerPanicked,
        }
    }
}

/// Inputs of one equity calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityRequest {
    pub hand: Vec<Card>,
    pub community: Vec<Card>,
    pub num_players: usize,
    pub pot_size: f64,
    pub bet_to_call: f64,
}

impl EquityRequest {
    pub fn new(
        hand: &[Card],
        community: &[Card],
        num_players: usize,
        pot_size: f64,
        bet_to_call: f64,
    ) -> Self {
        Self {
            hand: hand.to_vec(),
            community: community.to_vec(),
            num_players,
            pot_size,
            bet_to_call,
        }
    }

    /// Build a request from card codes such as `"As Kd"`.
    ///
    /// ```
    /// use poker_equity::equity::EquityRequest;
    ///
    /// let req = EquityRequest::parse("As Kd", "2c 7h Td", 3, 60.0, 15.0).unwrap();
    /// assert_eq!(req.community.len(), 3);
    /// assert!(EquityRequest::parse("As K", "", 3, 60.0, 15.0).is_err());
    /// ```
    pub fn parse(
        hand: &str,
        community: &str,
        num_players: usize,
        pot_size: f64,
        bet_to_call: f64,
    ) -> Result<Self, EquityError> {
        Ok(Self {
            hand: parse_cards(hand)?,
            community: parse_cards(community)?,
            num_players,
            pot_size,
            bet_to_call,
        })
    }

    /// Check every input, in the order hand, community, players, amounts.
    pub fn validate(&self) -> Result<(HoleCards, Board), EquityError> {
        let hole = HoleCards::from_slice(&self.hand).map_err(EquityError::InvalidHand)?;
        if self.community.len() > 5 {
            return Err(EquityError::TooManyBoardCards(self.community.len()));
        }
        let mut seen = hole.mask();
        for &c in &self.community {
            if seen & c.mask() != 0 {
                return Err(EquityError::DuplicateCard(c));
            }
            seen |= c.mask();
        }
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.num_players) {
            return Err(EquityError::InvalidPlayerCount(self.num_players));
        }
        check_amount("pot size", self.pot_size)?;
        check_amount("bet to call", self.bet_to_call)?;
        Ok((hole, Board::new(self.community.clone())))
    }
}

fn check_amount(name: &'static str, value: f64) -> Result<(), EquityError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EquityError::InvalidAmount { name, value })
    }
}

/// Result of an equity calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquityReport {
    pub win_equity: f64,
    pub fold_equity: f64,
    pub expected_value: f64,
    pub pot_odds: f64,
    pub trials_run: u64,
    /// True when the run was cut short and the figures are partial.
    pub cancelled: bool,
}

/// Estimate win equity, fold equity and the EV of calling, over `trials`
/// random completions with default settings.
///
/// ```
/// use poker_equity::cards::parse_cards;
/// use poker_equity::compute_equity;
///
/// let hand = parse_cards("Ks Kh").unwrap();
/// let report = compute_equity(&hand, &[], 2, 100.0, 20.0, 5_000).unwrap();
/// assert!(report.win_equity > 0.75);
/// assert!(report.expected_value > 0.0);
/// ```
pub fn compute_equity(
    player_hand: &[Card],
    community_cards: &[Card],
    num_players: usize,
    pot_size: f64,
    bet_to_call: f64,
    trials: usize,
) -> Result<EquityReport, EquityError> {
    let request =
        EquityRequest::new(player_hand, community_cards, num_players, pot_size, bet_to_call);
    compute_equity_with(&request, &SimulationConfig::default().with_trials(trials))
}

/// [`compute_equity`] with an explicit [`SimulationConfig`].
pub fn compute_equity_with(
    request: &EquityRequest,
    config: &SimulationConfig,
) -> Result<EquityReport, EquityError> {
    let (hole, board) = request.validate()?;
    config.validate()?;

    let stats = simulate(&hole, &board, request.num_players, config)?;
    let win_equity = stats.win_equity();
    let fold_equity = stats.fold_equity();
    if win_equity + fold_equity > 1.0 {
        warn!(
            "win equity {win_equity:.4} plus fold equity {fold_equity:.4} exceeds 1, \
             the EV loss term turns into a gain"
        );
    }
    let expected_value = compute_ev(win_equity, fold_equity, request.pot_size, request.bet_to_call);
    debug!(
        "{} vs {} opponents over {} trials: win {win_equity:.4}, fold {fold_equity:.4}, \
         ev {expected_value:.2}",
        request.hand.iter().map(Card::to_string).collect::<Vec<_>>().join(" "),
        request.num_players - 1,
        stats.trials_run(),
    );

    Ok(EquityReport {
        win_equity,
        fold_equity,
        expected_value,
        pot_odds: pot_odds(request.pot_size, request.bet_to_call),
        trials_run: stats.trials_run(),
        cancelled: stats.cancelled,
    })
}
