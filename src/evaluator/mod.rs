//! Hand ranking for 5, 6 and 7 card hands.
//!
//! Two evaluation paths produce the same [`HandValue`]:
//!
//! - [`evaluate`] / [`evaluate_mask`] work on a 52-bit card mask and derive
//!   the category and tiebreakers with bit operations. This is the path the
//!   equity simulator calls millions of times.
//! - [`evaluate_five`] / [`evaluate_best`] analyse concrete five-card hands
//!   and keep the best five cards around for display.

pub(crate) mod analysis;
pub(crate) mod combinations;
pub(crate) mod detector;
pub(crate) mod mask;

use crate::cards::{Card, Rank};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use core::cmp::Ordering;
use std::fmt;

pub use mask::evaluate_mask;

/// Compact, comparable hand strength. Higher is better.
/// Encodes category and ranked tiebreakers. The default value is below every
/// real hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u64);

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::HighCard,
        Category::Pair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn from_ordinal(v: u8) -> Option<Category> {
        if (v as usize) < Self::ALL.len() {
            Some(Self::ALL[v as usize])
        } else {
            None
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const CAT_SHIFT: u32 = 48;
const RANK_STRIDE: u32 = 6;

impl HandValue {
    /// Return the packed comparable value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Pack a category and up to five tiebreak ranks, most significant first.
    ///
    /// Layout (most significant -> least):
    /// `[ category (8) | r0 (6) | r1 (6) | r2 (6) | r3 (6) | r4 (6) | 10 zero bits ]`.
    /// Unused rank slots stay zero, below any real rank.
    pub fn from_ranks(category: Category, ranks: &[Rank]) -> Self {
        debug_assert!(ranks.len() <= 5);
        let mut v: u64 = (category as u64) << CAT_SHIFT;
        for (i, r) in ranks.iter().take(5).enumerate() {
            let offset = CAT_SHIFT - RANK_STRIDE * (i as u32 + 1);
            v |= (r.value() as u64) << offset;
        }
        HandValue(v)
    }

    pub fn category(self) -> Category {
        // Only `from_ranks` builds values, so the ordinal is always in range.
        Category::from_ordinal((self.0 >> CAT_SHIFT) as u8).unwrap_or(Category::HighCard)
    }

    /// Tiebreak ranks within the category, most significant first.
    pub fn tiebreak(self) -> Vec<Rank> {
        (0..5)
            .map(|i| ((self.0 >> (CAT_SHIFT - RANK_STRIDE * (i + 1))) & 0x3f) as u8)
            .take_while(|&v| v != 0)
            .filter_map(|v| v.checked_sub(2).and_then(Rank::from_index))
            .collect()
    }
}

/// Detailed evaluation result. `value` drives ordering.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct Evaluation {
    pub category: Category,
    pub best_five: [Card; 5],
    value: HandValue,
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Evaluation {}

impl Evaluation {
    /// Return the packed comparable value for ordering/caching.
    pub const fn value(&self) -> HandValue {
        self.value
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("expected 5 to 7 cards, got {0}")]
    InvalidHandSize(usize),
    #[error("duplicate card in hand: {0}")]
    DuplicateCard(Card),
    #[error("not enough cards to evaluate: {0}")]
    NotEnoughCards(usize),
}

/// Collect 5..=7 distinct cards into a mask.
fn hand_mask(cards: &[Card]) -> Result<u64, EvalError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(EvalError::InvalidHandSize(cards.len()));
    }
    let mut mask = 0u64;
    for &c in cards {
        if mask & c.mask() != 0 {
            return Err(EvalError::DuplicateCard(c));
        }
        mask |= c.mask();
    }
    Ok(mask)
}

/// Value of the best five-card hand among 5 to 7 distinct cards.
///
/// ```
/// use poker_equity::cards::parse_cards;
/// use poker_equity::evaluator::{evaluate, Category};
///
/// let wheel = evaluate(&parse_cards("Ah 2c 3d 4s 5h Kc Kd").unwrap()).unwrap();
/// assert_eq!(wheel.category(), Category::Straight);
///
/// let six = evaluate(&parse_cards("2c 3d 4s 5h 6c Ad").unwrap()).unwrap();
/// assert!(six > wheel);
/// ```
pub fn evaluate(cards: &[Card]) -> Result<HandValue, EvalError> {
    hand_mask(cards).map(evaluate_mask)
}

/// Evaluate exactly five cards; detects category and encodes tie-breakers.
pub fn evaluate_five(cards: &[Card; 5]) -> Evaluation {
    use analysis::HandAnalysis;
    use detector::DETECTORS;

    let analysis = HandAnalysis::new(cards);
    for detector in DETECTORS.iter() {
        if let Some(eval) = detector.evaluate(&analysis) {
            return eval;
        }
    }
    unreachable!("high card detector matches every hand")
}

/// Best five-card [`Evaluation`] among 5 to 7 distinct cards, by trying every
/// five-card subset.
pub fn evaluate_best(cards: &[Card]) -> Result<Evaluation, EvalError> {
    use combinations::FiveOf;

    hand_mask(cards)?;
    let mut best: Option<Evaluation> = None;
    for idx in FiveOf::new(cards.len()) {
        let hand = [cards[idx[0]], cards[idx[1]], cards[idx[2]], cards[idx[3]], cards[idx[4]]];
        let eval = evaluate_five(&hand);
        if best.as_ref().map_or(true, |b| eval > *b) {
            best = Some(eval);
        }
    }
    best.ok_or(EvalError::InvalidHandSize(cards.len()))
}

/// Evaluate seven cards through subset enumeration.
pub fn evaluate_seven(cards: &[Card; 7]) -> Evaluation {
    use combinations::FiveOf;

    let mut best = evaluate_five(&[cards[0], cards[1], cards[2], cards[3], cards[4]]);
    for idx in FiveOf::new(7).skip(1) {
        let hand = [cards[idx[0]], cards[idx[1]], cards[idx[2]], cards[idx[3]], cards[idx[4]]];
        let eval = evaluate_five(&hand);
        if eval > best {
            best = eval;
        }
    }
    best
}

/// Evaluate a Hold'em hand given hole cards and a complete board.
///
/// ```
/// use poker_equity::evaluator::{evaluate_holdem, Category};
/// use poker_equity::hand::{Board, HoleCards};
///
/// let hole: HoleCards = "As Ah".parse().unwrap();
/// let board: Board = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let eval = evaluate_holdem(&hole, &board).unwrap();
/// assert_eq!(eval.category, Category::Pair);
/// ```
pub fn evaluate_holdem(hole: &HoleCards, board: &Board) -> Result<Evaluation, EvalError> {
    validate_holdem(hole, board)?;
    let b = board.as_slice();
    if b.len() < 5 {
        return Err(EvalError::NotEnoughCards(2 + b.len()));
    }
    Ok(evaluate_seven(&[hole.first(), hole.second(), b[0], b[1], b[2], b[3], b[4]]))
}

/// Compare two Hold'em hands on a shared board.
///
/// ```
/// use poker_equity::evaluator::compare_holdem;
/// use poker_equity::hand::{Board, HoleCards};
/// use std::cmp::Ordering;
///
/// let board: Board = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let a: HoleCards = "As Ah".parse().unwrap();
/// let b: HoleCards = "Ks Kh".parse().unwrap();
/// assert_eq!(compare_holdem(&a, &b, &board).unwrap(), Ordering::Greater);
/// ```
pub fn compare_holdem(a: &HoleCards, b: &HoleCards, board: &Board) -> Result<Ordering, EvalError> {
    let va = evaluate_holdem(a, board)?;
    let vb = evaluate_holdem(b, board)?;
    Ok(va.cmp(&vb))
}
