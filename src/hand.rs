use crate::cards::{parse_cards, Card};
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate cards in hole cards")]
    DuplicateHoleCards,
    #[error("too many board cards: {0}")]
    TooManyBoardCards(usize),
    #[error("duplicate card on board: {0}")]
    DuplicateBoardCard(Card),
    #[error("hole card {0} is also on the board")]
    Overlap(Card),
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A player's two private hole cards.
///
/// ```
/// use poker_equity::hand::HoleCards;
///
/// let hole: HoleCards = "As Ks".parse().unwrap();
/// assert_eq!(hole.as_array().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn first(&self) -> Card {
        self.0
    }

    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    pub fn mask(&self) -> u64 {
        self.0.mask() | self.1.mask()
    }

    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards);
        }
        Ok(Self(a, b))
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        if slice.len() != 2 {
            return Err(HandError::HoleCount(slice.len()));
        }
        Self::try_new(slice[0], slice[1])
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Self::from_slice(&cards)
    }
}

/// Known community cards, zero to five of them.
///
/// ```
/// use poker_equity::hand::Board;
///
/// let board: Board = "2c 3c 4c".parse().unwrap();
/// assert_eq!(board.len(), 3);
/// assert_eq!(board.missing(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// Build a board without validation; see [`validate_holdem`].
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > 5 {
            return Err(HandError::TooManyBoardCards(cards.len()));
        }
        board_mask(&cards)?;
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards still to come before the board is complete.
    pub fn missing(&self) -> usize {
        5usize.saturating_sub(self.cards.len())
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }
}

impl FromStr for Board {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Board::try_new(cards)
    }
}

fn board_mask(cards: &[Card]) -> Result<u64, HandError> {
    let mut mask = 0u64;
    for &c in cards {
        if mask & c.mask() != 0 {
            return Err(HandError::DuplicateBoardCard(c));
        }
        mask |= c.mask();
    }
    Ok(mask)
}

/// Validate that a pair of hole cards and board form a valid Hold'em state.
/// Allows 0..=5 board cards and ensures uniqueness across all cards.
///
/// ```
/// use poker_equity::hand::{validate_holdem, Board, HoleCards};
///
/// let hole: HoleCards = "As Ks".parse().unwrap();
/// let board: Board = "2c 3c 4c".parse().unwrap();
/// validate_holdem(&hole, &board).unwrap();
/// ```
pub fn validate_holdem(hole: &HoleCards, board: &Board) -> Result<(), HandError> {
    if board.len() > 5 {
        return Err(HandError::TooManyBoardCards(board.len()));
    }
    if hole.first() == hole.second() {
        return Err(HandError::DuplicateHoleCards);
    }
    let mask = board_mask(board.as_slice())?;
    for c in hole.as_array() {
        if mask & c.mask() != 0 {
            return Err(HandError::Overlap(c));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn hole_cards_must_be_distinct() {
        let a = Card::new(Rank::Ace, Suit::Spades);
        assert!(matches!(HoleCards::try_new(a, a), Err(HandError::DuplicateHoleCards)));
        assert!(matches!("As".parse::<HoleCards>(), Err(HandError::HoleCount(1))));
        assert!(matches!("As Ks Qs".parse::<HoleCards>(), Err(HandError::HoleCount(3))));
    }

    #[test]
    fn board_try_new_checks_limits_and_dupes() {
        let err = "2c 3c 4c 5c 6c 7c".parse::<Board>().unwrap_err();
        assert_eq!(err, HandError::TooManyBoardCards(6));

        let err = "2c 2c".parse::<Board>().unwrap_err();
        assert_eq!(err, HandError::DuplicateBoardCard(Card::new(Rank::Two, Suit::Clubs)));
    }

    #[test]
    fn validate_holdem_catches_overlap() {
        let hole: HoleCards = "As Ks".parse().unwrap();
        let board = Board::new(vec![
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::Two, Suit::Clubs),
            Card::new(Rank::Three, Suit::Clubs),
        ]);
        assert_eq!(
            validate_holdem(&hole, &board),
            Err(HandError::Overlap(Card::new(Rank::Ace, Suit::Spades)))
        );
    }

    #[test]
    fn parse_errors_are_reported() {
        assert!(matches!("As Kx".parse::<HoleCards>(), Err(HandError::CardParse(_))));
        assert!(matches!("10c".parse::<Board>(), Err(HandError::CardParse(_))));
    }

    #[test]
    fn empty_board_is_valid() {
        let board: Board = "".parse().unwrap();
        assert!(board.is_empty());
        assert_eq!(board.missing(), 5);
    }
}
