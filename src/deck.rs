use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),
    #[error("deck is exhausted")]
    Exhausted,
}

/// A deck of unique cards, at most the standard 52.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use poker_equity::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for s in Suit::ALL {
            for r in Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards }
    }

    /// The standard deck minus `known`. Fails if `known` repeats a card.
    ///
    /// ```
    /// use poker_equity::cards::parse_cards;
    /// use poker_equity::deck::Deck;
    ///
    /// let known = parse_cards("As Ah Kd").unwrap();
    /// let deck = Deck::without(&known).unwrap();
    /// assert_eq!(deck.len(), 49);
    /// assert!(!deck.contains(known[0]));
    /// ```
    pub fn without(known: &[Card]) -> Result<Self, DeckError> {
        let mut excluded = 0u64;
        for &card in known {
            if excluded & card.mask() != 0 {
                return Err(DeckError::DuplicateCard(card));
            }
            excluded |= card.mask();
        }
        let mut deck = Self::standard();
        deck.cards.retain(|c| excluded & c.mask() == 0);
        Ok(deck)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Shuffle using the provided RNG implementing Rng.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draw one card from the top of the deck.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Remove and return a uniformly random remaining card.
    ///
    /// Order of the remaining cards is not preserved.
    pub fn draw_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Card, DeckError> {
        if self.cards.is_empty() {
            return Err(DeckError::Exhausted);
        }
        let i = rng.random_range(0..self.cards.len());
        Ok(self.cards.swap_remove(i))
    }
}

/// Cards of the standard deck not in `exclude`, in deck order.
///
/// ```
/// use poker_equity::cards::parse_cards;
/// use poker_equity::deck::available_cards;
///
/// let hand = parse_cards("2c 3c").unwrap();
/// let options = available_cards(&hand);
/// assert_eq!(options.len(), 50);
/// assert_eq!(options[0].to_string(), "4c");
/// ```
pub fn available_cards(exclude: &[Card]) -> Vec<Card> {
    Deck::standard().cards.into_iter().filter(|c| !exclude.contains(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_52_unique_cards() {
        let d = Deck::standard();
        assert_eq!(d.len(), 52);
        let set: HashSet<Card> = d.as_slice().iter().copied().collect();
        assert_eq!(set.len(), 52);
    }

    #[test]
    fn without_removes_known_cards() {
        let known = parse_cards("As Kh 2c 7d Td").unwrap();
        let d = Deck::without(&known).unwrap();
        assert_eq!(d.len(), 47);
        for c in known {
            assert!(!d.contains(c));
        }
    }

    #[test]
    fn without_rejects_duplicates() {
        let known = parse_cards("As Kh As").unwrap();
        let err = Deck::without(&known).unwrap_err();
        assert_eq!(err, DeckError::DuplicateCard(Card::new(Rank::Ace, Suit::Spades)));
    }

    #[test]
    fn shuffle_with_permutes_the_cards() {
        let original = Deck::without(&parse_cards("As Ah").unwrap()).unwrap();
        let mut d = original.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        d.shuffle_with(&mut rng);
        assert_eq!(d.len(), 50);
        assert_ne!(d.as_slice(), original.as_slice());
        let mut sorted = d.as_slice().to_vec();
        sorted.sort();
        let mut expected = original.as_slice().to_vec();
        expected.sort();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut d1 = Deck::standard();
        let mut d2 = Deck::standard();
        d1.shuffle_seeded(42);
        d2.shuffle_seeded(42);
        assert_eq!(d1.cards, d2.cards);
    }

    #[test]
    fn draw_random_empties_the_deck_then_fails() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut d = Deck::without(&parse_cards("As Ah").unwrap()).unwrap();
        let mut drawn = HashSet::new();
        while !d.is_empty() {
            let c = d.draw_random(&mut rng).unwrap();
            assert!(drawn.insert(c));
        }
        assert_eq!(drawn.len(), 50);
        assert_eq!(d.draw_random(&mut rng), Err(DeckError::Exhausted));
        assert_eq!(d.draw(), None);
    }

    #[test]
    fn draw_random_is_roughly_uniform() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let base = Deck::standard();
        let mut counts = [0u32; 52];
        for _ in 0..52_000 {
            let mut d = base.clone();
            counts[d.draw_random(&mut rng).unwrap().index() as usize] += 1;
        }
        // Expected 1000 each.
        assert!(counts.iter().all(|&n| (700..1300).contains(&n)));
    }
}
