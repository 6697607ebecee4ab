use crate::cards::{Card, Rank};
use crate::evaluator::{Category, Evaluation, HandValue};

/// Ranks of a five-card hand grouped by multiplicity, sorted by
/// (count desc, rank desc). AAAKQ groups as [(A, 3), (K, 1), (Q, 1)].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankGroups {
    groups: [(Rank, u8); 5],
    len: usize,
}

impl RankGroups {
    fn from_sorted(ranks: &[Rank; 5]) -> Self {
        let mut groups = [(Rank::Two, 0u8); 5];
        let mut len = 0;
        for &r in ranks {
            if len > 0 && groups[len - 1].0 == r {
                groups[len - 1].1 += 1;
            } else {
                groups[len] = (r, 1);
                len += 1;
            }
        }
        groups[..len].sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
        Self { groups, len }
    }

    fn with_count(&self, n: u8) -> impl Iterator<Item = Rank> + '_ {
        self.groups[..self.len].iter().filter(move |(_, c)| *c == n).map(|(r, _)| *r)
    }

    pub fn quad(&self) -> Option<Rank> {
        self.with_count(4).next()
    }

    pub fn trips(&self) -> Option<Rank> {
        self.with_count(3).next()
    }

    /// Pair ranks, descending.
    pub fn pairs(&self) -> Vec<Rank> {
        self.with_count(2).collect()
    }

    /// Ranks ordered by multiplicity then rank; the tiebreak key for every
    /// category except straights.
    pub fn ordered(&self) -> Vec<Rank> {
        self.groups[..self.len].iter().map(|(r, _)| *r).collect()
    }

    pub fn distinct(&self) -> usize {
        self.len
    }
}

/// Pre-computed analysis of a 5-card hand, shared by all category detectors.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    pub sorted_cards: [Card; 5],
    pub ranks: [Rank; 5],
    pub groups: RankGroups,
    pub is_flush: bool,
    /// Top rank of the straight, Five for the wheel.
    pub straight_top: Option<Rank>,
}

impl HandAnalysis {
    pub fn new(cards: &[Card; 5]) -> Self {
        let mut sorted_cards = *cards;
        sorted_cards.sort_by(|a, b| b.rank().cmp(&a.rank()).then(b.suit().cmp(&a.suit())));
        let ranks = sorted_cards.map(Card::rank);
        let groups = RankGroups::from_sorted(&ranks);
        let is_flush = sorted_cards.iter().all(|c| c.suit() == sorted_cards[0].suit());
        let straight_top = straight_top(&ranks, groups.distinct());
        Self { sorted_cards, ranks, groups, is_flush, straight_top }
    }

    pub fn build_evaluation(&self, category: Category, tiebreak: &[Rank]) -> Evaluation {
        let value = HandValue::from_ranks(category, tiebreak);
        Evaluation { category, best_five: self.sorted_cards, value }
    }
}

fn straight_top(desc: &[Rank; 5], distinct: usize) -> Option<Rank> {
    if distinct != 5 {
        return None;
    }
    if desc[0].value() - desc[4].value() == 4 {
        return Some(desc[0]);
    }
    if desc == &[Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two] {
        return Some(Rank::Five);
    }
    None
}
