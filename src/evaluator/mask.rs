use crate::cards::Rank;
use crate::evaluator::{Category, HandValue};

const RANKS: u16 = 0x1fff;

/// Evaluate a hand given as a card mask (bit `Card::index()` set per card).
///
/// The mask must hold 5 to 7 cards; [`super::evaluate`] checks that before
/// calling here. Each suit becomes a 13-bit rank mask and rank multiplicities
/// are derived with bitwise AND/OR across the four suits, so no five-card
/// subset is ever enumerated.
///
/// ```
/// use poker_equity::cards::parse_cards;
/// use poker_equity::evaluator::{evaluate_mask, Category};
///
/// let mask = parse_cards("Ks Kh Kd 9c 9s 2d 3h")
///     .unwrap()
///     .iter()
///     .fold(0u64, |m, c| m | c.mask());
/// assert_eq!(evaluate_mask(mask).category(), Category::FullHouse);
/// ```
pub fn evaluate_mask(cards: u64) -> HandValue {
    debug_assert!((5..=7).contains(&cards.count_ones()));

    let s = [
        (cards & RANKS as u64) as u16,
        ((cards >> 13) & RANKS as u64) as u16,
        ((cards >> 26) & RANKS as u64) as u16,
        ((cards >> 39) & RANKS as u64) as u16,
    ];

    let any = s[0] | s[1] | s[2] | s[3];
    let two = (s[0] & (s[1] | s[2] | s[3])) | (s[1] & (s[2] | s[3])) | (s[2] & s[3]);
    let three =
        (s[0] & s[1] & s[2]) | (s[0] & s[1] & s[3]) | (s[0] & s[2] & s[3]) | (s[1] & s[2] & s[3]);
    let four = s[0] & s[1] & s[2] & s[3];

    let flush = s.iter().copied().find(|m| m.count_ones() >= 5);
    if let Some(top) = flush.and_then(straight_top) {
        return HandValue::from_ranks(Category::StraightFlush, &[top]);
    }

    if four != 0 {
        let q = highest(four);
        let kicker = highest(any & !bit(q));
        return HandValue::from_ranks(Category::FourOfAKind, &[q, kicker]);
    }

    if three != 0 {
        let t = highest(three);
        let rest = two & !bit(t);
        if rest != 0 {
            return HandValue::from_ranks(Category::FullHouse, &[t, highest(rest)]);
        }
    }

    if let Some(m) = flush {
        let mut ranks = [Rank::Two; 5];
        fill_desc(m, &mut ranks);
        return HandValue::from_ranks(Category::Flush, &ranks);
    }

    if let Some(top) = straight_top(any) {
        return HandValue::from_ranks(Category::Straight, &[top]);
    }

    if three != 0 {
        let t = highest(three);
        let mut ranks = [t; 3];
        fill_desc(any & !bit(t), &mut ranks[1..]);
        return HandValue::from_ranks(Category::ThreeOfAKind, &ranks);
    }

    match two.count_ones() {
        0 => {
            let mut ranks = [Rank::Two; 5];
            fill_desc(any, &mut ranks);
            HandValue::from_ranks(Category::HighCard, &ranks)
        }
        1 => {
            let p = highest(two);
            let mut ranks = [p; 4];
            fill_desc(any & !bit(p), &mut ranks[1..]);
            HandValue::from_ranks(Category::Pair, &ranks)
        }
        _ => {
            // With three pairs the lowest one can still play as the kicker.
            let hi = highest(two);
            let lo = highest(two & !bit(hi));
            let kicker = highest(any & !bit(hi) & !bit(lo));
            HandValue::from_ranks(Category::TwoPair, &[hi, lo, kicker])
        }
    }
}

#[inline]
fn bit(r: Rank) -> u16 {
    1 << r.index()
}

/// Highest rank in a non-empty rank mask.
#[inline]
fn highest(m: u16) -> Rank {
    debug_assert!(m != 0);
    Rank::from_index(15 - m.leading_zeros() as u8).unwrap_or(Rank::Two)
}

/// Fill `out` with the highest ranks of `m`, descending.
fn fill_desc(mut m: u16, out: &mut [Rank]) {
    for slot in out.iter_mut() {
        let r = highest(m);
        *slot = r;
        m &= !bit(r);
    }
}

/// Top rank of the highest straight in a rank mask, Five for the wheel.
fn straight_top(m: u16) -> Option<Rank> {
    // Shift up one place and copy the ace into bit 0 so A-2-3-4-5 is a run.
    let ext = (m << 1) | ((m >> 12) & 1);
    let runs = ext & (ext >> 1) & (ext >> 2) & (ext >> 3) & (ext >> 4);
    if runs == 0 {
        return None;
    }
    // Bit `low` of `runs` starts a run spanning `low..=low + 4` in the shifted
    // mask; the top card's rank index is therefore `low + 3`.
    let low = 15 - runs.leading_zeros() as u8;
    Rank::from_index(low + 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn eval(s: &str) -> HandValue {
        evaluate_mask(parse_cards(s).unwrap().iter().fold(0, |m, c| m | c.mask()))
    }

    #[test]
    fn straight_top_handles_wheel_and_broadway() {
        let mask = |rs: &[Rank]| rs.iter().fold(0u16, |m, r| m | bit(*r));
        use Rank::*;
        assert_eq!(straight_top(mask(&[Ace, Two, Three, Four, Five])), Some(Five));
        assert_eq!(straight_top(mask(&[Ace, King, Queen, Jack, Ten])), Some(Ace));
        assert_eq!(straight_top(mask(&[Two, Three, Four, Five, Six, Ace])), Some(Six));
        assert_eq!(straight_top(mask(&[King, Ace, Two, Three, Four])), None);
        assert_eq!(straight_top(mask(&[Nine, Eight, Seven, Six, Four, Three])), None);
    }

    #[test]
    fn categories_from_seven_cards() {
        assert_eq!(eval("Ah Kh Qh Jh Th 9h 8h").category(), Category::StraightFlush);
        assert_eq!(eval("As Ah Ad Ac Ks Kh Kd").category(), Category::FourOfAKind);
        assert_eq!(eval("As Ah Ad Ks Kh Kd 2c").category(), Category::FullHouse);
        assert_eq!(eval("Ah 9h 7h 3h 2h Kc Kd").category(), Category::Flush);
        assert_eq!(eval("Ah 2c 3d 4s 5h 9c Jd").category(), Category::Straight);
        assert_eq!(eval("Qs Qh Qd 9c 7s 4d 2h").category(), Category::ThreeOfAKind);
        assert_eq!(eval("Js Jh 9d 9c 4s 4d 2h").category(), Category::TwoPair);
        assert_eq!(eval("Js Jh 9d 7c 4s 3d 2h").category(), Category::Pair);
        assert_eq!(eval("As Kh 9d 7c 4s 3d 2h").category(), Category::HighCard);
    }

    #[test]
    fn kickers_use_best_remaining_cards() {
        // Quads kicker may come from a paired rank.
        assert_eq!(eval("7s 7h 7d 7c Ks Kh 2d").tiebreak(), vec![Rank::Seven, Rank::King]);
        // Third pair competes as kicker against a higher single.
        assert_eq!(
            eval("Js Jh 9d 9c 4s 4d Ah").tiebreak(),
            vec![Rank::Jack, Rank::Nine, Rank::Ace]
        );
        assert_eq!(
            eval("Js Jh 9d 9c 4s 4d 2h").tiebreak(),
            vec![Rank::Jack, Rank::Nine, Rank::Four]
        );
        // Steel wheel loses to a six-high straight flush.
        assert!(eval("6h 5h 4h 3h 2h Ah Kc") > eval("Ah 2h 3h 4h 5h Kc Qc"));
    }
}
