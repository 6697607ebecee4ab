use poker_equity::cards::{parse_cards, Card, Rank, Suit};
use poker_equity::evaluator::{compare_holdem, evaluate, evaluate_best, evaluate_five, Category};
use poker_equity::hand::{Board, HoleCards};
use std::cmp::Ordering;

fn five(s: &str) -> [Card; 5] {
    let v = parse_cards(s).unwrap();
    [v[0], v[1], v[2], v[3], v[4]]
}

#[test]
fn category_straight_flush() {
    let sf = [
        Card::new(Rank::Ace, Suit::Spades),
        Card::new(Rank::King, Suit::Spades),
        Card::new(Rank::Queen, Suit::Spades),
        Card::new(Rank::Jack, Suit::Spades),
        Card::new(Rank::Ten, Suit::Spades),
    ];
    let e = evaluate_five(&sf);
    assert_eq!(e.category, Category::StraightFlush);
    assert_eq!(e.value().tiebreak(), vec![Rank::Ace]);
}

#[test]
fn steel_wheel_is_a_five_high_straight_flush() {
    let e = evaluate_five(&five("Ad 2d 3d 4d 5d"));
    assert_eq!(e.category, Category::StraightFlush);
    assert_eq!(e.value().tiebreak(), vec![Rank::Five]);
    assert!(e < evaluate_five(&five("2d 3d 4d 5d 6d")));
}

#[test]
fn four_of_a_kind_kicker_breaks_ties() {
    let a = evaluate_five(&five("9c 9d 9h 9s Ac"));
    let b = evaluate_five(&five("9c 9d 9h 9s Kc"));
    assert_eq!(a.category, Category::FourOfAKind);
    assert!(a > b);
}

#[test]
fn full_house_ranks_trips_before_pair() {
    let threes_full = evaluate_five(&five("3c 3d 3h Js Jc"));
    let twos_full = evaluate_five(&five("2c 2d 2h As Ac"));
    assert_eq!(threes_full.category, Category::FullHouse);
    assert_eq!(threes_full.value().tiebreak(), vec![Rank::Three, Rank::Jack]);
    assert!(threes_full > twos_full);
}

#[test]
fn flush_compares_every_card() {
    let a = evaluate_five(&five("Ah Jh 9h 6h 3h"));
    let b = evaluate_five(&five("As Js 9s 6s 2s"));
    assert_eq!(a.category, Category::Flush);
    assert!(a > b);
    assert_eq!(
        a.value().tiebreak(),
        vec![Rank::Ace, Rank::Jack, Rank::Nine, Rank::Six, Rank::Three]
    );
}

#[test]
fn straight_ignores_suits() {
    let a = evaluate_five(&five("Tc Jd Qh Ks Ac"));
    let b = evaluate_five(&five("Td Jh Qs Kc Ad"));
    assert_eq!(a.category, Category::Straight);
    assert_eq!(a, b);
}

#[test]
fn trips_then_kickers() {
    let a = evaluate_five(&five("7c 7d 7h Ks 2c"));
    let b = evaluate_five(&five("7c 7d 7h Qs Jc"));
    assert_eq!(a.category, Category::ThreeOfAKind);
    assert!(a > b);
}

#[test]
fn two_pair_order_of_comparison() {
    let aces_up = evaluate_five(&five("Ac Ad 3h 3s 2c"));
    let kings_queens = evaluate_five(&five("Kc Kd Qh Qs Ac"));
    assert_eq!(aces_up.category, Category::TwoPair);
    assert!(aces_up > kings_queens);
    let kicker_low = evaluate_five(&five("Ac Ad 3h 3s 4c"));
    assert!(kicker_low > aces_up);
}

#[test]
fn pair_kickers_in_order() {
    let a = evaluate_five(&five("Jc Jd Ah 5s 2c"));
    let b = evaluate_five(&five("Jh Js Kh Qs Tc"));
    assert_eq!(a.category, Category::Pair);
    assert!(a > b);
    assert_eq!(a.value().tiebreak(), vec![Rank::Jack, Rank::Ace, Rank::Five, Rank::Two]);
}

#[test]
fn high_card_identical_ranks_tie() {
    let a = evaluate_five(&five("Ac Jd 9h 6s 3c"));
    let b = evaluate_five(&five("Ad Jh 9s 6c 3d"));
    assert_eq!(a.category, Category::HighCard);
    assert_eq!(a.cmp(&b), Ordering::Equal);
}

#[test]
fn best_five_drops_the_weakest_cards() {
    let cards = parse_cards("Ah Kh 2h 7h 9h 2c 2d").unwrap();
    let best = evaluate_best(&cards).unwrap();
    assert_eq!(best.category, Category::Flush);
    assert!(!best.best_five.contains(&Card::new(Rank::Two, Suit::Clubs)));
    assert_eq!(best.value(), evaluate(&cards).unwrap());
}

#[test]
fn board_plays_splits_the_pot() {
    let board: Board = "Ac Kd Qh Js Tc".parse().unwrap();
    let a: HoleCards = "2c 3d".parse().unwrap();
    let b: HoleCards = "4h 5s".parse().unwrap();
    assert_eq!(compare_holdem(&a, &b, &board).unwrap(), Ordering::Equal);
}

#[test]
fn category_names() {
    let names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
    assert_eq!(names.first(), Some(&"High Card"));
    assert_eq!(names.last(), Some(&"Straight Flush"));
    assert_eq!(Category::ThreeOfAKind.to_string(), "Three of a Kind");
}
