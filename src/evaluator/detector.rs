use super::analysis::HandAnalysis;
use crate::evaluator::{Category, Evaluation};

/// Each category detector recognises its category and builds the evaluation.
pub trait CategoryDetector {
    fn evaluate(&self, analysis: &HandAnalysis) -> Option<Evaluation>;
}

pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn evaluate(&self, a: &HandAnalysis) -> Option<Evaluation> {
        let top = a.straight_top.filter(|_| a.is_flush)?;
        Some(a.build_evaluation(Category::StraightFlush, &[top]))
    }
}

pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn evaluate(&self, a: &HandAnalysis) -> Option<Evaluation> {
        a.groups.quad()?;
        Some(a.build_evaluation(Category::FourOfAKind, &a.groups.ordered()))
    }
}

pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn evaluate(&self, a: &HandAnalysis) -> Option<Evaluation> {
        a.groups.trips()?;
        if a.groups.pairs().is_empty() {
            return None;
        }
        Some(a.build_evaluation(Category::FullHouse, &a.groups.ordered()))
    }
}

pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn evaluate(&self, a: &HandAnalysis) -> Option<Evaluation> {
        a.is_flush.then(|| a.build_evaluation(Category::Flush, &a.ranks))
    }
}

pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn evaluate(&self, a: &HandAnalysis) -> Option<Evaluation> {
        let top = a.straight_top?;
        Some(a.build_evaluation(Category::Straight, &[top]))
    }
}

pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn evaluate(&self, a: &HandAnalysis) -> Option<Evaluation> {
        a.groups.trips()?;
        Some(a.build_evaluation(Category::ThreeOfAKind, &a.groups.ordered()))
    }
}

pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn evaluate(&self, a: &HandAnalysis) -> Option<Evaluation> {
        (a.groups.pairs().len() == 2)
            .then(|| a.build_evaluation(Category::TwoPair, &a.groups.ordered()))
    }
}

pub struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn evaluate(&self, a: &HandAnalysis) -> Option<Evaluation> {
        (a.groups.pairs().len() == 1)
            .then(|| a.build_evaluation(Category::Pair, &a.groups.ordered()))
    }
}

pub struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn evaluate(&self, a: &HandAnalysis) -> Option<Evaluation> {
        Some(a.build_evaluation(Category::HighCard, &a.ranks))
    }
}

/// Detectors from strongest to weakest; the first match wins.
pub const DETECTORS: [&dyn CategoryDetector; 9] = [
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
    &HighCardDetector,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn analyse(s: &str) -> HandAnalysis {
        let v = parse_cards(s).unwrap();
        HandAnalysis::new(&[v[0], v[1], v[2], v[3], v[4]])
    }

    #[test]
    fn each_detector_matches_its_category() {
        let cases: [(&dyn CategoryDetector, &str, Category); 9] = [
            (&StraightFlushDetector, "9h 8h 7h 6h 5h", Category::StraightFlush),
            (&FourOfAKindDetector, "As Ah Ad Ac Ks", Category::FourOfAKind),
            (&FullHouseDetector, "Ks Kh Kd Qc Qs", Category::FullHouse),
            (&FlushDetector, "Ad Jd 9d 5d 2d", Category::Flush),
            (&StraightDetector, "9s 8h 7d 6c 5s", Category::Straight),
            (&ThreeOfAKindDetector, "Js Jh Jd 9c 7s", Category::ThreeOfAKind),
            (&TwoPairDetector, "As Ah Kd Kc Qs", Category::TwoPair),
            (&OnePairDetector, "Js Jh 9d 7c 3s", Category::Pair),
            (&HighCardDetector, "As Kh Jd 9c 7s", Category::HighCard),
        ];
        for (detector, hand, category) in cases {
            let eval = detector.evaluate(&analyse(hand)).expect(hand);
            assert_eq!(eval.category, category, "{hand}");
        }
    }

    #[test]
    fn detectors_reject_other_categories() {
        let pair = analyse("Js Jh 9d 7c 3s");
        assert!(StraightFlushDetector.evaluate(&pair).is_none());
        assert!(FourOfAKindDetector.evaluate(&pair).is_none());
        assert!(FullHouseDetector.evaluate(&pair).is_none());
        assert!(FlushDetector.evaluate(&pair).is_none());
        assert!(StraightDetector.evaluate(&pair).is_none());
        assert!(ThreeOfAKindDetector.evaluate(&pair).is_none());
        assert!(TwoPairDetector.evaluate(&pair).is_none());
    }

    #[test]
    fn straight_flush_matches_several_detectors_but_wins_first() {
        let a = analyse("9h 8h 7h 6h 5h");
        assert!(FlushDetector.evaluate(&a).is_some());
        assert!(StraightDetector.evaluate(&a).is_some());
        let first = DETECTORS.iter().find_map(|d| d.evaluate(&a)).unwrap();
        assert_eq!(first.category, Category::StraightFlush);
    }
}
