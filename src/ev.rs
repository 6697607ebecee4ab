/// Expected value of calling `bet_to_call` into `pot_size`.
///
/// `EV = win * (pot + bet) - bet * (1 - win - fold)`: the pot plus the call is
/// won with probability `win_equity`, and the call is lost when the hand
/// neither wins nor takes the pot through a fold. Inputs are not clamped, so
/// `win_equity + fold_equity > 1` turns the loss term into a gain.
///
/// ```
/// use poker_equity::ev::compute_ev;
///
/// assert_eq!(compute_ev(1.0, 0.0, 100.0, 20.0), 120.0);
/// assert_eq!(compute_ev(0.0, 1.0, 100.0, 20.0), 0.0);
/// assert_eq!(compute_ev(0.0, 0.0, 100.0, 20.0), -20.0);
/// ```
pub fn compute_ev(win_equity: f64, fold_equity: f64, pot_size: f64, bet_to_call: f64) -> f64 {
    win_equity * (pot_size + bet_to_call) - bet_to_call * (1.0 - win_equity - fold_equity)
}

/// Share of the final pot the caller puts in, 0 for a free pot.
///
/// ```
/// use poker_equity::ev::pot_odds;
///
/// assert_eq!(pot_odds(80.0, 20.0), 0.2);
/// assert_eq!(pot_odds(0.0, 0.0), 0.0);
/// ```
pub fn pot_odds(pot_size: f64, bet_to_call: f64) -> f64 {
    let total = pot_size + bet_to_call;
    if total > 0.0 {
        bet_to_call / total
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn ev_is_linear_in_pot_and_bet() {
        let (w, f) = (0.35, 0.2);
        let base = compute_ev(w, f, 100.0, 20.0);
        assert!(close(compute_ev(w, f, 200.0, 40.0), 2.0 * base));
        assert!(close(
            compute_ev(w, f, 150.0, 20.0) - compute_ev(w, f, 100.0, 20.0),
            compute_ev(w, f, 100.0, 20.0) - compute_ev(w, f, 50.0, 20.0)
        ));
        assert!(close(compute_ev(w, f, 100.0, 0.0), w * 100.0));
    }

    #[test]
    fn boundary_identities() {
        for (pot, bet) in [(0.0, 0.0), (100.0, 20.0), (37.5, 12.25)] {
            assert!(close(compute_ev(1.0, 0.0, pot, bet), pot + bet));
            assert!(close(compute_ev(0.0, 1.0, pot, bet), 0.0));
        }
    }

    #[test]
    fn overlapping_equities_are_not_clamped() {
        // win + fold > 1 flips the loss term positive.
        assert!(close(compute_ev(0.8, 0.5, 100.0, 20.0), 0.8 * 120.0 + 20.0 * 0.3));
    }

    #[test]
    fn pot_odds_share() {
        assert!(close(pot_odds(100.0, 50.0), 1.0 / 3.0));
        assert_eq!(pot_odds(100.0, 0.0), 0.0);
    }
}
