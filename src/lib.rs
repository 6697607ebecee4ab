//! poker-equity: Monte Carlo equity for Texas Hold'em
//!
//! Goals:
//! - Estimate how often a hand wins against random opponents
//! - Price a call from win equity, fold equity, pot and bet
//! - Deterministic under a seed; no panics for invalid input
//!
//! ## Quick start: equity of a pair of kings
//! ```
//! use poker_equity::cards::parse_cards;
//! use poker_equity::{compute_equity_with, EquityRequest, SimulationConfig};
//!
//! let request = EquityRequest::new(&parse_cards("Ks Kh").unwrap(), &[], 2, 100.0, 20.0);
//! let config = SimulationConfig::default().with_trials(2_000).with_seed(1);
//! let report = compute_equity_with(&request, &config).unwrap();
//!
//! assert_eq!(report.trials_run, 2_000);
//! assert!(report.win_equity > 0.7);
//! ```
//!
//! ## Hand ranking
//! ```
//! use poker_equity::cards::parse_cards;
//! use poker_equity::evaluator::{evaluate, Category};
//!
//! let value = evaluate(&parse_cards("As Ah Kc Qd Jh 3s 2c").unwrap()).unwrap();
//! assert_eq!(value.category(), Category::Pair);
//! ```
//!
//! ## CLI
//! ```sh
//! cargo run --release -- --hand "As Kd" --board "2c 7h Td" --players 4 --pot 60 --call 15
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod equity;
pub mod ev;
pub mod evaluator;
pub mod hand;
pub mod simulator;

pub use config::{CancelToken, SimulationConfig};
pub use equity::{compute_equity, compute_equity_with, EquityError, EquityReport, EquityRequest};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
