use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Trials per equity calculation when the caller does not choose.
pub const DEFAULT_TRIALS: usize = 10_000;

/// Chance that each opponent is recorded as folding in a trial.
pub const DEFAULT_FOLD_PROBABILITY: f64 = 0.5;

/// Shared flag for stopping a running simulation between trials.
///
/// ```
/// use poker_equity::config::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("trial count must be at least 1")]
    ZeroTrials,
    #[error("worker count must be at least 1")]
    ZeroWorkers,
    #[error("fold probability must be within [0, 1], got {0}")]
    FoldProbability(f64),
}

/// Knobs for a Monte Carlo run.
///
/// ```
/// use poker_equity::config::SimulationConfig;
///
/// let config = SimulationConfig::default().with_trials(50_000).with_seed(7).with_workers(4);
/// assert_eq!(config.trials, 50_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct SimulationConfig {
    pub trials: usize,
    pub fold_probability: f64,
    pub workers: usize,
    /// Fixed seed for reproducible runs; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Stop starting new trials once this much time has passed.
    pub deadline: Option<Duration>,
    pub cancel: Option<CancelToken>,
}

impl SimulationConfig {
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_fold_probability(mut self, p: f64) -> Self {
        self.fold_probability = p;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set a deterministic RNG seed. Results are reproducible for a given
    /// seed and worker count.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::ZeroTrials);
        }
        if self.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if !(0.0..=1.0).contains(&self.fold_probability) {
            return Err(ConfigError::FoldProbability(self.fold_probability));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            fold_probability: DEFAULT_FOLD_PROBABILITY,
            workers: std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
            seed: None,
            deadline: None,
            cancel: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.trials, DEFAULT_TRIALS);
        assert_eq!(config.fold_probability, 0.5);
        assert!(config.workers >= 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let base = SimulationConfig::default();
        assert_eq!(base.clone().with_trials(0).validate(), Err(ConfigError::ZeroTrials));
        assert_eq!(base.clone().with_workers(0).validate(), Err(ConfigError::ZeroWorkers));
        assert_eq!(
            base.clone().with_fold_probability(1.5).validate(),
            Err(ConfigError::FoldProbability(1.5))
        );
        assert!(base.with_fold_probability(f64::NAN).validate().is_err());
    }

    #[test]
    fn cancel_token_is_shared_between_clones() {
        let token = CancelToken::new();
        let config = SimulationConfig::default().with_cancel_token(token.clone());
        assert!(!config.cancel.as_ref().unwrap().is_cancelled());
        token.cancel();
        assert!(config.cancel.unwrap().is_cancelled());
    }
}
