//! Configuration options for a session run.
//!
//! Callers always pass configuration explicitly; nothing here reads the
//! environment.

use serde::{Deserialize, Serialize};

use crate::error::{EvError, Result};
use crate::ev::RakePolicy;
use crate::eval::Comparator;

/// Default number of Monte Carlo iterations per hand.
pub const DEFAULT_ITERATIONS: u64 = 50_000;

/// Configuration for a [`Session`](super::Session).
///
/// # Example
/// ```
/// use allin_ev::session::SessionConfig;
///
/// let config = SessionConfig::default().with_seed(42).with_iterations(10_000);
/// assert!(config.validate().is_ok());
/// assert!(!config.ev_before_rake);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Monte Carlo iterations per hand.
    ///
    /// Only controls estimator variance; the count is never adapted.
    pub iterations: u64,

    /// Random seed for reproducibility.
    ///
    /// The session seeds one generator with it before the first hand, so a
    /// whole run is reproducible for the same hands, seed and iteration
    /// count. If `None`, the generator is seeded from OS entropy.
    pub seed: Option<u64>,

    /// Apply equity to the pot before rake is taken.
    pub ev_before_rake: bool,

    /// Showdown comparator.
    pub comparator: Comparator,

    /// When the villain's cards were never shown, deal them at random
    /// instead of skipping the hand.
    pub assume_random_opponent: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            ev_before_rake: false,
            comparator: Comparator::HighCard,
            assume_random_opponent: false,
        }
    }
}

impl SessionConfig {
    /// Create with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set iterations per hand.
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: compute EV before rake.
    pub fn with_ev_before_rake(mut self, enable: bool) -> Self {
        self.ev_before_rake = enable;
        self
    }

    /// Builder method: choose the comparator.
    pub fn with_comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = comparator;
        self
    }

    /// Builder method: deal unknown villain cards at random.
    pub fn with_random_opponent(mut self, enable: bool) -> Self {
        self.assume_random_opponent = enable;
        self
    }

    /// Rake policy implied by `ev_before_rake`.
    pub fn rake_policy(&self) -> RakePolicy {
        RakePolicy::from_before_rake(self.ev_before_rake)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(EvError::ZeroIterations);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::new();
        assert_eq!(config.iterations, DEFAULT_ITERATIONS);
        assert_eq!(config.seed, None);
        assert_eq!(config.comparator, Comparator::HighCard);
        assert_eq!(config.rake_policy(), RakePolicy::AfterRake);
    }

    #[test]
    fn test_validate() {
        assert!(SessionConfig::default().with_iterations(0).validate().is_err());
        assert!(SessionConfig::default().with_iterations(1).validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"seed": 7, "comparator": "five-card"}"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.comparator, Comparator::FiveCard);
        assert_eq!(config.iterations, DEFAULT_ITERATIONS);
    }
}
