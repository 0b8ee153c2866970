//! Search configuration.

use std::time::Duration;

use crate::error::{Error, Result};

/// Default cap on random bag draws per item during construction.
pub const DEFAULT_MAX_DRAWS: usize = 10_000;

/// Configuration for the restarting local search.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_bagging::search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_time_limit(Duration::from_secs(5))
///     .with_max_attempts(3)
///     .with_seed(7);
/// assert_eq!(config.max_attempts, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Time budget for each local search attempt.
    pub time_limit: Duration,
    /// Number of fresh random starts before giving up.
    pub max_attempts: usize,
    /// Random bag draws allowed per item when building a start.
    pub max_draws: usize,
    /// Random seed (None for random).
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(30),
            max_attempts: 10,
            max_draws: DEFAULT_MAX_DRAWS,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Sets the per-attempt time budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Sets the per-attempt time budget in whole seconds.
    pub fn with_time_limit_secs(self, secs: u64) -> Self {
        self.with_time_limit(Duration::from_secs(secs))
    }

    pub fn with_max_attempts(mut self, n: usize) -> Self {
        self.max_attempts = n;
        self
    }

    pub fn with_max_draws(mut self, n: usize) -> Self {
        self.max_draws = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig("max_attempts must be at least 1".into()));
        }
        if self.max_draws == 0 {
            return Err(Error::InvalidConfig("max_draws must be at least 1".into()));
        }
        Ok(())
    }
}
