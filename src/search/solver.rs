//! Restarting driver: fresh random start, local search, repeat.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::builder::RandomSolutionBuilder;
use super::clock::{Clock, SystemClock};
use super::config::SearchConfig;
use super::runner::{LocalSearch, SearchStatus};
use crate::error::{Error, Result};
use crate::problem::Problem;
use crate::solution::Solution;

/// Outcome of a restarting search.
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// Best solution over all attempts.
    pub solution: Solution,
    /// Terminal status of the last attempt.
    pub status: SearchStatus,
    /// Attempts started.
    pub attempts: usize,
    /// Iterations summed over all attempts.
    pub total_iterations: usize,
}

impl SolveReport {
    /// Returns `true` if a feasible packing was found.
    pub fn is_success(&self) -> bool {
        self.status == SearchStatus::Converged
    }
}

/// Runs [`LocalSearch`] from fresh random starts until one converges or
/// the attempt budget is used up.
pub struct Solver;

impl Solver {
    /// Solves with wall-clock budgets and an RNG seeded from the config.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use u_bagging::problem::{ItemSpec, Problem};
    /// use u_bagging::search::{SearchConfig, Solver};
    ///
    /// let problem = Arc::new(Problem::new(2, 10, vec![
    ///     ItemSpec::new("eggs", 3).excluding(["bricks"]),
    ///     ItemSpec::new("bricks", 7),
    ///     ItemSpec::new("bread", 3),
    /// ]).unwrap());
    ///
    /// let config = SearchConfig::default().with_time_limit_secs(1).with_seed(42);
    /// let report = Solver::solve(&problem, &config).unwrap();
    /// assert!(report.is_success());
    /// ```
    pub fn solve(problem: &Arc<Problem>, config: &SearchConfig) -> Result<SolveReport> {
        Self::solve_with_cancel(problem, config, None)
    }

    /// Like [`Solver::solve`], stopping early once `cancel` is set.
    pub fn solve_with_cancel(
        problem: &Arc<Problem>,
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SolveReport> {
        let mut rng = create_rng(config.seed);
        Self::solve_with(problem, config, &mut rng, SystemClock::start, cancel)
    }

    /// Fully injected form: `rng` drives every start and search, and
    /// `clock` is called once per attempt to start that attempt's budget.
    ///
    /// Configuration errors from building a start are returned at once,
    /// not retried.
    pub fn solve_with<R, C, F>(
        problem: &Arc<Problem>,
        config: &SearchConfig,
        rng: &mut R,
        mut clock: F,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SolveReport>
    where
        R: Rng,
        C: Clock,
        F: FnMut() -> C,
    {
        config.validate()?;
        let builder = RandomSolutionBuilder::new(config.max_draws);

        let mut best: Option<Solution> = None;
        let mut status = SearchStatus::Running;
        let mut attempts = 0;
        let mut total_iterations = 0;

        for attempt in 0..config.max_attempts {
            attempts = attempt + 1;
            let start = builder.build(problem, rng)?;

            let mut search = LocalSearch::new(start, config.time_limit);
            if let Some(flag) = &cancel {
                search = search.with_cancel(Arc::clone(flag));
            }
            let result = search.run(rng, &clock())?;
            total_iterations += result.iterations;
            status = result.status;

            log::info!(
                "attempt {}/{}: {:?}, best score {}",
                attempts,
                config.max_attempts,
                result.status,
                result.best_score
            );

            if best
                .as_ref()
                .is_none_or(|sol| result.best_score > sol.total_score())
            {
                best = Some(result.solution);
            }

            if matches!(status, SearchStatus::Converged | SearchStatus::Cancelled) {
                break;
            }
        }

        let solution = best.ok_or_else(|| {
            Error::InvalidConfig("max_attempts must be at least 1".into())
        })?;
        if status != SearchStatus::Converged {
            log::warn!(
                "no feasible packing after {} attempts (best score {})",
                attempts,
                solution.total_score()
            );
        }

        Ok(SolveReport {
            solution,
            status,
            attempts,
            total_iterations,
        })
    }
}

/// Seeded RNG for reproducible runs; draws a seed when none is given.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(rand::random);
    log::debug!("rng seed {seed}");
    StdRng::seed_from_u64(seed)
}
