//! Local search execution engine.
//!
//! # Algorithm
//!
//! 1. If the incumbent scores 0, stop: converged
//! 2. Generate candidates with [`MoveGenerator`]
//! 3. Find the highest (least negative) candidate score
//! 4. Pick uniformly among the candidates at that score and make it the
//!    new incumbent, replacing the old one
//! 5. If the time budget is spent, stop: timed out; otherwise repeat
//!
//! The deadline and the optional cancellation flag are only consulted
//! between iterations, so an iteration always runs to completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use super::clock::Clock;
use super::moves::{Move, MoveGenerator};
use crate::error::Result;
use crate::solution::Solution;

/// State of a local search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// Still iterating.
    Running,
    /// Reached score 0.
    Converged,
    /// The time budget ran out first.
    TimedOut,
    /// Stopped through the cancellation flag.
    Cancelled,
}

impl SearchStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SearchStatus::Running)
    }
}

/// Result of a local search run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best solution seen (the earliest one among equal scores).
    pub solution: Solution,
    /// Incumbent when the run stopped. Same score as `solution` unless the
    /// run timed out or was cancelled after drifting away from its best.
    pub final_solution: Solution,
    /// Terminal status.
    pub status: SearchStatus,
    /// Iterations executed.
    pub iterations: usize,
    /// Score of `solution`.
    pub best_score: i64,
    /// Iteration after which the best solution was reached (0 = start).
    pub best_iteration: usize,
    /// Incumbent score after each iteration.
    pub score_history: Vec<i64>,
    /// Moves applied, in order.
    pub moves: Vec<Move>,
}

/// Single-start local search over relocate-one-item moves.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_bagging::problem::{ItemSpec, Problem};
/// use u_bagging::search::{LocalSearch, ManualClock, SearchStatus};
/// use u_bagging::solution::Solution;
///
/// let problem = Arc::new(Problem::new(2, 10, vec![
///     ItemSpec::new("A", 4),
///     ItemSpec::new("B", 4),
///     ItemSpec::new("C", 4),
/// ]).unwrap());
///
/// let mut start = Solution::new(problem);
/// for item in 0..3 {
///     start.add_item(0, item).unwrap();
/// }
///
/// let clock = ManualClock::with_tick(Duration::from_millis(1));
/// let mut rng = StdRng::seed_from_u64(42);
/// let result = LocalSearch::new(start, Duration::from_secs(1))
///     .run(&mut rng, &clock)
///     .unwrap();
/// assert_eq!(result.status, SearchStatus::Converged);
/// assert_eq!(result.solution.total_score(), 0);
/// ```
#[derive(Debug)]
pub struct LocalSearch {
    current: Solution,
    time_limit: Duration,
    cancel: Option<Arc<AtomicBool>>,
    status: SearchStatus,
    iterations: usize,
}

impl LocalSearch {
    /// Creates a search starting from `start` with the given time budget.
    pub fn new(start: Solution, time_limit: Duration) -> Self {
        Self {
            current: start,
            time_limit,
            cancel: None,
            status: SearchStatus::Running,
            iterations: 0,
        }
    }

    /// Attaches a cancellation flag, checked once per iteration.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// The incumbent solution.
    pub fn current(&self) -> &Solution {
        &self.current
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Performs one generate-select-replace iteration.
    ///
    /// Returns the applied move, or `None` when the neighborhood is empty
    /// (single bag) and the incumbent stays as it is.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> Result<Option<Move>> {
        let candidates = MoveGenerator::generate(&self.current, rng)?;
        self.iterations += 1;

        let Some(top) = candidates.iter().map(|c| c.score()).max() else {
            return Ok(None);
        };
        let mut tied: Vec<_> = candidates.into_iter().filter(|c| c.score() == top).collect();
        let chosen = tied.swap_remove(rng.random_range(0..tied.len()));

        log::trace!(
            "iteration {}: move item {} {} -> {}, score {} ({} tied)",
            self.iterations,
            chosen.mv.item,
            chosen.mv.from,
            chosen.mv.to,
            top,
            tied.len() + 1
        );

        self.current = chosen.solution;
        Ok(Some(chosen.mv))
    }

    /// Runs until convergence, budget expiry or cancellation.
    ///
    /// All randomness comes from `rng` and all timing from `clock`, so a
    /// seeded RNG and a [`ManualClock`](super::ManualClock) reproduce a run
    /// exactly. An internal-consistency error aborts the run.
    pub fn run<R: Rng, C: Clock>(mut self, rng: &mut R, clock: &C) -> Result<SearchResult> {
        let origin = clock.elapsed();

        let mut best = self.current.clone();
        let mut best_score = best.total_score();
        let mut best_iteration = 0;
        let mut score_history = Vec::new();
        let mut moves = Vec::new();

        while !self.status.is_terminal() {
            if self.current.is_feasible() {
                self.status = SearchStatus::Converged;
                break;
            }
            if self
                .cancel
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Relaxed))
            {
                self.status = SearchStatus::Cancelled;
                break;
            }

            if let Some(mv) = self.step(rng)? {
                moves.push(mv);
            }
            let score = self.current.total_score();
            score_history.push(score);

            if score > best_score {
                log::debug!(
                    "iteration {}: score improved {} -> {}",
                    self.iterations,
                    best_score,
                    score
                );
                best = self.current.clone();
                best_score = score;
                best_iteration = self.iterations;
            }

            if score != 0 && clock.elapsed().saturating_sub(origin) >= self.time_limit {
                self.status = SearchStatus::TimedOut;
            }
        }

        log::info!(
            "local search {:?} after {} iterations, best score {}",
            self.status,
            self.iterations,
            best_score
        );

        Ok(SearchResult {
            solution: best,
            final_solution: self.current,
            status: self.status,
            iterations: self.iterations,
            best_score,
            best_iteration,
            score_history,
            moves,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{ItemSpec, Problem};
    use crate::search::builder::RandomSolutionBuilder;
    use crate::search::clock::ManualClock;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn placed(bags: usize, capacity: i64, specs: Vec<ItemSpec>, placement: &[usize]) -> Solution {
        let problem = Arc::new(Problem::new(bags, capacity, specs).unwrap());
        let mut sol = Solution::new(problem);
        for (item, &bag) in placement.iter().enumerate() {
            sol.add_item(bag, item).unwrap();
        }
        sol
    }

    fn ticking() -> ManualClock {
        ManualClock::with_tick(Duration::from_millis(1))
    }

    /// A mix of one-way and mutual exclusions with a tight capacity.
    fn pantry() -> Vec<ItemSpec> {
        vec![
            ItemSpec::new("bleach", 4).excluding(["bread", "apples", "cheese"]),
            ItemSpec::new("bread", 3).excluding(["bleach"]),
            ItemSpec::new("apples", 4),
            ItemSpec::new("cheese", 2).including(["bread", "wine"]),
            ItemSpec::new("wine", 5),
            ItemSpec::new("soap", 2).excluding(["cheese", "bread"]),
            ItemSpec::new("rice", 5),
            ItemSpec::new("eggs", 1).excluding(["rice"]),
            ItemSpec::new("milk", 3),
            ItemSpec::new("tea", 1),
        ]
    }

    #[test]
    fn test_three_items_two_bags_converges() {
        let specs = vec![
            ItemSpec::new("A", 4),
            ItemSpec::new("B", 4),
            ItemSpec::new("C", 4),
        ];
        let start = placed(2, 10, specs, &[0, 0, 0]);
        assert_eq!(start.total_score(), -2);

        let mut rng = StdRng::seed_from_u64(42);
        let clock = ticking();
        let result = LocalSearch::new(start, Duration::from_secs(1))
            .run(&mut rng, &clock)
            .unwrap();

        assert_eq!(result.status, SearchStatus::Converged);
        assert_eq!(result.best_score, 0);
        assert!(result.iterations <= 5, "took {} iterations", result.iterations);
        let loads: Vec<_> = result.solution.bags().map(|b| b.size()).collect();
        assert!(loads.iter().all(|&l| l <= 10));
    }

    #[test]
    fn test_feasible_start_converges_immediately() {
        let specs = vec![ItemSpec::new("A", 4), ItemSpec::new("B", 4)];
        let start = placed(2, 10, specs, &[0, 1]);
        let result = LocalSearch::new(start, Duration::from_secs(1))
            .run(&mut StdRng::seed_from_u64(0), &ticking())
            .unwrap();
        assert_eq!(result.status, SearchStatus::Converged);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.final_solution.packing(), result.solution.packing());
        assert!(result.moves.is_empty());
        assert!(result.score_history.is_empty());
    }

    #[test]
    fn test_one_way_exclusion_resolved() {
        let specs = vec![
            ItemSpec::new("A", 3).excluding(["B"]),
            ItemSpec::new("B", 3),
            ItemSpec::new("C", 3),
        ];
        let start = placed(2, 10, specs, &[0, 0, 1]);
        assert_eq!(start.bag_view(0).inclusion_violation(), -1);

        let result = LocalSearch::new(start, Duration::from_secs(1))
            .run(&mut StdRng::seed_from_u64(8), &ticking())
            .unwrap();
        assert_eq!(result.status, SearchStatus::Converged);
        let sol = &result.solution;
        assert_ne!(sol.bag_of(0), sol.bag_of(1));
    }

    #[test]
    fn test_infeasible_problem_times_out() {
        // Three items of 4 in two bags of 5: some bag always overflows.
        let specs = vec![
            ItemSpec::new("A", 4),
            ItemSpec::new("B", 4),
            ItemSpec::new("C", 4),
        ];
        let start = placed(2, 5, specs, &[0, 0, 1]);
        let result = LocalSearch::new(start, Duration::from_millis(50))
            .run(&mut StdRng::seed_from_u64(1), &ticking())
            .unwrap();

        assert_eq!(result.status, SearchStatus::TimedOut);
        assert_eq!(result.iterations, 50);
        assert_eq!(result.score_history.len(), 50);
        assert_eq!(result.moves.len(), 50);
        assert_eq!(result.best_score, -3);
        assert!(result.score_history.iter().all(|&s| s <= result.best_score));
        assert_eq!(
            Some(&result.final_solution.total_score()),
            result.score_history.last()
        );
    }

    #[test]
    fn test_zero_budget_runs_one_iteration() {
        let start = placed(2, 5, vec![ItemSpec::new("A", 4), ItemSpec::new("B", 4)], &[0, 0]);
        let mut rng = StdRng::seed_from_u64(2);
        let clock = ManualClock::new();
        let result = LocalSearch::new(start, Duration::ZERO)
            .run(&mut rng, &clock)
            .unwrap();
        assert_eq!(result.iterations, 1);
        // the only move splits the pair
        assert_eq!(result.status, SearchStatus::Converged);
    }

    #[test]
    fn test_cancellation_flag() {
        let start = placed(2, 5, vec![ItemSpec::new("A", 4), ItemSpec::new("B", 4)], &[0, 0]);
        let flag = Arc::new(AtomicBool::new(true));
        let result = LocalSearch::new(start, Duration::from_secs(60))
            .with_cancel(Arc::clone(&flag))
            .run(&mut StdRng::seed_from_u64(0), &ManualClock::new())
            .unwrap();
        assert_eq!(result.status, SearchStatus::Cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best_score, -3);
    }

    #[test]
    fn test_single_bag_keeps_incumbent() {
        let specs = vec![ItemSpec::new("A", 3).excluding(["B"]), ItemSpec::new("B", 3)];
        let start = placed(1, 10, specs, &[0, 0]);
        let result = LocalSearch::new(start, Duration::from_millis(10))
            .run(&mut StdRng::seed_from_u64(0), &ticking())
            .unwrap();
        assert_eq!(result.status, SearchStatus::TimedOut);
        assert_eq!(result.iterations, 10);
        assert!(result.moves.is_empty());
        assert_eq!(result.best_score, -1);
    }

    #[test]
    fn test_step_picks_best_candidate() {
        // Bag 0 holds a conflicting pair, bag 1 is nearly full, bag 2 is
        // empty. Whatever item is drawn, the best target is bag 2.
        let specs = vec![
            ItemSpec::new("A", 2).excluding(["B"]),
            ItemSpec::new("B", 2),
            ItemSpec::new("C", 9),
        ];
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..20 {
            let start = placed(3, 10, specs.clone(), &[0, 0, 1]);
            let mut search = LocalSearch::new(start, Duration::from_secs(1));
            let mv = search.step(&mut rng).unwrap().unwrap();
            assert_eq!(mv.to, 2);
            let expected = if mv.from == 0 { 0 } else { -1 };
            assert_eq!(search.current().total_score(), expected);
            assert_eq!(search.iterations(), 1);
        }
    }

    #[test]
    fn test_ties_broken_at_random() {
        // Splitting the pair into any of the three empty bags scores 0.
        let specs = vec![ItemSpec::new("A", 2).excluding(["B"]), ItemSpec::new("B", 2)];
        let mut rng = StdRng::seed_from_u64(21);
        let mut targets = std::collections::BTreeSet::new();
        for _ in 0..100 {
            let start = placed(4, 10, specs.clone(), &[0, 0]);
            let mut search = LocalSearch::new(start, Duration::from_secs(1));
            let mv = search.step(&mut rng).unwrap().unwrap();
            assert_eq!(mv.from, 0);
            assert_eq!(search.current().total_score(), 0);
            targets.insert(mv.to);
        }
        assert_eq!(targets.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let problem = Arc::new(Problem::new(3, 12, pantry()).unwrap());
        let start = RandomSolutionBuilder::default()
            .build(&problem, &mut StdRng::seed_from_u64(17))
            .unwrap();

        let run = |seed: u64| {
            LocalSearch::new(start.clone(), Duration::from_millis(200))
                .run(&mut StdRng::seed_from_u64(seed), &ticking())
                .unwrap()
        };
        let a = run(5);
        let b = run(5);

        assert_eq!(a.status, b.status);
        assert_eq!(a.iterations, b.iterations);
        assert_eq!(a.moves, b.moves);
        assert_eq!(a.score_history, b.score_history);
        assert_eq!(a.solution.packing(), b.solution.packing());
    }

    #[test]
    fn test_best_tracks_history() {
        let problem = Arc::new(Problem::new(3, 12, pantry()).unwrap());
        let start = RandomSolutionBuilder::default()
            .build(&problem, &mut StdRng::seed_from_u64(3))
            .unwrap();
        let start_score = start.total_score();

        let result = LocalSearch::new(start, Duration::from_millis(100))
            .run(&mut StdRng::seed_from_u64(9), &ticking())
            .unwrap();

        assert!(result.best_score >= start_score);
        assert_eq!(result.best_score, result.solution.total_score());
        assert_eq!(result.solution.total_score(), result.solution.recompute_score());
        assert!(result.solution.is_complete());
        let max_seen = result.score_history.iter().copied().max().unwrap_or(start_score);
        assert_eq!(result.best_score, max_seen.max(start_score));
        if result.best_iteration > 0 {
            assert_eq!(result.score_history[result.best_iteration - 1], result.best_score);
        }
    }

    #[test]
    fn test_status_terminal() {
        assert!(!SearchStatus::Running.is_terminal());
        assert!(SearchStatus::Converged.is_terminal());
        assert!(SearchStatus::TimedOut.is_terminal());
        assert!(SearchStatus::Cancelled.is_terminal());
    }
}
