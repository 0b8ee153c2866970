//! Random starting solutions.

use std::sync::Arc;

use rand::Rng;

use super::config::DEFAULT_MAX_DRAWS;
use crate::error::{Error, Result};
use crate::problem::Problem;
use crate::solution::Solution;

/// Builds complete solutions by dropping each item into a uniformly random
/// bag that still has room for it.
///
/// The result respects capacity but not necessarily compatibility. Items
/// larger than the capacity are rejected up front; an item that finds no
/// room within `max_draws` draws fails the build instead of looping.
#[derive(Debug, Clone, Copy)]
pub struct RandomSolutionBuilder {
    max_draws: usize,
}

impl Default for RandomSolutionBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DRAWS)
    }
}

impl RandomSolutionBuilder {
    pub fn new(max_draws: usize) -> Self {
        Self { max_draws }
    }

    pub fn max_draws(&self) -> usize {
        self.max_draws
    }

    /// Places every item, in id order.
    pub fn build<R: Rng>(&self, problem: &Arc<Problem>, rng: &mut R) -> Result<Solution> {
        if let Some(item) = problem.oversized_items().next() {
            return Err(Error::ItemNeverFits {
                item: item.name().to_string(),
                size: item.size(),
                capacity: problem.capacity(),
            });
        }

        let mut solution = Solution::new(Arc::clone(problem));
        for item in problem.items() {
            let bag = (0..self.max_draws)
                .map(|_| rng.random_range(0..problem.bag_count()))
                .find(|&bag| solution.fits(bag, item.size()))
                .ok_or_else(|| Error::PlacementExhausted {
                    item: item.name().to_string(),
                    draws: self.max_draws,
                })?;
            solution.add_item(bag, item.id())?;
        }

        log::debug!(
            "random start built: {} items, score {}",
            solution.placed_count(),
            solution.total_score()
        );
        Ok(solution)
    }
}
