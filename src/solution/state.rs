//! Assignment of items to bags with incrementally maintained scores.
//!
//! # Scoring
//!
//! For each bag:
//!
//! - **inclusion tally**: for every occupant, count the co-occupants
//!   outside that occupant's compatibility set and subtract the count.
//!   Pairs are judged from each side separately, so a one-way exclusion
//!   costs 1 and a mutual one costs 2.
//! - **capacity term**: `min(0, capacity - size)`.
//!
//! A bag contributes the sum of both terms and the total score is the sum
//! over bags. Zero means feasible; anything else is negative.
//!
//! Every mutation recomputes only the touched bag, then adjusts the cached
//! total by the change in that bag's contribution.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use super::view::{BagView, Packing};
use crate::error::{Error, Result};
use crate::problem::{ItemId, Problem};

#[derive(Debug, Clone, Default)]
struct Bag {
    items: BTreeSet<ItemId>,
    size: i64,
    inclusion: i64,
    overflow: i64,
}

impl Bag {
    fn contribution(&self) -> i64 {
        self.inclusion + self.overflow
    }
}

/// A (possibly partial) assignment of items to bags.
///
/// Cloning deep-copies every bag; only the [`Problem`] is shared.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_bagging::problem::{ItemSpec, Problem};
/// use u_bagging::solution::Solution;
///
/// let problem = Arc::new(Problem::new(2, 10, vec![
///     ItemSpec::new("eggs", 3).excluding(["bricks"]),
///     ItemSpec::new("bricks", 8),
/// ]).unwrap());
///
/// let mut solution = Solution::new(problem);
/// solution.add_item(0, 0).unwrap();
/// solution.add_item(0, 1).unwrap();
/// // one-way exclusion (-1) plus one unit of overflow (-1)
/// assert_eq!(solution.total_score(), -2);
///
/// solution.remove_item(0, 1).unwrap();
/// solution.add_item(1, 1).unwrap();
/// assert!(solution.is_feasible());
/// ```
#[derive(Debug, Clone)]
pub struct Solution {
    problem: Arc<Problem>,
    bags: Vec<Bag>,
    owner: Vec<Option<usize>>,
    score: i64,
}

impl Solution {
    /// Creates a solution with every bag empty.
    pub fn new(problem: Arc<Problem>) -> Self {
        let bags = vec![Bag::default(); problem.bag_count()];
        let owner = vec![None; problem.item_count()];
        Self {
            problem,
            bags,
            owner,
            score: 0,
        }
    }

    /// The problem this solution belongs to.
    pub fn problem(&self) -> &Arc<Problem> {
        &self.problem
    }

    pub fn bag_count(&self) -> usize {
        self.bags.len()
    }

    /// Returns `true` if an item of `item_size` fits in `bag` without
    /// exceeding capacity. Out-of-range bags never fit.
    pub fn fits(&self, bag: usize, item_size: i64) -> bool {
        self.bags
            .get(bag)
            .is_some_and(|b| b.size + item_size <= self.problem.capacity())
    }

    /// Places `item` into `bag` and rescores the bag.
    pub fn add_item(&mut self, bag: usize, item: ItemId) -> Result<()> {
        self.check_bag(bag)?;
        self.check_item(item)?;
        if let Some(current) = self.owner[item] {
            return Err(Error::ItemAlreadyPlaced { bag: current, item });
        }

        let target = &mut self.bags[bag];
        target.items.insert(item);
        target.size += self.problem.size(item);
        self.owner[item] = Some(bag);
        self.rescore(bag);
        Ok(())
    }

    /// Takes `item` out of `bag` and rescores the bag.
    ///
    /// Fails with [`Error::ItemNotInBag`] if the item is elsewhere; that is
    /// an internal-consistency error, never expected from correct callers.
    pub fn remove_item(&mut self, bag: usize, item: ItemId) -> Result<()> {
        self.check_bag(bag)?;
        if !self.bags[bag].items.remove(&item) {
            return Err(Error::ItemNotInBag { bag, item });
        }
        self.bags[bag].size -= self.problem.size(item);
        self.owner[item] = None;
        self.rescore(bag);
        Ok(())
    }

    /// Cached total violation score (0 = feasible, otherwise negative).
    pub fn total_score(&self) -> i64 {
        self.score
    }

    /// Returns `true` when the score is exactly zero.
    pub fn is_feasible(&self) -> bool {
        self.score == 0
    }

    /// View of a single bag.
    ///
    /// # Panics
    /// Panics if `bag >= bag_count()`.
    pub fn bag_view(&self, bag: usize) -> BagView<'_> {
        let b = &self.bags[bag];
        BagView {
            index: bag,
            items: &b.items,
            size: b.size,
            inclusion: b.inclusion,
            overflow: b.overflow,
        }
    }

    /// Views of all bags in index order.
    pub fn bags(&self) -> impl Iterator<Item = BagView<'_>> + '_ {
        (0..self.bags.len()).map(move |i| self.bag_view(i))
    }

    /// Indices of bags holding at least one item.
    pub fn non_empty_bags(&self) -> impl Iterator<Item = usize> + '_ {
        self.bags
            .iter()
            .enumerate()
            .filter_map(|(i, b)| (!b.items.is_empty()).then_some(i))
    }

    /// Bag currently holding `item`, if it has been placed.
    pub fn bag_of(&self, item: ItemId) -> Option<usize> {
        self.owner.get(item).copied().flatten()
    }

    /// Number of items currently placed.
    pub fn placed_count(&self) -> usize {
        self.owner.iter().filter(|o| o.is_some()).count()
    }

    /// Returns `true` once every item of the problem is placed.
    pub fn is_complete(&self) -> bool {
        self.owner.iter().all(Option::is_some)
    }

    /// Recomputes the total score from the stored item sets, ignoring
    /// every cached value.
    pub fn recompute_score(&self) -> i64 {
        let capacity = self.problem.capacity();
        self.bags
            .iter()
            .map(|bag| {
                let size: i64 = bag.items.iter().map(|&i| self.problem.size(i)).sum();
                inclusion_tally(&self.problem, &bag.items) + (capacity - size).min(0)
            })
            .sum()
    }

    /// Item names grouped by bag.
    pub fn packing(&self) -> Packing {
        Packing {
            score: self.score,
            bags: self
                .bags
                .iter()
                .map(|bag| {
                    bag.items
                        .iter()
                        .map(|&i| self.problem.name(i).to_string())
                        .collect()
                })
                .collect(),
        }
    }

    fn rescore(&mut self, bag: usize) {
        let capacity = self.problem.capacity();
        let b = &mut self.bags[bag];
        let before = b.contribution();
        b.inclusion = inclusion_tally(&self.problem, &b.items);
        b.overflow = (capacity - b.size).min(0);
        self.score += b.contribution() - before;
    }

    fn check_bag(&self, bag: usize) -> Result<()> {
        if bag < self.bags.len() {
            Ok(())
        } else {
            Err(Error::BagOutOfRange {
                bag,
                bag_count: self.bags.len(),
            })
        }
    }

    fn check_item(&self, item: ItemId) -> Result<()> {
        if item < self.owner.len() {
            Ok(())
        } else {
            Err(Error::ItemOutOfRange {
                item,
                item_count: self.owner.len(),
            })
        }
    }
}

/// Negative count of (occupant, co-occupant) pairs where the co-occupant is
/// outside the occupant's compatibility set.
fn inclusion_tally(problem: &Problem, items: &BTreeSet<ItemId>) -> i64 {
    let mut tally = 0i64;
    for &owner in items {
        let compat = problem.compatibility(owner);
        let rejected = items.iter().filter(|&&other| !compat.contains(other)).count();
        tally -= rejected as i64;
    }
    tally
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution score: {}", self.score)?;
        for bag in &self.bags {
            let names: Vec<&str> = bag.items.iter().map(|&i| self.problem.name(i)).collect();
            writeln!(f, "[{}]", names.join(", "))?;
        }
        Ok(())
    }
}
