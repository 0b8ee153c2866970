//! Relocate-one-item neighborhood.

use rand::Rng;

use crate::error::{Error, Result};
use crate::problem::ItemId;
use crate::solution::Solution;

/// Relocation of a single item between bags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub item: ItemId,
    pub from: usize,
    pub to: usize,
}

/// A fully scored solution produced by applying one [`Move`].
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The move that produced this candidate.
    pub mv: Move,
    /// The resulting solution (an independent copy).
    pub solution: Solution,
}

impl Candidate {
    /// Score of the resulting solution.
    pub fn score(&self) -> i64 {
        self.solution.total_score()
    }
}

/// Generates the candidates of one search step.
pub struct MoveGenerator;

impl MoveGenerator {
    /// Picks a random non-empty bag and a random item in it, then returns
    /// one candidate per other bag with the item moved there.
    ///
    /// Targets are not filtered by fit: an overflowing candidate is simply
    /// scored with its capacity penalty. A solution with `n` bags yields
    /// `n - 1` candidates. Fails with [`Error::NoPlacedItems`] if every bag
    /// is empty.
    pub fn generate<R: Rng>(solution: &Solution, rng: &mut R) -> Result<Vec<Candidate>> {
        if solution.non_empty_bags().next().is_none() {
            return Err(Error::NoPlacedItems);
        }

        let bag_count = solution.bag_count();
        let from = loop {
            let bag = rng.random_range(0..bag_count);
            if !solution.bag_view(bag).is_empty() {
                break bag;
            }
        };

        let occupants = solution.bag_view(from).items();
        let pick = rng.random_range(0..occupants.len());
        let item = occupants
            .iter()
            .nth(pick)
            .copied()
            .ok_or(Error::NoPlacedItems)?;

        let mut base = solution.clone();
        base.remove_item(from, item)?;

        (0..bag_count)
            .filter(|&to| to != from)
            .map(|to| {
                let mut next = base.clone();
                next.add_item(to, item)?;
                Ok(Candidate {
                    mv: Move { item, from, to },
                    solution: next,
                })
            })
            .collect()
    }
}
