//! Read-only views over a solution.

use std::collections::BTreeSet;

use crate::problem::ItemId;

/// Snapshot of one bag: occupants, occupied size and cached score terms.
#[derive(Debug, Clone, Copy)]
pub struct BagView<'a> {
    pub(crate) index: usize,
    pub(crate) items: &'a BTreeSet<ItemId>,
    pub(crate) size: i64,
    pub(crate) inclusion: i64,
    pub(crate) overflow: i64,
}

impl<'a> BagView<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Occupant ids in ascending order.
    pub fn items(&self) -> &'a BTreeSet<ItemId> {
        self.items
    }

    /// Sum of occupant sizes.
    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Inclusion-violation tally (zero or negative).
    pub fn inclusion_violation(&self) -> i64 {
        self.inclusion
    }

    /// Capacity-violation term, `min(0, capacity - size)`.
    pub fn capacity_violation(&self) -> i64 {
        self.overflow
    }

    /// The bag's share of the total score.
    pub fn contribution(&self) -> i64 {
        self.inclusion + self.overflow
    }
}

/// Item names grouped by bag, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Packing {
    /// Violation score of the packed solution.
    pub score: i64,
    /// Item names per bag, bag order preserved.
    pub bags: Vec<Vec<String>>,
}
