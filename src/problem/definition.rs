//! Immutable problem definition.

use std::collections::HashMap;

use super::types::{CompatibilityRule, CompatibilitySet, Item, ItemId, ItemSpec};
use crate::error::{Error, Result};

/// Items, bag count and uniform bag capacity, with every item's
/// compatibility set resolved to ids.
///
/// Built once and shared (behind an `Arc`) by every solution derived
/// from it.
///
/// # Examples
///
/// ```
/// use u_bagging::problem::{ItemSpec, Problem};
///
/// let problem = Problem::new(2, 10, vec![
///     ItemSpec::new("eggs", 3).excluding(["bricks"]),
///     ItemSpec::new("bricks", 6),
///     ItemSpec::new("bread", 3),
/// ]).unwrap();
///
/// let eggs = problem.id_of("eggs").unwrap();
/// let bricks = problem.id_of("bricks").unwrap();
/// assert!(!problem.compatibility(eggs).contains(bricks));
/// assert!(problem.compatibility(bricks).contains(eggs));
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    bag_count: usize,
    capacity: i64,
    items: Vec<Item>,
    name_to_id: HashMap<String, ItemId>,
}

impl Problem {
    /// Resolves item specs into a problem definition.
    ///
    /// Ids are assigned in input order. Fails if there are no bags, the
    /// capacity is negative, a size is not positive, the sizes do not sum
    /// within `i64`, a name repeats, or a rule names an unknown item.
    pub fn new(bag_count: usize, capacity: i64, specs: Vec<ItemSpec>) -> Result<Self> {
        if bag_count == 0 {
            return Err(Error::NoBags);
        }
        if capacity < 0 {
            return Err(Error::InvalidConfig(format!(
                "capacity must be non-negative, got {capacity}"
            )));
        }

        let mut name_to_id = HashMap::with_capacity(specs.len());
        for (id, spec) in specs.iter().enumerate() {
            if spec.size <= 0 {
                return Err(Error::InvalidItemSize {
                    item: spec.name.clone(),
                    size: spec.size,
                });
            }
            if name_to_id.insert(spec.name.clone(), id).is_some() {
                return Err(Error::DuplicateItem(spec.name.clone()));
            }
        }

        specs
            .iter()
            .try_fold(0i64, |total, spec| total.checked_add(spec.size))
            .ok_or_else(|| {
                Error::InvalidConfig("total item size overflows a 64-bit integer".into())
            })?;

        let n = specs.len();
        let mut items = Vec::with_capacity(n);
        for (id, spec) in specs.into_iter().enumerate() {
            let companions = spec
                .rule
                .companions()
                .iter()
                .map(|name| {
                    name_to_id
                        .get(name)
                        .copied()
                        .ok_or_else(|| Error::UnknownCompanion {
                            item: spec.name.clone(),
                            companion: name.clone(),
                        })
                })
                .collect::<Result<Vec<ItemId>>>()?;

            let mut compatibility = match spec.rule {
                CompatibilityRule::Universal => CompatibilitySet::full(n),
                CompatibilityRule::Inclusive(_) => {
                    let mut set = CompatibilitySet::empty(n);
                    companions.iter().for_each(|&c| set.insert(c));
                    set
                }
                CompatibilityRule::Exclusive(_) => {
                    let mut set = CompatibilitySet::full(n);
                    companions.iter().for_each(|&c| set.remove(c));
                    set
                }
            };
            // An item never conflicts with itself, even if it names itself.
            compatibility.insert(id);

            items.push(Item {
                id,
                name: spec.name,
                size: spec.size,
                compatibility,
            });
        }

        log::debug!(
            "problem resolved: {} items, {} bags, capacity {}",
            items.len(),
            bag_count,
            capacity
        );

        Ok(Self {
            bag_count,
            capacity,
            items,
            name_to_id,
        })
    }

    /// Number of bags.
    pub fn bag_count(&self) -> usize {
        self.bag_count
    }

    /// Capacity shared by every bag.
    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// All items, indexed by id.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Item by id.
    ///
    /// # Panics
    /// Panics if `id >= item_count()`.
    pub fn item(&self, id: ItemId) -> &Item {
        &self.items[id]
    }

    /// Size of an item.
    pub fn size(&self, id: ItemId) -> i64 {
        self.items[id].size
    }

    /// Resolved compatibility set of an item (always contains the item).
    pub fn compatibility(&self, id: ItemId) -> &CompatibilitySet {
        &self.items[id].compatibility
    }

    /// Name of an item.
    pub fn name(&self, id: ItemId) -> &str {
        &self.items[id].name
    }

    /// Looks up an item id by name.
    pub fn id_of(&self, name: &str) -> Option<ItemId> {
        self.name_to_id.get(name).copied()
    }

    /// Sum of all item sizes. Never overflows: construction rejects
    /// problems whose sizes don't sum within `i64`.
    pub fn total_size(&self) -> i64 {
        self.items.iter().map(|item| item.size).sum()
    }

    /// Items whose size exceeds the bag capacity.
    pub fn oversized_items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter().filter(|item| item.size > self.capacity)
    }
}
