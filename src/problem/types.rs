//! Item descriptions and compatibility sets.

/// Dense item identifier in `0..item_count`.
pub type ItemId = usize;

/// How an item decides which other items it may share a bag with.
///
/// Rules are evaluated from the declaring item's side only: if `eggs`
/// excludes `bricks` but `bricks` is universal, a bag holding both is
/// penalised once (from the eggs' perspective), not twice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompatibilityRule {
    /// Compatible with every item.
    #[default]
    Universal,
    /// Compatible only with itself and the named items.
    Inclusive(Vec<String>),
    /// Compatible with every item except the named ones.
    Exclusive(Vec<String>),
}

impl CompatibilityRule {
    /// Names referenced by the rule (empty for [`CompatibilityRule::Universal`]).
    pub fn companions(&self) -> &[String] {
        match self {
            CompatibilityRule::Universal => &[],
            CompatibilityRule::Inclusive(names) | CompatibilityRule::Exclusive(names) => names,
        }
    }
}

/// Name-based description of an item, as read from input.
///
/// # Examples
///
/// ```
/// use u_bagging::problem::{CompatibilityRule, ItemSpec};
///
/// let eggs = ItemSpec::new("eggs", 2).excluding(["bricks"]);
/// assert_eq!(eggs.rule, CompatibilityRule::Exclusive(vec!["bricks".into()]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemSpec {
    /// Unique item name.
    pub name: String,
    /// Space the item occupies in a bag.
    pub size: i64,
    /// Compatibility rule.
    pub rule: CompatibilityRule,
}

impl ItemSpec {
    /// Creates a universally compatible item.
    pub fn new(name: impl Into<String>, size: i64) -> Self {
        Self {
            name: name.into(),
            size,
            rule: CompatibilityRule::Universal,
        }
    }

    /// Restricts the item to share bags only with the named items.
    pub fn including<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule = CompatibilityRule::Inclusive(names.into_iter().map(Into::into).collect());
        self
    }

    /// Forbids the item from sharing a bag with the named items.
    pub fn excluding<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule = CompatibilityRule::Exclusive(names.into_iter().map(Into::into).collect());
        self
    }
}

/// Set of item ids an item may share a bag with. Always contains the
/// owning item itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilitySet {
    members: Vec<bool>,
}

impl CompatibilitySet {
    pub(crate) fn empty(item_count: usize) -> Self {
        Self {
            members: vec![false; item_count],
        }
    }

    pub(crate) fn full(item_count: usize) -> Self {
        Self {
            members: vec![true; item_count],
        }
    }

    pub(crate) fn insert(&mut self, id: ItemId) {
        self.members[id] = true;
    }

    pub(crate) fn remove(&mut self, id: ItemId) {
        self.members[id] = false;
    }

    /// Returns `true` if `id` is a member. Ids outside the universe are not.
    #[inline]
    pub fn contains(&self, id: ItemId) -> bool {
        self.members.get(id).copied().unwrap_or(false)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.iter().filter(|&&m| m).count()
    }

    /// Returns `true` if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Member ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter_map(|(id, &m)| m.then_some(id))
    }
}

/// A resolved item: dense id, size and compatibility set.
#[derive(Debug, Clone)]
pub struct Item {
    pub(crate) id: ItemId,
    pub(crate) name: String,
    pub(crate) size: i64,
    pub(crate) compatibility: CompatibilitySet,
}

impl Item {
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn compatibility(&self) -> &CompatibilitySet {
        &self.compatibility
    }

    /// Returns `true` if this item accepts `other` as a bag-mate.
    #[inline]
    pub fn accepts(&self, other: ItemId) -> bool {
        self.compatibility.contains(other)
    }
}
