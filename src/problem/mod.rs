//! Problem definition.
//!
//! A problem is a fixed list of items, a number of bags and one capacity
//! shared by every bag. Each item carries a compatibility rule naming the
//! items it may (or may not) share a bag with; rules are resolved to id
//! sets once, at construction.

mod definition;
mod types;

pub use definition::Problem;
pub use types::{CompatibilityRule, CompatibilitySet, Item, ItemId, ItemSpec};
