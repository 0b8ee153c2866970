//! Error types.
//!
//! Errors fall into three groups:
//!
//! - **Configuration**: the problem description or search settings can
//!   never work (unknown companion names, an item larger than any bag).
//!   These are reported immediately and never retried.
//! - **Internal consistency**: a solution was asked to do something that
//!   correct move generation never asks for (removing an item that is not
//!   in the bag). These abort the current search.
//! - **Input**: parse and I/O failures from [`crate::parse`].
//!
//! Running out of time is not an error; see
//! [`SearchStatus::TimedOut`](crate::search::SearchStatus::TimedOut).

use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by problem construction, solution mutation and search.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The problem declares no bags.
    #[error("bag count must be at least 1")]
    NoBags,

    /// Two items share the same name.
    #[error("duplicate item name: {0}")]
    DuplicateItem(String),

    /// An item size is zero or negative.
    #[error("item {item} has non-positive size {size}")]
    InvalidItemSize { item: String, size: i64 },

    /// A compatibility rule names an item that does not exist.
    #[error("item {item} names unknown companion {companion}")]
    UnknownCompanion { item: String, companion: String },

    /// An item is larger than the uniform bag capacity.
    #[error("item {item} (size {size}) can never fit a bag of capacity {capacity}")]
    ItemNeverFits {
        item: String,
        size: i64,
        capacity: i64,
    },

    /// Random placement gave up after the configured number of draws.
    #[error("no bag with room for item {item} after {draws} draws")]
    PlacementExhausted { item: String, draws: usize },

    /// Search settings are unusable.
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),

    /// A bag index is outside `0..bag_count`.
    #[error("bag index {bag} out of range (bag count {bag_count})")]
    BagOutOfRange { bag: usize, bag_count: usize },

    /// An item id is outside `0..item_count`.
    #[error("item id {item} out of range (item count {item_count})")]
    ItemOutOfRange { item: usize, item_count: usize },

    /// The item is already assigned to a bag.
    #[error("item {item} is already placed in bag {bag}")]
    ItemAlreadyPlaced { bag: usize, item: usize },

    /// Internal consistency: the item is not in the bag it was removed from.
    #[error("couldn't remove item {item} from bag {bag}: not present")]
    ItemNotInBag { bag: usize, item: usize },

    /// Move generation was asked to act on a solution with no placed items.
    #[error("solution has no placed items to move")]
    NoPlacedItems,

    /// Malformed problem text.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The problem file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns `true` for errors caused by the problem or configuration
    /// rather than by a defect in the search itself.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::NoBags
                | Error::DuplicateItem(_)
                | Error::InvalidItemSize { .. }
                | Error::UnknownCompanion { .. }
                | Error::ItemNeverFits { .. }
                | Error::PlacementExhausted { .. }
                | Error::InvalidConfig(_)
        )
    }

    /// Returns `true` when the error means the file was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
