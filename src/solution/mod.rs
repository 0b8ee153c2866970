//! Solution representation with incremental constraint scoring.

mod state;
mod view;

pub use state::Solution;
pub use view::{BagView, Packing};
