//! Constraint-aware bag packing by randomized local search.
//!
//! Items with sizes and compatibility rules are packed into a fixed number
//! of bags sharing one capacity. A packing is scored by how badly it
//! violates the constraints:
//!
//! - **Capacity**: each bag contributes `min(0, capacity - load)`.
//! - **Compatibility**: each item contributes minus the number of its
//!   bag-mates outside its compatibility set.
//!
//! A score of 0 is a feasible packing; every other score is negative.
//!
//! # Modules
//!
//! - [`problem`]: immutable item/bag description with resolved
//!   compatibility sets.
//! - [`solution`]: assignment of items to bags with per-bag scores kept up
//!   to date on every add/remove.
//! - [`search`]: random construction, relocate-one-item moves, the local
//!   search driver and the restarting solver.
//! - [`parse`]: the plain-text problem format.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use u_bagging::parse::parse_problem;
//! use u_bagging::search::{SearchConfig, Solver};
//!
//! let problem = Arc::new(parse_problem("
//!     2
//!     10
//!     bread 3 - bleach
//!     bleach 4
//!     apples 5
//! ").unwrap());
//!
//! let config = SearchConfig::default().with_time_limit_secs(1).with_seed(7);
//! let report = Solver::solve(&problem, &config).unwrap();
//! assert!(report.is_success());
//! println!("{}", report.solution);
//! ```

pub mod error;
pub mod parse;
pub mod problem;
pub mod search;
pub mod solution;

pub use error::{Error, Result};
