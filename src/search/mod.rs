//! Randomized local search.
//!
//! A search starts from a random capacity-respecting packing and then
//! repeatedly pulls one random item out of a random bag, tries it in every
//! other bag, and keeps the best-scoring result (ties broken at random).
//! It stops when the score reaches 0 or the time budget runs out.
//! [`Solver`] restarts from fresh random packings until one converges.
//!
//! All randomness is threaded through an explicit [`rand::Rng`] and all
//! timing through a [`Clock`], so runs are reproducible under a fixed seed
//! and a [`ManualClock`].

mod builder;
mod clock;
mod config;
mod moves;
mod runner;
mod solver;

pub use builder::RandomSolutionBuilder;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{SearchConfig, DEFAULT_MAX_DRAWS};
pub use moves::{Candidate, Move, MoveGenerator};
pub use runner::{LocalSearch, SearchResult, SearchStatus};
pub use solver::{create_rng, SolveReport, Solver};
