//! Constrained segmentation by dynamic programming.
//!
//! - [`problem`]: states, successor enumeration and transition costs
//! - [`solver`]: memoized fixed-count search with an explicit worklist
//! - [`controller`]: fragment-count search and the chunked fallback

pub mod controller;
pub mod problem;
pub mod solver;

pub use controller::{fragment_count_bounds, optimize_fragments};
pub use problem::{SegmentationProblem, SegmentationState, Successor};
pub use solver::FixedCountSolver;
