//! Segmentation algorithms.
//!
//! ## Modules
//!
//! - [`dynamic_programming`]: Fixed-count DP solver and the controller that
//!   searches fragment counts
//! - [`cancellation`]: Cooperative cancellation token checked during solving
//!
//! ## Algorithm Overview
//!
//! For a fixed fragment count `n` the solver walks states `(s, e, k)`: the
//! next fragment starts at `s`, the previous one ended at `e`, and `k`
//! fragments remain. Moving to `(s', e', k - 1)` places an overlap on
//! `[s', e']` and costs the risk summed over it:
//!
//! ```text
//! value(s, e, k) = min over successors of combine(risk(s'..e'), value(s', e', k - 1))
//! value(L, L, 0) = 0
//! ```
//!
//! `combine` is `+` for the sum objective and `max` for the minimax
//! objective. The controller repeats this for every feasible `n` and keeps
//! the cheapest partition.

pub mod cancellation;
pub mod dynamic_programming;

pub use cancellation::CancellationToken;
pub use dynamic_programming::{fragment_count_bounds, optimize_fragments};
