//! # Synthcut - Risk Profiling and Optimal Fragmentation
//!
//! Decides where to cut a long DNA sequence into overlapping fragments that
//! can be ordered for synthesis.
//!
//! ## Overview
//!
//! Synthesis gets harder where GC content leaves a safe band, where the
//! sequence matches itself or the cloning backbone, where hairpins form and
//! where it repeats. Overlaps between fragments have to be synthesized and
//! annealed, so they should sit where all of this is quiet.
//!
//! Synthcut works in two stages:
//!
//! 1. **Risk profiling**: each enabled signal is computed, normalized to a
//!    common non-negative scale and summed into one value per base
//! 2. **Segmentation**: a constrained dynamic program places fragments of
//!    bounded length with bounded overlaps, minimizing either the total or
//!    the worst overlap risk
//!
//! ## Quick Start
//!
//! ```rust
//! use synthcut_core::FragmentPlanner;
//! use synthcut_core::config::SynthcutConfig;
//!
//! let mut config = SynthcutConfig::default();
//! config.fragmentation.min_length = 50;
//! config.fragmentation.max_length = 70;
//! config.fragmentation.min_overlap = 5;
//! config.fragmentation.max_overlap = 10;
//!
//! let planner = FragmentPlanner::new(config);
//! let results = planner.analyze_sequence(&"ACGT".repeat(30), Some("demo".to_string()))?;
//!
//! for fragment in &results.partition.fragments {
//!     println!("{fragment}");
//! }
//! # Ok::<(), synthcut_core::types::SynthcutError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`config`]: Fragmentation and scoring configuration, TOML loading
//! - [`engine`]: [`FragmentPlanner`] and the per-sequence job pipeline
//! - [`types`]: Fragments, partitions and the error type
//! - [`results`]: Per-sequence and batch results
//! - [`sequence`]: Sequence validation, FASTA input and windowing
//! - [`signals`]: Signal-source traits and in-process sources
//! - [`risk`]: Normalization and aggregation into a risk profile
//! - [`algorithms`]: Segmentation dynamic program and cancellation
//! - [`output`]: TSV, GFF3, BED and risk-track writers
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, SynthcutError>`](types::SynthcutError).

pub mod algorithms;
pub mod config;
pub mod constants;
pub mod engine;
pub mod output;
pub mod results;
pub mod risk;
pub mod sequence;
pub mod signals;
pub mod types;

pub use algorithms::CancellationToken;
pub use engine::FragmentPlanner;
pub use types::SynthcutError;
