use std::ops::RangeInclusive;

use tracing::{debug, info};

use crate::algorithms::cancellation::CancellationToken;
use crate::algorithms::dynamic_programming::problem::SegmentationProblem;
use crate::algorithms::dynamic_programming::solver::FixedCountSolver;
use crate::config::FragmentationConfig;
use crate::risk::RiskProfile;
use crate::types::{Fragment, Partition, SynthcutError};

/// Range of fragment counts that can cover `length` bases.
///
/// ```text
/// n_min = max(1, ceil((L - o_min) / (l_max - o_min)))
/// n_max = min(floor((L - o_max) / (l_min - o_max)), max_fragments)
/// ```
///
/// # Errors
///
/// Returns [`SynthcutError::InfeasiblePartition`] if the range is empty.
pub fn fragment_count_bounds(
    length: usize,
    config: &FragmentationConfig,
) -> Result<(usize, usize), SynthcutError> {
    let length = length as i64;
    let (l_min, l_max) = (config.min_length as i64, config.max_length as i64);
    let (o_min, o_max) = (config.min_overlap as i64, config.max_overlap as i64);

    let widest = l_max - o_min;
    let narrowest = l_min - o_max;
    if widest <= 0 || narrowest <= 0 {
        return Err(SynthcutError::InvalidConfig(format!(
            "fragment lengths [{}, {}] do not exceed overlaps [{}, {}]",
            l_min, l_max, o_min, o_max
        )));
    }

    let n_min = (-(-(length - o_min)).div_euclid(widest)).max(1);
    let n_max = (length - o_max)
        .div_euclid(narrowest)
        .min(config.max_fragments as i64);

    if n_max < n_min {
        return Err(SynthcutError::InfeasiblePartition(format!(
            "no fragment count fits {length} bp: need at least {n_min}, at most {n_max} allowed"
        )));
    }
    Ok((n_min as usize, n_max as usize))
}

/// Finds the cheapest partition of `profile` over all feasible counts.
///
/// Profiles longer than `config.chunk_cap` are cut chunk by chunk, see
/// [`optimize_chunked`].
///
/// # Errors
///
/// - [`SynthcutError::InvalidConfig`] before any search if `config` is invalid
/// - [`SynthcutError::InfeasiblePartition`] if no count admits a partition
/// - [`SynthcutError::CancellationRequested`] if `cancellation` fires
///
/// # Examples
///
/// ```rust
/// use synthcut_core::algorithms::optimize_fragments;
/// use synthcut_core::config::{FragmentationConfig, Objective};
/// use synthcut_core::risk::RiskProfile;
///
/// let profile = RiskProfile::new(vec![1.0; 120])?;
/// let config = FragmentationConfig {
///     min_length: 50,
///     max_length: 70,
///     min_overlap: 5,
///     max_overlap: 10,
///     max_fragments: 5,
///     objective: Objective::Max,
///     ..Default::default()
/// };
///
/// let partition = optimize_fragments(&profile, &config, None)?;
/// assert_eq!(partition.len(), 2);
/// assert_eq!(partition.cost, 5.0);
/// # Ok::<(), synthcut_core::types::SynthcutError>(())
/// ```
pub fn optimize_fragments(
    profile: &RiskProfile,
    config: &FragmentationConfig,
    cancellation: Option<&CancellationToken>,
) -> Result<Partition, SynthcutError> {
    config.validate()?;

    if profile.len() > config.chunk_cap {
        return optimize_chunked(profile, config, cancellation);
    }
    let partition = optimize_whole(profile, config, config.max_fragments, cancellation)?;
    partition.validate(config, profile.len())?;
    Ok(partition)
}

/// Solves every feasible count with at most `budget` fragments and keeps
/// the lexicographically smallest `(cost, count, starts)`.
fn optimize_whole(
    profile: &RiskProfile,
    config: &FragmentationConfig,
    budget: usize,
    cancellation: Option<&CancellationToken>,
) -> Result<Partition, SynthcutError> {
    let bounded = FragmentationConfig {
        max_fragments: budget,
        ..config.clone()
    };
    let (n_min, n_max) = fragment_count_bounds(profile.len(), &bounded)?;
    best_over_counts(profile, &bounded, n_min..=n_max, cancellation)
}

/// Solves each count of `counts` and keeps the cheapest partition.
///
/// A count whose search fails is skipped; only when every count fails is
/// the result [`SynthcutError::InfeasiblePartition`].
fn best_over_counts(
    profile: &RiskProfile,
    config: &FragmentationConfig,
    counts: RangeInclusive<usize>,
    cancellation: Option<&CancellationToken>,
) -> Result<Partition, SynthcutError> {
    let (n_min, n_max) = (*counts.start(), *counts.end());
    let mut best: Option<Partition> = None;

    for n in counts {
        if let Some(token) = cancellation {
            token.check()?;
        }

        let problem = SegmentationProblem::new(profile, config, n);
        let mut solver = FixedCountSolver::new(problem, config.objective).with_cancellation(cancellation);
        match solver.solve() {
            Ok(partition) => {
                debug!(
                    fragments = n,
                    cost = partition.cost,
                    states = solver.states_explored(),
                    "fixed-count solve finished"
                );
                // counts are visited in ascending order, and each count has
                // a single optimum, so a tie on cost keeps the earlier one
                let improves = best
                    .as_ref()
                    .is_none_or(|current| partition.cost.total_cmp(&current.cost).is_lt());
                if improves {
                    best = Some(partition);
                }
            }
            Err(SynthcutError::CancellationRequested) => {
                return Err(SynthcutError::CancellationRequested);
            }
            Err(e) => debug!(fragments = n, error = %e, "fragment count excluded"),
        }
    }

    best.ok_or_else(|| {
        SynthcutError::InfeasiblePartition(format!(
            "no fragment count in [{n_min}, {n_max}] admits a partition of {} bp",
            profile.len()
        ))
    })
}

/// Cuts a profile longer than the chunk cap.
///
/// Each round solves the next `chunk_cap` bases as if they were the whole
/// sequence, keeps the fragments before the first start from which the
/// rest of the sequence fits in one chunk (or all but the last fragment
/// when none does), and resumes at that start. The tail is solved directly.
/// The fragment budget is shared between rounds. The stitched partition is
/// valid but not necessarily globally optimal; its cost is recomputed over
/// the full profile.
fn optimize_chunked(
    profile: &RiskProfile,
    config: &FragmentationConfig,
    cancellation: Option<&CancellationToken>,
) -> Result<Partition, SynthcutError> {
    let length = profile.len();
    let cap = config.chunk_cap;
    let mut kept: Vec<Fragment> = Vec::new();
    let mut offset = 1;

    info!(length, chunk_cap = cap, "sequence exceeds chunk cap, solving in chunks");

    while length - offset + 1 > cap {
        let budget = remaining_budget(config, &kept)?;
        let chunk = profile.slice(offset, offset + cap - 1)?;
        let partial = optimize_whole(&chunk, config, budget, cancellation)?;
        let fragments: Vec<Fragment> = partial
            .fragments
            .iter()
            .map(|f| f.shifted(offset - 1))
            .collect();

        if fragments.len() < 2 {
            return Err(SynthcutError::InfeasiblePartition(format!(
                "chunk starting at {offset} produced a single fragment"
            )));
        }
        let resume = (1..fragments.len())
            .find(|&j| length - fragments[j].start < cap)
            .unwrap_or(fragments.len() - 1);

        debug!(
            offset,
            kept = resume,
            next_offset = fragments[resume].start,
            "chunk solved"
        );
        kept.extend_from_slice(&fragments[..resume]);
        offset = fragments[resume].start;
    }

    let budget = remaining_budget(config, &kept)?;
    let tail = profile.slice(offset, length)?;
    let tail_partition = optimize_whole(&tail, config, budget, cancellation)?;
    kept.extend(tail_partition.fragments.iter().map(|f| f.shifted(offset - 1)));

    let mut partition = Partition {
        fragments: kept,
        cost: 0.0,
        objective: config.objective,
    };
    partition.cost = partition.evaluate_cost(profile, config.objective);
    partition.validate(config, length)?;
    Ok(partition)
}

fn remaining_budget(config: &FragmentationConfig, kept: &[Fragment]) -> Result<usize, SynthcutError> {
    match config.max_fragments.checked_sub(kept.len()) {
        Some(budget) if budget > 0 => Ok(budget),
        _ => Err(SynthcutError::InfeasiblePartition(format!(
            "fragment budget of {} exhausted after {} bp",
            config.max_fragments,
            kept.last().map_or(0, |f| f.end)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::dynamic_programming::problem::SegmentationState;
    use crate::config::Objective;

    fn config(objective: Objective) -> FragmentationConfig {
        FragmentationConfig {
            min_length: 50,
            max_length: 70,
            min_overlap: 5,
            max_overlap: 10,
            max_fragments: 5,
            objective,
            chunk_cap: 1000,
        }
    }

    /// Every valid partition of `[1, length]`, as fragment lists.
    fn enumerate_partitions(length: usize, config: &FragmentationConfig) -> Vec<Vec<Fragment>> {
        fn extend(
            current: &mut Vec<Fragment>,
            start: usize,
            length: usize,
            config: &FragmentationConfig,
            out: &mut Vec<Vec<Fragment>>,
        ) {
            if current.len() >= config.max_fragments {
                return;
            }
            for len in config.min_length..=config.max_length {
                let end = start + len - 1;
                if end == length {
                    current.push(Fragment::new(start, end));
                    out.push(current.clone());
                    current.pop();
                } else if end < length {
                    for overlap in config.min_overlap..=config.max_overlap {
                        current.push(Fragment::new(start, end));
                        extend(current, end + 1 - overlap, length, config, out);
                        current.pop();
                    }
                }
            }
        }

        let mut out = Vec::new();
        extend(&mut Vec::new(), 1, length, config, &mut out);
        out
    }

    fn pseudo_random_profile(length: usize, seed: u64) -> RiskProfile {
        let mut state = seed;
        let values = (0..length)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                ((state >> 33) % 100) as f64 / 10.0
            })
            .collect();
        RiskProfile::new(values).unwrap()
    }

    #[test]
    fn test_fragment_count_bounds() {
        assert_eq!(fragment_count_bounds(120, &config(Objective::Max)).unwrap(), (2, 2));

        let defaults = FragmentationConfig::default();
        // ceil(9950 / 1694) = 6, floor(9950 / 950) = 10
        assert_eq!(fragment_count_bounds(10_000, &defaults).unwrap(), (6, 10));

        // shorter than one fragment
        assert!(matches!(
            fragment_count_bounds(30, &config(Objective::Max)),
            Err(SynthcutError::InfeasiblePartition(_))
        ));
    }

    #[test]
    fn test_uniform_scenario() {
        let profile = RiskProfile::new(vec![1.0; 120]).unwrap();
        for objective in [Objective::Max, Objective::Sum] {
            let partition = optimize_fragments(&profile, &config(objective), None).unwrap();
            assert_eq!(partition.len(), 2);
            assert_eq!(partition.cost, 5.0);
            let overlap = partition.overlaps()[0];
            assert!((5..=10).contains(&overlap));
            assert!(partition.validate(&config(objective), 120).is_ok());
        }
    }

    #[test]
    fn test_invalid_config_rejected_before_search() {
        let profile = RiskProfile::new(vec![1.0; 120]).unwrap();
        let config = FragmentationConfig {
            min_length: 10,
            max_length: 20,
            min_overlap: 5,
            max_overlap: 15,
            ..config(Objective::Max)
        };
        let token = CancellationToken::new();
        token.cancel();
        // a cancelled token would be noticed by the first expansion
        assert!(matches!(
            optimize_fragments(&profile, &config, Some(&token)),
            Err(SynthcutError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_profile_costs_nothing() {
        let profile = RiskProfile::zeros(300).unwrap();
        let partition = optimize_fragments(&profile, &config(Objective::Max), None).unwrap();
        assert_eq!(partition.cost, 0.0);
        // smallest feasible count wins the tie
        assert_eq!(partition.len(), 5);
        assert!(partition.validate(&config(Objective::Max), 300).is_ok());
    }

    #[test]
    fn test_homology_region_is_avoided() {
        let mut values = vec![0.0; 120];
        values[9..30].fill(5.0);
        let profile = RiskProfile::new(values).unwrap();
        let config = FragmentationConfig {
            min_length: 15,
            max_length: 40,
            min_overlap: 3,
            max_overlap: 5,
            max_fragments: 10,
            objective: Objective::Max,
            chunk_cap: 1000,
        };

        let partition = optimize_fragments(&profile, &config, None).unwrap();
        assert_eq!(partition.cost, 0.0);
        for region in partition.overlap_regions() {
            assert!(region.end < 10 || region.start > 30, "overlap {region} hits the repeat");
        }
    }

    #[test]
    fn test_matches_brute_force() {
        // equal min/max length keeps every candidate end in the search
        let config = FragmentationConfig {
            min_length: 10,
            max_length: 10,
            min_overlap: 1,
            max_overlap: 4,
            max_fragments: 6,
            objective: Objective::Max,
            chunk_cap: 1000,
        };
        let candidates = enumerate_partitions(40, &config);
        assert!(!candidates.is_empty());

        for seed in 1..=5 {
            let profile = pseudo_random_profile(40, seed);
            for objective in [Objective::Max, Objective::Sum] {
                let brute = candidates
                    .iter()
                    .map(|fragments| {
                        Partition {
                            fragments: fragments.clone(),
                            cost: 0.0,
                            objective,
                        }
                        .evaluate_cost(&profile, objective)
                    })
                    .fold(f64::INFINITY, f64::min);

                let config = FragmentationConfig {
                    objective,
                    ..config.clone()
                };
                let partition = optimize_fragments(&profile, &config, None).unwrap();
                assert!(
                    (partition.cost - brute).abs() < 1e-9,
                    "seed {seed} {objective}: dp {} vs brute {brute}",
                    partition.cost
                );
            }
        }
    }

    /// Optimum over every path of the successor graph, without memoization.
    fn exhaustive_cost(
        problem: &SegmentationProblem<'_>,
        state: SegmentationState,
        objective: Objective,
    ) -> Option<f64> {
        if problem.is_terminal(&state) {
            return Some(objective.identity());
        }
        problem
            .successors(&state)
            .ok()?
            .iter()
            .filter_map(|s| {
                exhaustive_cost(problem, s.state, objective).map(|f| objective.combine(s.cost, f))
            })
            .reduce(f64::min)
    }

    #[test]
    fn test_matches_exhaustive_stride_search() {
        // 26 candidate lengths, so stride 20 offers two ends per fragment
        let config = FragmentationConfig {
            min_length: 10,
            max_length: 35,
            min_overlap: 1,
            max_overlap: 3,
            max_fragments: 6,
            objective: Objective::Max,
            chunk_cap: 1000,
        };
        let (n_min, n_max) = fragment_count_bounds(60, &config).unwrap();

        for seed in 1..=5 {
            let profile = pseudo_random_profile(60, seed);
            for objective in [Objective::Max, Objective::Sum] {
                let exhaustive = (n_min..=n_max)
                    .filter_map(|n| {
                        let problem = SegmentationProblem::new(&profile, &config, n);
                        exhaustive_cost(&problem, problem.start_state(), objective)
                    })
                    .fold(f64::INFINITY, f64::min);

                let config = FragmentationConfig {
                    objective,
                    ..config.clone()
                };
                let partition = optimize_fragments(&profile, &config, None).unwrap();
                assert!(
                    (partition.cost - exhaustive).abs() < 1e-9,
                    "seed {seed} {objective}: dp {} vs exhaustive {exhaustive}",
                    partition.cost
                );
                assert_eq!(partition.cost, partition.evaluate_cost(&profile, objective));
            }
        }
    }

    #[test]
    fn test_never_beats_unrestricted_optimum() {
        let config = FragmentationConfig {
            min_length: 10,
            max_length: 13,
            min_overlap: 1,
            max_overlap: 2,
            max_fragments: 4,
            objective: Objective::Max,
            chunk_cap: 1000,
        };
        let candidates = enumerate_partitions(30, &config);

        for seed in 1..=5 {
            let profile = pseudo_random_profile(30, seed);
            for objective in [Objective::Max, Objective::Sum] {
                let brute = candidates
                    .iter()
                    .map(|fragments| {
                        Partition {
                            fragments: fragments.clone(),
                            cost: 0.0,
                            objective,
                        }
                        .evaluate_cost(&profile, objective)
                    })
                    .fold(f64::INFINITY, f64::min);

                let config = FragmentationConfig {
                    objective,
                    ..config.clone()
                };
                let partition = optimize_fragments(&profile, &config, None).unwrap();
                assert!(partition.cost >= brute - 1e-9);
                assert!(partition.validate(&config, 30).is_ok());
            }
        }
    }

    #[test]
    fn test_infeasible_count_is_skipped() {
        let profile = RiskProfile::zeros(200).unwrap();
        let config = config(Objective::Max);

        // two fragments of at most 70 bp cannot cover 200 bp
        assert!(matches!(
            best_over_counts(&profile, &config, 2..=2, None),
            Err(SynthcutError::InfeasiblePartition(_))
        ));

        let partition = best_over_counts(&profile, &config, 2..=3, None).unwrap();
        assert_eq!(partition.len(), 3);
        assert_eq!(partition.starts(), vec![1, 66, 131]);
        assert!(partition.validate(&config, 200).is_ok());
    }

    #[test]
    fn test_scaled_uniform_profiles_cut_identically() {
        let config = FragmentationConfig {
            min_length: 50,
            max_length: 100,
            min_overlap: 5,
            max_overlap: 5,
            max_fragments: 30,
            objective: Objective::Max,
            chunk_cap: 1000,
        };

        for length in (200..=900).step_by(23) {
            let reference = RiskProfile::new(vec![1.0; length]).unwrap();
            let expected = optimize_fragments(&reference, &config, None).unwrap().starts();

            for value in [0.1, 0.3, 0.7, 1.1, 2.3] {
                let profile = RiskProfile::new(vec![value; length]).unwrap();
                let partition = optimize_fragments(&profile, &config, None).unwrap();
                assert_eq!(partition.starts(), expected, "length {length}, value {value}");
                assert_eq!(partition.cost, profile.range_sum(1, 5));
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let profile = pseudo_random_profile(400, 42);
        let config = FragmentationConfig {
            max_fragments: 8,
            ..config(Objective::Sum)
        };
        let first = optimize_fragments(&profile, &config, None).unwrap();
        let second = optimize_fragments(&profile, &config, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_chunked_fallback_is_valid() {
        let profile = pseudo_random_profile(300, 7);
        let config = FragmentationConfig {
            min_length: 20,
            max_length: 40,
            min_overlap: 3,
            max_overlap: 5,
            max_fragments: 30,
            objective: Objective::Max,
            chunk_cap: 100,
        };

        let partition = optimize_fragments(&profile, &config, None).unwrap();
        assert!(partition.validate(&config, 300).is_ok());
        assert_eq!(partition.fragments[0].start, 1);
        assert_eq!(partition.fragments.last().unwrap().end, 300);
        assert_eq!(partition.cost, partition.evaluate_cost(&profile, Objective::Max));
    }

    #[test]
    fn test_chunked_budget_exhausted() {
        let profile = RiskProfile::zeros(300).unwrap();
        let config = FragmentationConfig {
            min_length: 20,
            max_length: 40,
            min_overlap: 3,
            max_overlap: 5,
            max_fragments: 4,
            objective: Objective::Max,
            chunk_cap: 100,
        };
        assert!(matches!(
            optimize_fragments(&profile, &config, None),
            Err(SynthcutError::InfeasiblePartition(_))
        ));
    }

    #[test]
    fn test_cancellation() {
        let profile = RiskProfile::new(vec![1.0; 120]).unwrap();
        let token = CancellationToken::new();
        token.cancel();
        assert!(matches!(
            optimize_fragments(&profile, &config(Objective::Max), Some(&token)),
            Err(SynthcutError::CancellationRequested)
        ));
    }
}
