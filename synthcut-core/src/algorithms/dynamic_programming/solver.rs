use std::cmp::Ordering;
use std::collections::HashMap;

use crate::algorithms::cancellation::CancellationToken;
use crate::algorithms::dynamic_programming::problem::{
    SegmentationProblem, SegmentationState, Successor,
};
use crate::config::Objective;
use crate::types::{Partition, SynthcutError};

/// Best value found for a state and the successor achieving it.
#[derive(Debug, Clone, Copy)]
struct MemoEntry {
    value: f64,
    next: Option<Successor>,
}

/// Work items of the explicit DFS.
enum Frame {
    /// Expand a state: enumerate its successors and schedule them.
    Enter(SegmentationState),
    /// All successors are solved; pick the best one.
    Resolve(SegmentationState, Vec<Successor>),
}

/// Solves one fixed fragment count.
///
/// The memo lives only as long as the solver, so separate counts never
/// share cached values.
pub struct FixedCountSolver<'a> {
    problem: SegmentationProblem<'a>,
    objective: Objective,
    cancellation: Option<&'a CancellationToken>,
    memo: HashMap<SegmentationState, MemoEntry>,
}

impl<'a> FixedCountSolver<'a> {
    pub fn new(problem: SegmentationProblem<'a>, objective: Objective) -> Self {
        Self {
            problem,
            objective,
            cancellation: None,
            memo: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: Option<&'a CancellationToken>) -> Self {
        self.cancellation = token;
        self
    }

    /// Number of states solved so far
    #[must_use]
    pub fn states_explored(&self) -> usize {
        self.memo.len()
    }

    /// Runs the search from the start state and replays the best path.
    ///
    /// # Errors
    ///
    /// - [`SynthcutError::InfeasiblePartition`] if a reachable state has no
    ///   successor
    /// - [`SynthcutError::CancellationRequested`] if the token fires
    pub fn solve(&mut self) -> Result<Partition, SynthcutError> {
        let start = self.problem.start_state();
        self.evaluate(start)?;
        self.reconstruct(start)
    }

    fn evaluate(&mut self, root: SegmentationState) -> Result<f64, SynthcutError> {
        let mut stack = vec![Frame::Enter(root)];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(state) => {
                    if self.memo.contains_key(&state) {
                        continue;
                    }
                    if let Some(token) = self.cancellation {
                        token.check()?;
                    }
                    if self.problem.is_terminal(&state) {
                        self.memo.insert(
                            state,
                            MemoEntry {
                                value: self.objective.identity(),
                                next: None,
                            },
                        );
                        continue;
                    }

                    let successors = self.problem.successors(&state)?;
                    let pending: Vec<SegmentationState> = successors
                        .iter()
                        .map(|s| s.state)
                        .filter(|s| !self.memo.contains_key(s))
                        .collect();
                    stack.push(Frame::Resolve(state, successors));
                    stack.extend(pending.into_iter().map(Frame::Enter));
                }
                Frame::Resolve(state, successors) => {
                    let entry = self.best_successor(&state, &successors)?;
                    self.memo.insert(state, entry);
                }
            }
        }

        self.memo
            .get(&root)
            .map(|entry| entry.value)
            .ok_or_else(|| unresolved(&root))
    }

    fn best_successor(
        &self,
        state: &SegmentationState,
        successors: &[Successor],
    ) -> Result<MemoEntry, SynthcutError> {
        let mut best: Option<MemoEntry> = None;

        for successor in successors {
            let future = self
                .memo
                .get(&successor.state)
                .ok_or_else(|| unresolved(&successor.state))?
                .value;
            let value = self.objective.combine(successor.cost, future);

            let better = match best {
                None => true,
                Some(MemoEntry {
                    value: best_value,
                    next: Some(best_next),
                }) => {
                    value
                        .total_cmp(&best_value)
                        .then_with(|| successor.state.cmp(&best_next.state))
                        == Ordering::Less
                }
                Some(_) => false,
            };
            if better {
                best = Some(MemoEntry {
                    value,
                    next: Some(*successor),
                });
            }
        }

        best.ok_or_else(|| {
            SynthcutError::InfeasiblePartition(format!(
                "state ({}, {}, {}) has no successor",
                state.start, state.end, state.remaining
            ))
        })
    }

    fn reconstruct(&self, start: SegmentationState) -> Result<Partition, SynthcutError> {
        let length = self.problem.length();
        let mut starts = vec![1];
        let mut ends = Vec::with_capacity(self.problem.fragments());

        let mut state = start;
        let value = self.memo.get(&start).ok_or_else(|| unresolved(&start))?.value;

        while let Some(next) = self.memo.get(&state).ok_or_else(|| unresolved(&state))?.next {
            if self.problem.is_terminal(&next.state) {
                ends.push(length);
            } else {
                starts.push(next.state.start);
                ends.push(next.state.end);
            }
            state = next.state;
        }

        Partition::from_bounds(&starts, &ends, value, self.objective)
    }
}

fn unresolved(state: &SegmentationState) -> SynthcutError {
    SynthcutError::InfeasiblePartition(format!(
        "state ({}, {}, {}) was not resolved",
        state.start, state.end, state.remaining
    ))
}
