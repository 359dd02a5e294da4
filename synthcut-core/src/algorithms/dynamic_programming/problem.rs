use crate::config::FragmentationConfig;
use crate::constants::SEARCH_STRIDES;
use crate::risk::RiskProfile;
use crate::types::SynthcutError;

/// One node of the fixed-count search.
///
/// `start` is where the next fragment begins, `end` is where the previous
/// fragment ends (so `[start, end]` is the overlap just placed), and
/// `remaining` counts the fragments still to place, the one at `start`
/// included.
///
/// The derived ordering is the tie-break order between equally good
/// successors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentationState {
    pub start: usize,
    pub end: usize,
    pub remaining: usize,
}

impl SegmentationState {
    #[must_use]
    pub const fn new(start: usize, end: usize, remaining: usize) -> Self {
        Self {
            start,
            end,
            remaining,
        }
    }
}

/// A reachable state and the cost of the transition into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Successor {
    pub state: SegmentationState,
    pub cost: f64,
}

/// The search space for cutting one profile into exactly `fragments`
/// fragments.
#[derive(Debug, Clone, Copy)]
pub struct SegmentationProblem<'a> {
    profile: &'a RiskProfile,
    config: &'a FragmentationConfig,
    fragments: usize,
}

impl<'a> SegmentationProblem<'a> {
    pub fn new(profile: &'a RiskProfile, config: &'a FragmentationConfig, fragments: usize) -> Self {
        Self {
            profile,
            config,
            fragments,
        }
    }

    #[must_use]
    pub fn length(&self) -> usize {
        self.profile.len()
    }

    #[must_use]
    pub fn fragments(&self) -> usize {
        self.fragments
    }

    #[must_use]
    pub fn start_state(&self) -> SegmentationState {
        SegmentationState::new(1, 1, self.fragments)
    }

    #[must_use]
    pub fn terminal_state(&self) -> SegmentationState {
        SegmentationState::new(self.length(), self.length(), 0)
    }

    #[must_use]
    pub fn is_terminal(&self, state: &SegmentationState) -> bool {
        *state == self.terminal_state()
    }

    /// Risk summed over the overlap `[start, end]`; 0 for the terminal state.
    #[must_use]
    pub fn state_cost(&self, state: &SegmentationState) -> f64 {
        if self.is_terminal(state) {
            0.0
        } else {
            self.profile.range_sum(state.start, state.end)
        }
    }

    /// Enumerates the successors of `state`.
    ///
    /// Candidate ends of the fragment starting at `state.start` are tried
    /// with each stride of [`SEARCH_STRIDES`] in turn; the first stride that
    /// yields any successor wins. For every candidate end the next start is
    /// limited both by the overlap bounds and by what the remaining
    /// fragments can still cover.
    ///
    /// # Errors
    ///
    /// Returns [`SynthcutError::InfeasiblePartition`] if even stride 1
    /// leaves the state without a successor.
    pub fn successors(&self, state: &SegmentationState) -> Result<Vec<Successor>, SynthcutError> {
        match state.remaining {
            0 => {
                return Err(SynthcutError::InfeasiblePartition(format!(
                    "state ({}, {}, 0) has no fragments left but is not terminal",
                    state.start, state.end
                )));
            }
            1 => {
                let terminal = self.terminal_state();
                return Ok(vec![Successor {
                    state: terminal,
                    cost: self.state_cost(&terminal),
                }]);
            }
            _ => {}
        }

        let cfg = self.config;
        let length = self.length() as i64;
        let k = state.remaining as i64;
        let (l_min, l_max) = (cfg.min_length as i64, cfg.max_length as i64);
        let (o_min, o_max) = (cfg.min_overlap as i64, cfg.max_overlap as i64);

        // start bounds imposed by what k - 1 fragments can cover
        let cover_lo = length - (k - 1) * l_max + (k - 2) * o_min;
        let cover_hi = length - (k - 1) * l_min + (k - 2) * o_max;

        let first_end = state.start as i64 + l_min - 1;
        let last_end = (state.start as i64 + l_max - 1).min(length);

        for stride in SEARCH_STRIDES {
            let mut successors = Vec::new();
            let mut end = first_end;
            while end <= last_end {
                let lo = (end - o_max).max(cover_lo) + 1;
                let hi = (end - o_min).min(cover_hi) + 1;
                for next_start in lo.max(1)..=hi {
                    let next = SegmentationState::new(next_start as usize, end as usize, state.remaining - 1);
                    successors.push(Successor {
                        state: next,
                        cost: self.state_cost(&next),
                    });
                }
                end += stride as i64;
            }
            if !successors.is_empty() {
                return Ok(successors);
            }
        }

        Err(SynthcutError::InfeasiblePartition(format!(
            "state ({}, {}, {}) has no successor at stride 1",
            state.start, state.end, state.remaining
        )))
    }
}
