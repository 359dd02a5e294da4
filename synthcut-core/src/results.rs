use crate::risk::ScoredProfile;
use crate::types::{Partition, SynthcutError};

/// Fragmentation results for one sequence.
///
/// # Examples
///
/// ```rust
/// use synthcut_core::FragmentPlanner;
/// use synthcut_core::config::SynthcutConfig;
///
/// let mut config = SynthcutConfig::default();
/// config.fragmentation.min_length = 50;
/// config.fragmentation.max_length = 70;
/// config.fragmentation.min_overlap = 5;
/// config.fragmentation.max_overlap = 10;
/// config.scoring.signals.clear();
///
/// let planner = FragmentPlanner::new(config);
/// let sequence = "ACGT".repeat(30);
/// let results = planner.analyze_sequence(&sequence, Some("demo".to_string()))?;
///
/// println!("{}: {} bp", results.sequence_info.header, results.sequence_info.length);
/// for fragment in &results.partition.fragments {
///     println!("  {fragment}");
/// }
/// # Ok::<(), synthcut_core::types::SynthcutError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FragmentationResults {
    /// Optimal fragments with their cost and objective
    pub partition: Partition,

    /// Information about the analyzed sequence.
    pub sequence_info: SequenceInfo,

    /// Signal tracks and the summed risk profile the partition was cut from.
    ///
    /// Has no tracks when the profile was supplied directly.
    pub scored: ScoredProfile,
}

impl FragmentationResults {
    /// Risk summed over the overlap each fragment shares with the next one.
    #[must_use]
    pub fn overlap_risks(&self) -> Vec<f64> {
        self.partition
            .overlap_regions()
            .iter()
            .map(|region| self.scored.profile.range_sum(region.start, region.end))
            .collect()
    }
}

/// Information about a processed sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceInfo {
    /// Length of the sequence in base pairs.
    pub length: usize,

    /// GC content as a fraction (0.0 to 1.0).
    ///
    /// `None` when only a risk profile was available.
    pub gc_content: Option<f64>,

    pub num_fragments: usize,

    /// Sequence identifier from FASTA header.
    pub header: String,

    /// Full sequence description from FASTA header.
    pub description: Option<String>,
}

/// Outcome for one record of a batch.
///
/// A failing record does not abort the batch; its error is kept here.
#[derive(Debug)]
pub struct BatchEntry {
    pub header: String,
    pub outcome: Result<FragmentationResults, SynthcutError>,
}

impl BatchEntry {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}
