use std::marker::PhantomData;
use std::path::Path;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::algorithms::{CancellationToken, optimize_fragments};
use crate::config::{FragmentationConfig, SynthcutConfig};
use crate::constants::DEFAULT_SEQUENCE_ID;
use crate::results::{BatchEntry, FragmentationResults, SequenceInfo};
use crate::risk::{RiskProfile, RiskProfileAggregator, ScoredProfile};
use crate::sequence::{FastaRecord, Sequence, read_fasta_sequences};
use crate::signals::SignalSources;
use crate::types::SynthcutError;

/// Marker trait for the scoring state of a [`SequenceJob`].
///
/// A job must be scored, turning its sequence into a risk profile, before
/// it can be segmented.
pub trait ScoringState {}

/// Marker type for a job holding only its sequence.
#[derive(Debug, Clone)]
pub struct Unscored;

/// Marker type for a job whose risk profile is available.
#[derive(Debug, Clone)]
pub struct Scored;

impl ScoringState for Unscored {}
impl ScoringState for Scored {}

/// One sequence moving through the pipeline.
///
/// # Type Parameters
///
/// * `S` - The scoring state, either [`Unscored`] or [`Scored`]
///
/// # Examples
///
/// ```rust
/// use synthcut_core::config::SynthcutConfig;
/// use synthcut_core::engine::UnscoredJob;
/// use synthcut_core::risk::RiskProfileAggregator;
/// use synthcut_core::sequence::Sequence;
/// use synthcut_core::signals::SignalSources;
///
/// let mut config = SynthcutConfig::default();
/// config.fragmentation.min_length = 50;
/// config.fragmentation.max_length = 70;
/// config.fragmentation.min_overlap = 5;
/// config.fragmentation.max_overlap = 10;
///
/// let sources = SignalSources::default();
/// let aggregator = RiskProfileAggregator::new(&config.scoring, &sources);
///
/// let sequence = Sequence::new("ACGT".repeat(30).as_bytes())?;
/// let job = UnscoredJob::new("demo".to_string(), None, sequence);
/// let scored = job.score(&aggregator)?;
/// let results = scored.segment(&config.fragmentation, None)?;
/// assert_eq!(results.partition.len(), 2);
/// # Ok::<(), synthcut_core::types::SynthcutError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SequenceJob<S: ScoringState> {
    header: String,
    description: Option<String>,
    sequence: Option<Sequence>,
    scored: Option<ScoredProfile>,
    _state: PhantomData<S>,
}

pub type UnscoredJob = SequenceJob<Unscored>;

pub type ScoredJob = SequenceJob<Scored>;

impl<S: ScoringState> SequenceJob<S> {
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }
}

impl UnscoredJob {
    pub fn new(header: String, description: Option<String>, sequence: Sequence) -> Self {
        Self {
            header,
            description,
            sequence: Some(sequence),
            scored: None,
            _state: PhantomData,
        }
    }

    /// Aggregates the enabled signals into the job's risk profile.
    ///
    /// # Errors
    ///
    /// Returns [`SynthcutError::SignalUnavailable`] if any enabled signal
    /// cannot be computed.
    pub fn score(self, aggregator: &RiskProfileAggregator<'_>) -> Result<ScoredJob, SynthcutError> {
        let sequence = self
            .sequence
            .ok_or_else(|| SynthcutError::InvalidSequence("job has no sequence".to_string()))?;
        let scored = aggregator.aggregate(&sequence)?;

        Ok(SequenceJob {
            header: self.header,
            description: self.description,
            sequence: Some(sequence),
            scored: Some(scored),
            _state: PhantomData,
        })
    }
}

impl ScoredJob {
    /// Starts from a risk profile computed elsewhere.
    pub fn from_profile(header: String, profile: RiskProfile) -> Self {
        Self {
            header,
            description: None,
            sequence: None,
            scored: Some(ScoredProfile::from_profile(profile)),
            _state: PhantomData,
        }
    }

    #[must_use]
    pub fn profile(&self) -> Option<&RiskProfile> {
        self.scored.as_ref().map(|s| &s.profile)
    }

    /// Cuts the profile into the cheapest valid partition.
    ///
    /// # Errors
    ///
    /// Propagates [`SynthcutError::InvalidConfig`],
    /// [`SynthcutError::InfeasiblePartition`] and
    /// [`SynthcutError::CancellationRequested`] from the solver.
    pub fn segment(
        self,
        config: &FragmentationConfig,
        cancellation: Option<&CancellationToken>,
    ) -> Result<FragmentationResults, SynthcutError> {
        let scored = self
            .scored
            .ok_or_else(|| SynthcutError::InvalidRiskProfile("job has no profile".to_string()))?;
        let partition = optimize_fragments(&scored.profile, config, cancellation)?;

        let sequence_info = SequenceInfo {
            length: scored.profile.len(),
            gc_content: self.sequence.as_ref().map(Sequence::gc_content),
            num_fragments: partition.len(),
            header: self.header,
            description: self.description,
        };

        Ok(FragmentationResults {
            partition,
            sequence_info,
            scored,
        })
    }
}

/// High-level planner that profiles sequences and cuts them into fragments.
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
///
/// let planner = FragmentPlanner::new(config);
/// let results = planner.analyze_sequence(&"ACGT".repeat(30), None)?;
/// assert_eq!(results.sequence_info.header, "Synthcut_Seq_1");
/// # Ok::<(), synthcut_core::types::SynthcutError>(())
/// ```
#[derive(Debug)]
pub struct FragmentPlanner {
    /// Configuration options for profiling and segmentation
    pub config: SynthcutConfig,
    sources: SignalSources,
    cancellation: Option<CancellationToken>,
}

impl FragmentPlanner {
    /// Creates a planner using only in-process signal sources.
    pub fn new(config: SynthcutConfig) -> Self {
        Self::with_sources(config, SignalSources::default())
    }

    pub fn with_sources(config: SynthcutConfig, sources: SignalSources) -> Self {
        Self {
            config,
            sources,
            cancellation: None,
        }
    }

    /// Attaches a token that aborts segmentation once cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    #[must_use]
    pub fn cancellation_token(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    #[must_use]
    pub fn sources(&self) -> &SignalSources {
        &self.sources
    }

    /// Builds the risk profile of a sequence without segmenting it.
    ///
    /// # Errors
    ///
    /// Returns [`SynthcutError::InvalidConfig`] for invalid scoring settings
    /// and [`SynthcutError::SignalUnavailable`] for failing signals.
    pub fn profile(&self, sequence: &Sequence) -> Result<ScoredProfile, SynthcutError> {
        self.config.scoring.validate()?;
        RiskProfileAggregator::new(&self.config.scoring, &self.sources).aggregate(sequence)
    }

    /// Analyzes all records of a FASTA file in parallel.
    ///
    /// Records are processed on a rayon pool sized by
    /// [`SynthcutConfig::num_threads`]. A failing record is logged and kept
    /// as an error entry; the other records are unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error only if the configuration is invalid, the file
    /// cannot be read, or the thread pool cannot be built.
    pub fn analyze_fasta_file<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<Vec<BatchEntry>, SynthcutError> {
        self.config.validate()?;
        let records = read_fasta_sequences(path.as_ref())?;
        info!(
            path = %path.as_ref().display(),
            records = records.len(),
            "loaded FASTA records"
        );
        self.analyze_records(records)
    }

    /// Analyzes already loaded FASTA records in parallel.
    ///
    /// A record that fails is kept as an error entry; the other records are
    /// unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error only if the configuration is invalid or the thread
    /// pool cannot be built.
    pub fn analyze_records(
        &self,
        records: Vec<FastaRecord>,
    ) -> Result<Vec<BatchEntry>, SynthcutError> {
        self.config.validate()?;
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(num_threads) = self.config.num_threads {
            builder = builder.num_threads(num_threads);
        }
        let pool = builder.build().map_err(|e| {
            SynthcutError::InvalidConfig(format!("Failed to configure thread pool: {e}"))
        })?;

        let entries = pool.install(|| {
            records
                .into_par_iter()
                .map(|(header, description, bases)| {
                    let outcome = self.analyze_sequence_bytes(&bases, header.clone(), description);
                    if let Err(e) = &outcome {
                        warn!(record = %header, error = %e, "record skipped");
                    }
                    BatchEntry { header, outcome }
                })
                .collect()
        });

        Ok(entries)
    }

    /// Analyzes a single sequence from a string.
    ///
    /// `header` defaults to [`DEFAULT_SEQUENCE_ID`].
    pub fn analyze_sequence(
        &self,
        sequence: &str,
        header: Option<String>,
    ) -> Result<FragmentationResults, SynthcutError> {
        let header = header.unwrap_or_else(|| DEFAULT_SEQUENCE_ID.to_string());
        self.analyze_sequence_bytes(sequence.as_bytes(), header, None)
    }

    /// Analyzes raw sequence bytes.
    ///
    /// # Errors
    ///
    /// - [`SynthcutError::InvalidSequence`] for an empty sequence or one with
    ///   symbols outside `{A, C, G, T}`
    /// - any error of [`Self::profile`] or [`ScoredJob::segment`]
    pub fn analyze_sequence_bytes(
        &self,
        sequence: &[u8],
        header: String,
        description: Option<String>,
    ) -> Result<FragmentationResults, SynthcutError> {
        self.config.validate()?;
        let sequence = Sequence::new(sequence)?;
        info!(record = %header, length = sequence.len(), "profiling sequence");

        let aggregator = RiskProfileAggregator::new(&self.config.scoring, &self.sources);
        let job = UnscoredJob::new(header, description, sequence).score(&aggregator)?;
        self.finish(job)
    }

    /// Cuts a risk profile supplied directly, skipping signal aggregation.
    pub fn analyze_profile(
        &self,
        profile: RiskProfile,
        header: Option<String>,
    ) -> Result<FragmentationResults, SynthcutError> {
        self.config.fragmentation.validate()?;
        let header = header.unwrap_or_else(|| DEFAULT_SEQUENCE_ID.to_string());
        info!(record = %header, length = profile.len(), "cutting precomputed profile");
        self.finish(ScoredJob::from_profile(header, profile))
    }

    fn finish(&self, job: ScoredJob) -> Result<FragmentationResults, SynthcutError> {
        let results = job.segment(&self.config.fragmentation, self.cancellation.as_ref())?;
        info!(
            record = %results.sequence_info.header,
            fragments = results.partition.len(),
            cost = results.partition.cost,
            objective = %results.partition.objective,
            "partition found"
        );
        Ok(results)
    }
}
