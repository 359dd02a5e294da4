use tracing::debug;

use crate::config::{ScoringConfig, SignalKind};
use crate::risk::normalize::normalize;
use crate::risk::painting::{accumulate_repeats, paint_hits, repeat_anchors};
use crate::risk::{RiskProfile, ScoredProfile, SignalTrack};
use crate::sequence::Sequence;
use crate::signals::SignalSources;
use crate::types::SynthcutError;

/// Fuses the enabled signals of a sequence into one [`RiskProfile`].
///
/// # Examples
///
/// ```rust
/// use synthcut_core::config::ScoringConfig;
/// use synthcut_core::risk::RiskProfileAggregator;
/// use synthcut_core::sequence::Sequence;
/// use synthcut_core::signals::SignalSources;
///
/// let scoring = ScoringConfig::default();
/// let sources = SignalSources::default();
/// let aggregator = RiskProfileAggregator::new(&scoring, &sources);
///
/// let sequence = Sequence::new(b"ATGCGCGATATATCGCGCAT")?;
/// let scored = aggregator.aggregate(&sequence)?;
/// assert_eq!(scored.profile.len(), sequence.len());
/// # Ok::<(), synthcut_core::types::SynthcutError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RiskProfileAggregator<'a> {
    scoring: &'a ScoringConfig,
    sources: &'a SignalSources,
}

impl<'a> RiskProfileAggregator<'a> {
    pub fn new(scoring: &'a ScoringConfig, sources: &'a SignalSources) -> Self {
        Self { scoring, sources }
    }

    /// Computes, checks and normalizes every enabled signal, then sums them.
    ///
    /// # Errors
    ///
    /// Returns [`SynthcutError::SignalUnavailable`] if an enabled signal has
    /// no source, its source fails, or it yields the wrong number of values
    /// or a non-finite value. Nothing is returned for the sequence in that
    /// case.
    pub fn aggregate(&self, sequence: &Sequence) -> Result<ScoredProfile, SynthcutError> {
        let length = sequence.len();
        let mut totals = vec![0.0; length];
        let mut tracks = Vec::with_capacity(self.scoring.signals.len());

        for &kind in &self.scoring.signals {
            let raw = self.raw_signal(kind, sequence)?;
            check_track(kind, &raw, length)?;

            let normalized = normalize(kind, &raw, self.scoring);
            for (total, value) in totals.iter_mut().zip(&normalized) {
                *total += value;
            }
            debug!(
                signal = %kind,
                risk = normalized.iter().sum::<f64>(),
                "signal aggregated"
            );
            tracks.push(SignalTrack {
                kind,
                raw,
                normalized,
            });
        }

        let profile = RiskProfile::new(totals)
            .map_err(|e| SynthcutError::InvalidRiskProfile(format!("aggregated profile: {e}")))?;
        Ok(ScoredProfile { tracks, profile })
    }

    fn raw_signal(&self, kind: SignalKind, sequence: &Sequence) -> Result<Vec<f64>, SynthcutError> {
        let sources = self.sources;
        let failed = |e: SynthcutError| match e {
            SynthcutError::SignalUnavailable { .. } => e,
            other => SynthcutError::unavailable(kind, other.to_string()),
        };

        match kind {
            SignalKind::Gc => sources
                .gc
                .compute(sequence, self.scoring.gc.window_size)
                .map_err(failed),
            SignalKind::Homology => {
                let search = sources
                    .homology
                    .as_ref()
                    .ok_or_else(|| missing_source(kind))?;
                let hits = search
                    .search(sequence, &self.scoring.homology, &sources.reference)
                    .map_err(failed)?;
                paint_hits(sequence.len(), &hits)
            }
            SignalKind::Hairpin => sources
                .hairpin
                .as_ref()
                .ok_or_else(|| missing_source(kind))?
                .compute(sequence, self.scoring.hairpin.window_size)
                .map_err(failed),
            SignalKind::Repeat => {
                let detector = sources.repeat.as_ref().ok_or_else(|| missing_source(kind))?;
                let window = self.scoring.repeat.window_size;
                let threshold = self.scoring.repeat.threshold;

                let strengths = detector.duplication_strength(sequence).map_err(failed)?;
                check_track(kind, &strengths, sequence.len())?;

                let profiles = repeat_anchors(&strengths, window, threshold)
                    .into_iter()
                    .map(|anchor| {
                        let profile = detector
                            .window_profile(sequence, anchor, window)
                            .map_err(failed)?;
                        if profile.iter().any(|v| !v.is_finite()) {
                            return Err(SynthcutError::unavailable(
                                kind,
                                format!("window profile at anchor {anchor} is not finite"),
                            ));
                        }
                        Ok(profile)
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(accumulate_repeats(
                    sequence.len(),
                    window,
                    threshold,
                    profiles.iter().map(Vec::as_slice),
                ))
            }
        }
    }
}

fn missing_source(kind: SignalKind) -> SynthcutError {
    SynthcutError::unavailable(kind, "no source configured")
}

fn check_track(kind: SignalKind, values: &[f64], length: usize) -> Result<(), SynthcutError> {
    if values.len() != length {
        return Err(SynthcutError::unavailable(
            kind,
            format!("expected {length} values, got {}", values.len()),
        ));
    }
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return Err(SynthcutError::unavailable(
            kind,
            format!("non-finite value at position {}", i + 1),
        ));
    }
    Ok(())
}
