use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::{HomologyConfig, SignalKind};
use crate::sequence::Sequence;
use crate::sequence::io::read_score_values;
use crate::signals::{HomologySearch, ReferenceDatabase, RepeatDetector, SignalSource};
use crate::types::{AlignmentHit, SynthcutError};

/// Per-base values produced ahead of time by an external tool.
///
/// The window size is ignored; the values are returned as loaded and the
/// aggregator checks that their count matches the sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecomputedTrack {
    values: Vec<f64>,
}

impl PrecomputedTrack {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Loads one value per line, see [`read_score_values`].
    pub fn from_file(path: &Path) -> Result<Self, SynthcutError> {
        read_score_values(path).map(Self::new)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl SignalSource for PrecomputedTrack {
    fn compute(&self, _sequence: &Sequence, _window_size: usize) -> Result<Vec<f64>, SynthcutError> {
        Ok(self.values.clone())
    }
}

/// Alignment hits produced ahead of time by an external search.
///
/// Two line layouts are accepted:
///
/// - three whitespace-separated columns: `start end score`
/// - BLAST tabular output with the raw HSP score appended
///   (`-outfmt "6 std score"`, thirteen columns), using `qstart`, `qend`
///   and `score`
/// - plain BLAST tabular output (`-outfmt 6`, twelve columns), using
///   `qstart`, `qend` and `bitscore`; bit scores are smaller than raw
///   scores, so the painted homology risk is lower than with `score`
///
/// Hits are kept in file order, so the self-identity hit must come first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrecomputedHits {
    hits: Vec<AlignmentHit>,
}

impl PrecomputedHits {
    pub fn new(hits: Vec<AlignmentHit>) -> Self {
        Self { hits }
    }

    pub fn from_file(path: &Path) -> Result<Self, SynthcutError> {
        let reader = BufReader::new(File::open(path)?);
        let mut hits = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let hit = parse_hit_line(trimmed).map_err(|reason| {
                SynthcutError::ParseError(format!("{}:{}: {reason}", path.display(), index + 1))
            })?;
            hits.push(hit);
        }

        Ok(Self { hits })
    }

    pub fn hits(&self) -> &[AlignmentHit] {
        &self.hits
    }
}

fn parse_hit_line(line: &str) -> Result<AlignmentHit, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let (start, end, score) = match fields.len() {
        3 => (fields[0], fields[1], fields[2]),
        12 => (fields[6], fields[7], fields[11]),
        n if n >= 13 => (fields[6], fields[7], fields[12]),
        n => return Err(format!("expected 3, 12 or 13 columns, found {n}")),
    };

    let position = |s: &str| {
        s.parse::<usize>()
            .map_err(|e| format!("invalid position '{s}': {e}"))
    };
    let score = score
        .parse::<f64>()
        .map_err(|e| format!("invalid score '{score}': {e}"))?;

    Ok(AlignmentHit::new(position(start)?, position(end)?, score))
}

impl HomologySearch for PrecomputedHits {
    fn search(
        &self,
        _sequence: &Sequence,
        _params: &HomologyConfig,
        _reference: &ReferenceDatabase,
    ) -> Result<Vec<AlignmentHit>, SynthcutError> {
        Ok(self.hits.clone())
    }
}

/// Duplication strengths and anchor window profiles from an external
/// self-similarity detector.
///
/// One line per base, in sequence order:
///
/// ```text
/// strength[<TAB>v1,v2,...]
/// ```
///
/// The optional second column is the window profile anchored at that base.
/// Only bases that become anchors need one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrecomputedRepeats {
    strengths: Vec<f64>,
    profiles: BTreeMap<usize, Vec<f64>>,
}

impl PrecomputedRepeats {
    /// `profiles` is keyed by 1-indexed anchor position.
    pub fn new(strengths: Vec<f64>, profiles: BTreeMap<usize, Vec<f64>>) -> Self {
        Self {
            strengths,
            profiles,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, SynthcutError> {
        let reader = BufReader::new(File::open(path)?);
        let mut strengths = Vec::new();
        let mut profiles = BTreeMap::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let parse_error = |reason: String| {
                SynthcutError::ParseError(format!("{}:{}: {reason}", path.display(), index + 1))
            };

            let mut fields = trimmed.split('\t');
            let strength = fields.next().unwrap_or_default().trim();
            let strength = strength
                .parse::<f64>()
                .map_err(|e| parse_error(format!("invalid strength '{strength}': {e}")))?;
            strengths.push(strength);

            if let Some(profile) = fields.next() {
                let values = profile
                    .split(',')
                    .map(|v| {
                        v.trim()
                            .parse::<f64>()
                            .map_err(|e| parse_error(format!("invalid profile value '{v}': {e}")))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                profiles.insert(strengths.len(), values);
            }
        }

        Ok(Self::new(strengths, profiles))
    }

    pub fn strengths(&self) -> &[f64] {
        &self.strengths
    }
}

impl RepeatDetector for PrecomputedRepeats {
    fn duplication_strength(&self, _sequence: &Sequence) -> Result<Vec<f64>, SynthcutError> {
        Ok(self.strengths.clone())
    }

    fn window_profile(
        &self,
        _sequence: &Sequence,
        anchor: usize,
        _window: usize,
    ) -> Result<Vec<f64>, SynthcutError> {
        self.profiles.get(&anchor).cloned().ok_or_else(|| {
            SynthcutError::unavailable(
                SignalKind::Repeat,
                format!("no window profile for anchor {anchor}"),
            )
        })
    }
}
