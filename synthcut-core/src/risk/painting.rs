use crate::config::SignalKind;
use crate::types::{AlignmentHit, SynthcutError};

/// Paints alignment scores over a zero track of `length` positions.
///
/// The first hit is the search of the sequence against itself and is
/// skipped. Every other hit overwrites its query interval with its score;
/// later hits win where intervals intersect.
///
/// # Errors
///
/// Returns [`SynthcutError::SignalUnavailable`] for a hit outside
/// `[1, length]` or with a negative or non-finite score.
pub fn paint_hits(length: usize, hits: &[AlignmentHit]) -> Result<Vec<f64>, SynthcutError> {
    let mut track = vec![0.0; length];

    for hit in hits.iter().skip(1) {
        if !hit.score.is_finite() || hit.score < 0.0 {
            return Err(SynthcutError::unavailable(
                SignalKind::Homology,
                format!("hit score {} is not a finite non-negative number", hit.score),
            ));
        }
        let start = hit.query_start.min(hit.query_end);
        let end = hit.query_start.max(hit.query_end);
        if start == 0 || end > length {
            return Err(SynthcutError::unavailable(
                SignalKind::Homology,
                format!("hit [{start}, {end}] lies outside [1, {length}]"),
            ));
        }
        track[start - 1..end].fill(hit.score);
    }

    Ok(track)
}

/// 1-indexed anchor positions of repeats worth scoring.
///
/// An anchor is a position whose duplication strength reaches `threshold`
/// and that lies closer to the sequence start than `window`.
#[must_use]
pub fn repeat_anchors(strengths: &[f64], window: usize, threshold: f64) -> Vec<usize> {
    strengths
        .iter()
        .enumerate()
        .map(|(i, &s)| (i + 1, s))
        .filter(|&(k, s)| s >= threshold && k < window)
        .map(|(k, _)| k)
        .collect()
}

/// Accumulates anchor window profiles into a raw repeat track.
///
/// Each profile is padded with `window / 2` zeros on both sides, entries
/// below `threshold` are dropped, and the rest are added position by
/// position from the sequence start. Entries past `length` are discarded.
#[must_use]
pub fn accumulate_repeats<'a, I>(length: usize, window: usize, threshold: f64, profiles: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut cumulative = vec![0.0; length];
    let padding = window / 2;

    for profile in profiles {
        let padded = std::iter::repeat_n(0.0, padding)
            .chain(profile.iter().copied())
            .chain(std::iter::repeat_n(0.0, padding));
        for (slot, x) in cumulative.iter_mut().zip(padded) {
            if x >= threshold {
                *slot -= x;
            }
        }
    }

    cumulative.into_iter().map(|c| 0.0 - c).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_hits_skips_self_hit() {
        let hits = [
            AlignmentHit::new(1, 100, 200.0),
            AlignmentHit::new(10, 30, 50.0),
        ];
        let track = paint_hits(100, &hits).unwrap();
        assert_eq!(track[8], 0.0);
        assert!(track[9..30].iter().all(|&x| x == 50.0));
        assert_eq!(track[30], 0.0);
        assert_eq!(track.iter().filter(|&&x| x > 0.0).count(), 21);
    }

    #[test]
    fn test_paint_hits_later_hits_win() {
        let hits = [
            AlignmentHit::new(1, 40, 80.0),
            AlignmentHit::new(5, 15, 20.0),
            AlignmentHit::new(12, 18, 30.0),
        ];
        let track = paint_hits(40, &hits).unwrap();
        assert_eq!(track[10], 20.0);
        assert_eq!(track[11], 30.0);
        assert_eq!(track[17], 30.0);
        assert_eq!(track[18], 0.0);
    }

    #[test]
    fn test_paint_hits_reversed_interval() {
        let hits = [AlignmentHit::new(1, 20, 1.0), AlignmentHit::new(8, 4, 7.0)];
        let track = paint_hits(20, &hits).unwrap();
        assert!(track[3..8].iter().all(|&x| x == 7.0));
    }

    #[test]
    fn test_paint_hits_rejects_bad_hits() {
        let outside = [AlignmentHit::new(1, 20, 1.0), AlignmentHit::new(15, 25, 3.0)];
        assert!(matches!(
            paint_hits(20, &outside),
            Err(SynthcutError::SignalUnavailable {
                signal: SignalKind::Homology,
                ..
            })
        ));

        let negative = [AlignmentHit::new(1, 20, 1.0), AlignmentHit::new(2, 5, -3.0)];
        assert!(paint_hits(20, &negative).is_err());
    }

    #[test]
    fn test_paint_hits_only_self_hit() {
        let track = paint_hits(10, &[AlignmentHit::new(1, 10, 20.0)]).unwrap();
        assert!(track.iter().all(|&x| x == 0.0));
        assert!(paint_hits(10, &[]).unwrap().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_repeat_anchors() {
        let strengths = [0.5, 3.0, 2.0, 1.9, 4.0, 6.0];
        assert_eq!(repeat_anchors(&strengths, 6, 2.0), vec![2, 3, 5]);
    }

    #[test]
    fn test_accumulate_repeats_pads_and_thresholds() {
        let first = [3.0, 1.0, 2.5];
        let second = [2.0, 2.0];
        let track = accumulate_repeats(
            6,
            4,
            2.0,
            [first.as_slice(), second.as_slice()],
        );
        // padding of 2: first covers positions 3..5, second covers 3..4
        assert_eq!(track, vec![0.0, 0.0, 5.0, 2.0, 2.5, 0.0]);
    }

    #[test]
    fn test_accumulate_repeats_truncates_to_length() {
        let profile = [5.0; 10];
        let track = accumulate_repeats(4, 2, 1.0, [profile.as_slice()]);
        assert_eq!(track, vec![0.0, 5.0, 5.0, 5.0]);
    }
}
