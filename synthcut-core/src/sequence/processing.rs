use std::ops::Range;

/// Returns the 0-based window of size `window` centered on `position`.
///
/// The window starts `(window - 1) / 2` bases upstream of `position`.
/// Positions whose window would leave the sequence get `None`; for an even
/// window the downstream edge therefore has one more uncovered position than
/// the upstream edge.
#[must_use]
pub fn centered_window(position: usize, length: usize, window: usize) -> Option<Range<usize>> {
    if window == 0 || window > length {
        return None;
    }
    let start = position.checked_sub((window - 1) / 2)?;
    let end = start + window;
    (end <= length).then_some(start..end)
}

#[inline]
fn is_gc(base: u8) -> bool {
    matches!(base, b'G' | b'C' | b'g' | b'c')
}

/// Fraction of G/C bases in the centered window around each position.
///
/// Uses a rolling count, so the cost is linear in the sequence length
/// regardless of the window size.
#[must_use]
pub fn windowed_gc_fraction(bases: &[u8], window: usize) -> Vec<f64> {
    let length = bases.len();
    let mut track = vec![0.0; length];
    if window == 0 || window > length {
        return track;
    }

    let offset = (window - 1) / 2;
    let mut count = bases[..window].iter().filter(|&&b| is_gc(b)).count();
    let last_start = length - window;

    for start in 0..=last_start {
        if start > 0 {
            count -= usize::from(is_gc(bases[start - 1]));
            count += usize::from(is_gc(bases[start + window - 1]));
        }
        track[start + offset] = count as f64 / window as f64;
    }

    track
}
