use crate::config::{GcConfig, ScoringConfig, SignalKind};
use crate::constants::{
    GC_HARD_LOWER_LIMIT, GC_HARD_UPPER_LIMIT, GC_RISK_SCALE, HAIRPIN_ENERGY_DIVISOR,
    HOMOLOGY_SCORE_DIVISOR,
};

/// Converts a GC fraction to risk.
///
/// Zero inside `[lower, upper]`, rising quadratically to [`GC_RISK_SCALE`]
/// at the hard limits and flat beyond them.
#[must_use]
pub fn gc_risk(fraction: f64, config: &GcConfig) -> f64 {
    let lower = config.lower_threshold;
    let upper = config.upper_threshold;

    if fraction <= GC_HARD_LOWER_LIMIT {
        GC_RISK_SCALE
    } else if fraction <= lower {
        (fraction - lower).powi(2) / (GC_HARD_LOWER_LIMIT - lower).powi(2) * GC_RISK_SCALE
    } else if fraction <= upper {
        0.0
    } else if fraction <= GC_HARD_UPPER_LIMIT {
        (fraction - upper).powi(2) / (GC_HARD_UPPER_LIMIT - upper).powi(2) * GC_RISK_SCALE
    } else {
        GC_RISK_SCALE
    }
}

#[inline]
#[must_use]
pub fn homology_risk(score: f64) -> f64 {
    score / HOMOLOGY_SCORE_DIVISOR
}

/// Risk of a negated hairpin free energy; nothing at or below `threshold`.
#[inline]
#[must_use]
pub fn hairpin_risk(negated_energy: f64, threshold: f64) -> f64 {
    if negated_energy > threshold {
        negated_energy / HAIRPIN_ENERGY_DIVISOR
    } else {
        0.0
    }
}

/// Normalizes a raw track of the given signal.
#[must_use]
pub fn normalize(kind: SignalKind, raw: &[f64], scoring: &ScoringConfig) -> Vec<f64> {
    match kind {
        SignalKind::Gc => raw.iter().map(|&x| gc_risk(x, &scoring.gc)).collect(),
        SignalKind::Homology => raw.iter().map(|&x| homology_risk(x)).collect(),
        SignalKind::Hairpin => raw
            .iter()
            .map(|&x| hairpin_risk(x, scoring.hairpin.threshold))
            .collect(),
        // already on the risk scale
        SignalKind::Repeat => raw.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band() -> GcConfig {
        GcConfig {
            window_size: 51,
            lower_threshold: 0.3,
            upper_threshold: 0.7,
        }
    }

    #[test]
    fn test_gc_risk_piecewise() {
        let config = band();
        assert_eq!(gc_risk(0.0, &config), 10.0);
        assert_eq!(gc_risk(0.2, &config), 10.0);
        assert_eq!(gc_risk(0.3, &config), 0.0);
        assert_eq!(gc_risk(0.5, &config), 0.0);
        assert_eq!(gc_risk(0.7, &config), 0.0);
        assert_eq!(gc_risk(0.85, &config), 10.0);
        assert_eq!(gc_risk(1.0, &config), 10.0);
        assert!((gc_risk(0.25, &config) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_gc_risk_symmetric_around_band() {
        let config = band();
        for delta in [0.01, 0.03, 0.05, 0.08, 0.1, 0.15] {
            let below = gc_risk(0.3 - delta, &config);
            let above = gc_risk(0.7 + delta, &config);
            assert!((below - above).abs() < 1e-9, "delta {delta}: {below} vs {above}");
        }
    }

    #[test]
    fn test_gc_band_at_hard_limits() {
        let config = GcConfig {
            window_size: 51,
            lower_threshold: 0.2,
            upper_threshold: 0.8,
        };
        assert_eq!(gc_risk(0.21, &config), 0.0);
        assert_eq!(gc_risk(0.8, &config), 0.0);
        assert_eq!(gc_risk(0.81, &config), 10.0);
    }

    #[test]
    fn test_hairpin_risk_threshold() {
        assert_eq!(hairpin_risk(3000.0, 3000.0), 0.0);
        assert_eq!(hairpin_risk(5000.0, 3000.0), 10.0);
        assert_eq!(hairpin_risk(-200.0, 0.0), 0.0);
    }

    #[test]
    fn test_normalize_dispatch() {
        let scoring = ScoringConfig::default();
        assert_eq!(
            normalize(SignalKind::Homology, &[0.0, 50.0], &scoring),
            vec![0.0, 5.0]
        );
        assert_eq!(
            normalize(SignalKind::Repeat, &[1.5, 0.0], &scoring),
            vec![1.5, 0.0]
        );
        assert_eq!(normalize(SignalKind::Gc, &[0.5], &scoring), vec![0.0]);
    }
}
