use std::cmp::Ordering;

use super::factors::{Feature, FEATURES};
use crate::types::{FeatureContribution, PlayerStats};

/// Upper bound on any probability. The model never claims certainty.
pub const MAX_PROBABILITY: f64 = 0.95;

/// Win probability for one season of statistics, in `[0, MAX_PROBABILITY]`.
pub fn score(stats: &PlayerStats) -> f64 {
    let total: f64 = FEATURES
        .iter()
        .map(|feature| {
            feature
                .probability_normalization()
                .apply(feature.raw_value(stats))
        })
        .sum();

    total.min(MAX_PROBABILITY)
}

/// Per-feature contributions, largest first. Ties keep declaration order.
pub fn explain(stats: &PlayerStats) -> Vec<FeatureContribution> {
    let mut contributions: Vec<FeatureContribution> = FEATURES
        .iter()
        .map(|feature| {
            let raw = feature.raw_value(stats);
            FeatureContribution {
                feature: feature.label().to_string(),
                value: display_value(*feature, raw),
                contribution: feature.explanation_normalization().apply(raw),
            }
        })
        .collect();

    // sort_by is stable, so equal contributions stay in FEATURES order
    contributions.sort_by(|a, b| {
        b.contribution
            .partial_cmp(&a.contribution)
            .unwrap_or(Ordering::Equal)
    });
    contributions
}

fn display_value(feature: Feature, raw: f64) -> f64 {
    match feature {
        Feature::MatchRating => round_to_tenth(raw),
        _ => raw,
    }
}

/// Round to one decimal using the exact binary value, so 8.85 (stored just
/// below) gives 8.8. Exact halves such as 7.25 round away from zero.
fn round_to_tenth(raw: f64) -> f64 {
    let quarters = raw * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return (raw.abs() * 10.0).ceil().copysign(raw) / 10.0;
    }
    format!("{:.1}", raw).parse().unwrap_or(raw)
}
