use crate::types::PlayerStats;

/// Features in declaration order. Explanations that tie on contribution keep
/// this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Goals,
    Assists,
    Trophies,
    MatchRating,
}

pub const FEATURES: [Feature; 4] = [
    Feature::Goals,
    Feature::Assists,
    Feature::Trophies,
    Feature::MatchRating,
];

/// Ratings at or below this baseline contribute nothing.
pub const RATING_BASELINE: f64 = 6.0;

/// How a feature is normalized before weighting: `min((x - offset) / scale, 1)`,
/// floored at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub offset: f64,
    pub scale: f64,
    pub weight: f64,
}

impl Normalization {
    const fn new(scale: f64, weight: f64) -> Self {
        Self {
            offset: 0.0,
            scale,
            weight,
        }
    }

    pub fn apply(&self, raw: f64) -> f64 {
        ((raw - self.offset) / self.scale).min(1.0).max(0.0) * self.weight
    }
}

const RATING: Normalization = Normalization {
    offset: RATING_BASELINE,
    scale: 3.0,
    weight: 0.20,
};

impl Feature {
    pub fn label(&self) -> &'static str {
        match self {
            Feature::Goals => "Goals",
            Feature::Assists => "Assists",
            Feature::Trophies => "Trophies",
            Feature::MatchRating => "Match Rating",
        }
    }

    pub fn raw_value(&self, stats: &PlayerStats) -> f64 {
        match self {
            Feature::Goals => f64::from(stats.goals),
            Feature::Assists => f64::from(stats.assists),
            Feature::Trophies => f64::from(stats.trophies),
            Feature::MatchRating => stats.avg_rating,
        }
    }

    /// Constants used for the win probability.
    pub fn probability_normalization(&self) -> Normalization {
        match self {
            Feature::Goals => Normalization::new(50.0, 0.35),
            Feature::Assists => Normalization::new(20.0, 0.20),
            Feature::Trophies => Normalization::new(4.0, 0.25),
            Feature::MatchRating => RATING,
        }
    }

    /// Constants used for explanations. Goals and assists saturate later than
    /// in the probability; the two sets are tuned independently and must not be
    /// unified.
    pub fn explanation_normalization(&self) -> Normalization {
        match self {
            Feature::Goals => Normalization::new(60.0, 0.35),
            Feature::Assists => Normalization::new(25.0, 0.20),
            Feature::Trophies => Normalization::new(4.0, 0.25),
            Feature::MatchRating => RATING,
        }
    }
}
