use serde::{Deserialize, Serialize};
use std::fmt;

/// Playing position. Upstream labels are folded onto this small set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Forward,
    Winger,
    Midfielder,
    Defender,
    Goalkeeper,
}

impl Position {
    /// Map an upstream position label onto a `Position`.
    ///
    /// Absent or unrecognized labels default to `Forward`: the live source only
    /// lists top scorers, so that is the overwhelmingly likely role.
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return Position::Forward;
        };
        let lower = label.to_ascii_lowercase();
        if lower.contains("wing") {
            Position::Winger
        } else if lower.contains("goalkeeper") || lower == "keeper" {
            Position::Goalkeeper
        } else if lower.contains("midfield") {
            Position::Midfielder
        } else if lower.contains("back") || lower.contains("defen") {
            Position::Defender
        } else {
            Position::Forward
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Forward => write!(f, "Forward"),
            Position::Winger => write!(f, "Winger"),
            Position::Midfielder => write!(f, "Midfielder"),
            Position::Defender => write!(f, "Defender"),
            Position::Goalkeeper => write!(f, "Goalkeeper"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub position: Position,
    pub nationality: String,
    pub club: String,
    pub age: u32,
}

/// One season of statistics for one player.
///
/// `minutes_played` is expected to sit near `appearances * 90` but nothing
/// enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub player_id: String,
    pub season: String,
    pub goals: u32,
    pub assists: u32,
    pub appearances: u32,
    pub minutes_played: u32,
    pub trophies: u32,
    pub avg_rating: f64,
}

/// A stored prediction for one player in one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub player_id: String,
    pub season: String,
    pub probability: f64,
    pub rank: u32,
    pub model_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub feature: String,
    pub value: f64,
    pub contribution: f64,
}

/// What callers see: a player with a probability, a rank and the
/// contributions ordered by descending weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub player: Player,
    pub probability: f64,
    pub rank: u32,
    pub top_features: Vec<FeatureContribution>,
}

impl PredictionResult {
    /// The highest-weighted contribution, if any.
    pub fn top_feature(&self) -> Option<&FeatureContribution> {
        self.top_features.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub top3_accuracy: f64,
    pub top5_accuracy: f64,
    pub roc_auc: f64,
}
