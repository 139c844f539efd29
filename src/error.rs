use thiserror::Error;

/// A single competition fetch failed. Recovered by skipping that competition.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("malformed payload from {endpoint}: {message}")]
    Malformed { endpoint: String, message: String },
}

/// The live path produced nothing usable. The resolver recovers from this by
/// falling back to stored predictions; callers never see it.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("all {attempted} competitions failed")]
    AllCompetitionsFailed { attempted: usize },

    #[error("could not build season statistics: {0}")]
    Synthesis(String),
}

/// Which side of a stored prediction's join was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingRow {
    Player,
    Stats,
}

impl std::fmt::Display for MissingRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingRow::Player => write!(f, "player"),
            MissingRow::Stats => write!(f, "stats"),
        }
    }
}

/// Seed records that break the store's invariants.
#[derive(Debug, Error, PartialEq)]
pub enum SeedError {
    #[error("duplicate player id {0}")]
    DuplicatePlayer(String),

    #[error("duplicate stats for player {player_id} in {season}")]
    DuplicateStats { player_id: String, season: String },

    #[error("ranks for {season} are not a dense 1..N sequence")]
    RankGap { season: String },

    #[error("probability {probability} for player {player_id} in {season} is outside [0, 1]")]
    ProbabilityOutOfRange {
        player_id: String,
        season: String,
        probability: f64,
    },
}

/// Errors a caller of the prediction service can observe.
#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("stored prediction for player {player_id} in {season} has no matching {missing} row")]
    DataConsistency {
        season: String,
        player_id: String,
        missing: MissingRow,
    },
}

pub type Result<T> = std::result::Result<T, PredictorError>;
