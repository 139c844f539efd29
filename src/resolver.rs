use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{MissingRow, PredictorError, Result};
use crate::scoring::explain;
use crate::source::{Gateway, ScorerSource};
use crate::store::Repository;
use crate::types::PredictionResult;

/// Where a season's results came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Freshly fetched and scored from the live source.
    Live(Vec<PredictionResult>),
    /// Read from stored predictions, ranks as stored.
    Historical(Vec<PredictionResult>),
}

impl Resolution {
    pub fn is_live(&self) -> bool {
        matches!(self, Resolution::Live(_))
    }

    pub fn results(&self) -> &[PredictionResult] {
        match self {
            Resolution::Live(results) | Resolution::Historical(results) => results,
        }
    }

    pub fn into_results(self) -> Vec<PredictionResult> {
        match self {
            Resolution::Live(results) | Resolution::Historical(results) => results,
        }
    }
}

/// Decides per request whether a season is served live or from the store.
pub struct SeasonResolver<S> {
    gateway: Gateway<S>,
    store: Arc<dyn Repository>,
    current_season: String,
}

impl<S: ScorerSource> SeasonResolver<S> {
    pub fn new(gateway: Gateway<S>, store: Arc<dyn Repository>, current_season: &str) -> Self {
        Self {
            gateway,
            store,
            current_season: current_season.to_string(),
        }
    }

    pub fn current_season(&self) -> &str {
        &self.current_season
    }

    /// Resolve a season.
    ///
    /// The current season goes to the live gateway first; any gateway failure
    /// falls back to stored predictions for the same identifier, which may
    /// legitimately be empty. Every other season is read from the store. The
    /// only error is a stored prediction whose player or stats row is missing.
    pub async fn resolve(&self, season: &str) -> Result<Resolution> {
        if season == self.current_season {
            match self.gateway.fetch_current_season().await {
                Ok(results) => {
                    info!(season, count = results.len(), "serving live predictions");
                    return Ok(Resolution::Live(results));
                }
                Err(e) => {
                    warn!(season, error = %e, "live fetch failed, falling back to stored predictions");
                }
            }
        }

        let results = self.historical(season)?;
        info!(season, count = results.len(), "serving stored predictions");
        Ok(Resolution::Historical(results))
    }

    /// Join stored predictions with their player and stats rows. Stored ranks
    /// and probabilities are kept as-is; only the contributions are computed.
    pub fn historical(&self, season: &str) -> Result<Vec<PredictionResult>> {
        let mut results = self
            .store
            .predictions(season)
            .into_iter()
            .map(|prediction| {
                let missing = |missing| PredictorError::DataConsistency {
                    season: season.to_string(),
                    player_id: prediction.player_id.clone(),
                    missing,
                };
                let player = self
                    .store
                    .player(&prediction.player_id)
                    .ok_or_else(|| missing(MissingRow::Player))?;
                let stats = self
                    .store
                    .stats(&prediction.player_id, season)
                    .ok_or_else(|| missing(MissingRow::Stats))?;

                Ok(PredictionResult {
                    player,
                    probability: prediction.probability,
                    rank: prediction.rank,
                    top_features: explain(&stats),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        results.sort_by_key(|r| r.rank);
        Ok(results)
    }
}
