use chrono::Utc;
use std::cmp::Ordering;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::cache::ResponseCache;
use super::client::ScorerSource;
use super::normalize::{parse_scorers, synthesize_player, synthesize_stats, ScorerTable};
use super::types::ScorersResponse;
use crate::config::CompetitionConfig;
use crate::error::{GatewayError, SourceError};
use crate::scoring::{explain, score};
use crate::types::PredictionResult;

/// What the gateway needs to know about the live season.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub season: String,
    pub competitions: Vec<CompetitionConfig>,
    pub scorer_limit: u32,
    pub top_n: usize,
    /// Pause between successive competition requests (upstream allows ~10/min).
    pub request_delay: Duration,
}

/// Pulls live scorer listings, one competition at a time, through the cache.
pub struct Gateway<S> {
    source: S,
    cache: ResponseCache,
    settings: GatewaySettings,
}

impl<S: ScorerSource> Gateway<S> {
    pub fn new(source: S, cache: ResponseCache, settings: GatewaySettings) -> Self {
        Self {
            source,
            cache,
            settings,
        }
    }

    pub fn scorers_endpoint(&self, competition_id: &str) -> String {
        format!(
            "/competitions/{}/scorers?limit={}",
            competition_id, self.settings.scorer_limit
        )
    }

    /// Fetch every configured competition, merge, score, and return the top N
    /// ranked by probability.
    ///
    /// Requests are strictly sequential with `request_delay` between them.
    /// A competition that fails is logged and skipped; only when every
    /// competition fails, or a merged row cannot be turned into statistics,
    /// does the whole fetch fail. Dropping the returned future cancels the
    /// remaining sequence.
    pub async fn fetch_current_season(&self) -> Result<Vec<PredictionResult>, GatewayError> {
        let competitions = &self.settings.competitions;
        let mut table = ScorerTable::default();
        let mut succeeded = 0usize;

        for (i, competition) in competitions.iter().enumerate() {
            if i > 0 && !self.settings.request_delay.is_zero() {
                debug!(delay = ?self.settings.request_delay, "waiting before next competition");
                tokio::time::sleep(self.settings.request_delay).await;
            }

            match self.fetch_competition(&competition.id).await {
                Ok(response) => {
                    info!(
                        competition = %competition.name,
                        scorers = response.scorers.len(),
                        "fetched scorers"
                    );
                    table.merge(response.scorers)?;
                    succeeded += 1;
                }
                Err(e) => {
                    warn!(competition = %competition.name, error = %e, "skipping competition");
                }
            }
        }

        if succeeded == 0 {
            return Err(GatewayError::AllCompetitionsFailed {
                attempted: competitions.len(),
            });
        }

        debug!(players = table.len(), succeeded, "merged scorer listings");
        self.rank(&table)
    }

    async fn fetch_competition(&self, competition_id: &str) -> Result<ScorersResponse, SourceError> {
        let endpoint = self.scorers_endpoint(competition_id);
        let key = endpoint.as_str();
        let source = &self.source;

        // Validate before caching so a malformed body is not kept for the TTL
        let body = self
            .cache
            .get_or_fetch(key, move || async move {
                let body = source.fetch(key).await?;
                parse_scorers(key, &body)?;
                Ok::<_, SourceError>(body)
            })
            .await?;

        parse_scorers(&endpoint, &body)
    }

    fn rank(&self, table: &ScorerTable) -> Result<Vec<PredictionResult>, GatewayError> {
        let today = Utc::now().date_naive();
        let mut results = table
            .rows()
            .iter()
            .map(|row| {
                let stats = synthesize_stats(row, &self.settings.season)?;
                Ok(PredictionResult {
                    player: synthesize_player(row, today),
                    probability: score(&stats),
                    rank: 0,
                    top_features: explain(&stats),
                })
            })
            .collect::<Result<Vec<_>, GatewayError>>()?;

        results.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(Ordering::Equal)
        });
        results.truncate(self.settings.top_n);
        for (i, result) in results.iter_mut().enumerate() {
            result.rank = (i + 1) as u32;
        }

        Ok(results)
    }
}
