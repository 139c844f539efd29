use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::Config;
use crate::error::PredictorError;
use crate::resolver::SeasonResolver;
use crate::scoring::{feature_importance, model_metrics};
use crate::source::{
    create_client, get_cache_path, Gateway, GatewaySettings, HttpSource, ResponseCache,
    ScorerSource,
};
use crate::store::{MemoryStore, Repository};
use crate::types::{FeatureImportance, ModelMetrics, PredictionResult};

/// The query surface a presentation layer talks to.
///
/// Built once at startup. The store is read-only and the cache is the only
/// shared mutable state, so a single instance can serve concurrent requests.
pub struct PredictionService<S> {
    resolver: SeasonResolver<S>,
    store: Arc<dyn Repository>,
}

impl<S: ScorerSource> PredictionService<S> {
    pub fn new(resolver: SeasonResolver<S>, store: Arc<dyn Repository>) -> Self {
        Self { resolver, store }
    }

    /// Wire a service around any source using the seeded store and the
    /// settings from `config`.
    pub fn with_source(source: S, config: &Config, cache: ResponseCache) -> Result<Self> {
        let store: Arc<dyn Repository> = Arc::new(
            MemoryStore::seeded(&config.current_season).context("Failed to load seed data")?,
        );
        let settings = GatewaySettings {
            season: config.current_season.clone(),
            competitions: config.competitions.clone(),
            scorer_limit: config.scorer_limit,
            top_n: config.top_n,
            request_delay: config.request_delay()?,
        };
        let gateway = Gateway::new(source, cache, settings);
        let resolver = SeasonResolver::new(gateway, Arc::clone(&store), &config.current_season);
        Ok(Self::new(resolver, store))
    }

    pub fn current_season(&self) -> &str {
        self.resolver.current_season()
    }

    /// Ranked predictions for a season.
    ///
    /// Whether they came from the live source or the store is not exposed.
    /// An unknown season yields an empty list.
    pub async fn predictions(
        &self,
        season: &str,
    ) -> std::result::Result<Vec<PredictionResult>, PredictorError> {
        Ok(self.resolver.resolve(season).await?.into_results())
    }

    /// Seasons that can be queried, newest first.
    pub fn available_seasons(&self) -> Vec<String> {
        self.store.list_seasons()
    }

    pub fn feature_importance(&self) -> Vec<FeatureImportance> {
        feature_importance()
    }

    pub fn model_metrics(&self) -> ModelMetrics {
        model_metrics()
    }
}

impl PredictionService<HttpSource> {
    /// Build the production service talking to the statistics API.
    ///
    /// With `disk_cache` set, responses are also kept under the platform
    /// cache directory so separate runs share them.
    pub fn from_config(config: &Config, api_key: &str, disk_cache: bool) -> Result<Self> {
        let client = create_client(api_key)?;
        let source = HttpSource::new(client, &config.base_url);
        let ttl = config.cache_ttl()?;
        let cache = if disk_cache {
            ResponseCache::with_disk(ttl, get_cache_path())
        } else {
            ResponseCache::in_memory(ttl)
        };
        Self::with_source(source, config, cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::gateway::tests::{scorers_body, FakeSource};
    use std::time::Duration;

    fn config() -> Config {
        Config {
            request_delay: "0ms".to_string(),
            ..Config::default()
        }
    }

    fn service(source: FakeSource) -> PredictionService<FakeSource> {
        PredictionService::with_source(
            source,
            &config(),
            ResponseCache::in_memory(Duration::from_secs(3600)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_predictions_hide_resolution_path() {
        let svc = service(FakeSource::default().with("BL1", scorers_body(&[(5, "Kane", 30, 30)])));
        let live = svc.predictions("2024-25").await.unwrap();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].player.club, "Kane FC");

        let stored = svc.predictions("2021-22").await.unwrap();
        assert_eq!(stored.len(), 5);
        assert_eq!(stored[0].player.id, "1");
        assert_eq!(stored[0].probability, 0.82);
    }

    #[test]
    fn test_available_seasons_include_current() {
        let svc = service(FakeSource::default());
        assert_eq!(svc.current_season(), "2024-25");
        assert_eq!(
            svc.available_seasons(),
            vec!["2024-25", "2023-24", "2022-23", "2021-22"]
        );
    }

    #[test]
    fn test_static_model_card() {
        let svc = service(FakeSource::default());
        assert_eq!(svc.feature_importance().len(), 6);
        assert_eq!(svc.model_metrics().accuracy, 0.72);
    }

    #[test]
    fn test_bad_delay_is_rejected() {
        let config = Config {
            request_delay: "whenever".to_string(),
            ..Config::default()
        };
        let result = PredictionService::with_source(
            FakeSource::default(),
            &config,
            ResponseCache::in_memory(Duration::from_secs(1)),
        );
        assert!(result.is_err());
    }
}
