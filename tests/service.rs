use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ballon_predict::config::Config;
use ballon_predict::error::SourceError;
use ballon_predict::service::PredictionService;
use ballon_predict::source::{ResponseCache, ScorerSource};

/// Answers from canned bodies keyed by competition id; anything else is a 429.
#[derive(Clone, Default)]
struct StubSource {
    bodies: HashMap<&'static str, String>,
    calls: Arc<AtomicUsize>,
}

impl ScorerSource for StubSource {
    async fn fetch(&self, endpoint: &str) -> Result<String, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bodies
            .iter()
            .find(|(id, _)| endpoint.starts_with(&format!("/competitions/{}/", id)))
            .map(|(_, body)| body.clone())
            .ok_or_else(|| SourceError::Status {
                endpoint: endpoint.to_string(),
                status: 429,
            })
    }
}

fn scorer(id: u64, name: &str, team: &str, goals: u32, played: u32) -> serde_json::Value {
    serde_json::json!({
        "player": { "id": id, "name": name, "position": "Centre-Forward", "nationality": "Norway" },
        "team": { "name": team },
        "goals": goals,
        "playedMatches": played,
    })
}

fn config() -> Config {
    Config {
        request_delay: "0ms".to_string(),
        ..Config::default()
    }
}

fn service(source: StubSource) -> PredictionService<StubSource> {
    PredictionService::with_source(
        source,
        &config(),
        ResponseCache::in_memory(Duration::from_secs(3600)),
    )
    .unwrap()
}

#[tokio::test]
async fn live_season_is_ranked_by_probability() {
    let mut source = StubSource::default();
    source.bodies.insert(
        "PL",
        serde_json::json!({ "scorers": [
            scorer(1, "Haaland", "Manchester City", 22, 25),
            scorer(2, "Salah", "Liverpool", 28, 30),
        ]})
        .to_string(),
    );
    source.bodies.insert(
        "PD",
        serde_json::json!({ "scorers": [scorer(3, "Lewandowski", "Barcelona", 25, 30)] })
            .to_string(),
    );
    let calls = source.calls.clone();
    let svc = service(source);

    let results = svc.predictions("2024-25").await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 5);
    let names: Vec<&str> = results.iter().map(|r| r.player.name.as_str()).collect();
    assert_eq!(names, vec!["Salah", "Lewandowski", "Haaland"]);
    let ranks: Vec<u32> = results.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
    assert!(results.iter().all(|r| (0.0..=0.95).contains(&r.probability)));
    assert_eq!(results[0].player.age, 25);
    assert_eq!(results[0].top_features[0].feature, "Goals");
}

#[tokio::test]
async fn repeated_live_request_is_served_from_cache() {
    let mut source = StubSource::default();
    source.bodies.insert(
        "SA",
        serde_json::json!({ "scorers": [scorer(9, "Retegui", "Atalanta", 20, 30)] }).to_string(),
    );
    let calls = source.calls.clone();
    let svc = service(source);

    let first = svc.predictions("2024-25").await.unwrap();
    let second = svc.predictions("2024-25").await.unwrap();

    assert_eq!(first, second);
    // Only SA succeeded and was cached; the four failures are retried
    assert_eq!(calls.load(Ordering::SeqCst), 9);
}

#[tokio::test]
async fn unreachable_source_falls_back_to_history() {
    let svc = service(StubSource::default());
    let results = svc.predictions("2024-25").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn stored_season_matches_seed() {
    let svc = service(StubSource::default());
    let results = svc.predictions("2023-24").await.unwrap();

    assert_eq!(results.len(), 8);
    assert_eq!(results[0].player.id, "1");
    assert_eq!(results[0].rank, 1);
    assert_eq!(results[0].probability, 0.78);
    for pair in results.windows(2) {
        assert_eq!(pair[1].rank, pair[0].rank + 1);
    }
}

#[tokio::test]
async fn every_available_season_resolves() {
    let svc = service(StubSource::default());
    let seasons = svc.available_seasons();
    assert_eq!(seasons.first().map(String::as_str), Some("2024-25"));
    for season in &seasons {
        assert!(svc.predictions(season).await.is_ok());
    }
}

#[test]
fn model_card_is_static() {
    let svc = service(StubSource::default());
    let total: f64 = svc.feature_importance().iter().map(|f| f.importance).sum();
    assert!((total - 1.0).abs() < 1e-9);

    let metrics = svc.model_metrics();
    assert_eq!(metrics.top3_accuracy, 0.89);
    assert_eq!(metrics.roc_auc, 0.86);
}
