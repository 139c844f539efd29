pub mod seed;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::SeedError;
use crate::types::{Player, PlayerStats, Prediction};

/// Read access to players, per-season statistics, and stored predictions.
pub trait Repository: Send + Sync {
    /// The current season plus every season with stored predictions, newest
    /// first. "YYYY-YY" identifiers sort chronologically as strings.
    fn list_seasons(&self) -> Vec<String>;

    /// Stored predictions for a season, rank ascending. Empty if none.
    fn predictions(&self, season: &str) -> Vec<Prediction>;

    fn stats(&self, player_id: &str, season: &str) -> Option<PlayerStats>;

    fn player(&self, player_id: &str) -> Option<Player>;
}

/// In-memory store populated once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    current_season: String,
    players: HashMap<String, Player>,
    stats: HashMap<(String, String), PlayerStats>,
    predictions: BTreeMap<String, Vec<Prediction>>,
}

impl MemoryStore {
    /// Build a store from seed records.
    ///
    /// Rejects duplicate players, more than one stats row per (player, season),
    /// ranks that are not exactly 1..N within a season, and probabilities
    /// outside [0, 1]. Whether predictions point at existing players and stats
    /// is not checked here; the resolver reports that at query time.
    pub fn from_records(
        current_season: &str,
        players: Vec<Player>,
        stats: Vec<PlayerStats>,
        predictions: Vec<Prediction>,
    ) -> Result<Self, SeedError> {
        let mut player_map = HashMap::new();
        for player in players {
            if player_map.contains_key(&player.id) {
                return Err(SeedError::DuplicatePlayer(player.id));
            }
            player_map.insert(player.id.clone(), player);
        }

        let mut stats_map = HashMap::new();
        for row in stats {
            let key = (row.player_id.clone(), row.season.clone());
            if stats_map.contains_key(&key) {
                return Err(SeedError::DuplicateStats {
                    player_id: row.player_id,
                    season: row.season,
                });
            }
            stats_map.insert(key, row);
        }

        let mut by_season: BTreeMap<String, Vec<Prediction>> = BTreeMap::new();
        for prediction in predictions {
            if !(0.0..=1.0).contains(&prediction.probability) {
                return Err(SeedError::ProbabilityOutOfRange {
                    player_id: prediction.player_id,
                    season: prediction.season,
                    probability: prediction.probability,
                });
            }
            by_season
                .entry(prediction.season.clone())
                .or_default()
                .push(prediction);
        }

        for (season, rows) in by_season.iter_mut() {
            rows.sort_by_key(|p| p.rank);
            let dense = rows
                .iter()
                .enumerate()
                .all(|(i, p)| p.rank as usize == i + 1);
            if !dense {
                return Err(SeedError::RankGap {
                    season: season.clone(),
                });
            }
        }

        Ok(Self {
            current_season: current_season.to_string(),
            players: player_map,
            stats: stats_map,
            predictions: by_season,
        })
    }

    /// The built-in roster with the 2021-22 through 2023-24 seasons.
    pub fn seeded(current_season: &str) -> Result<Self, SeedError> {
        Self::from_records(
            current_season,
            seed::players(),
            seed::stats(),
            seed::predictions(),
        )
    }
}

impl Repository for MemoryStore {
    fn list_seasons(&self) -> Vec<String> {
        let seasons: BTreeSet<&str> = std::iter::once(self.current_season.as_str())
            .chain(self.predictions.keys().map(String::as_str))
            .collect();
        seasons.into_iter().rev().map(str::to_string).collect()
    }

    fn predictions(&self, season: &str) -> Vec<Prediction> {
        self.predictions.get(season).cloned().unwrap_or_default()
    }

    fn stats(&self, player_id: &str, season: &str) -> Option<PlayerStats> {
        self.stats
            .get(&(player_id.to_string(), season.to_string()))
            .cloned()
    }

    fn player(&self, player_id: &str) -> Option<Player> {
        self.players.get(player_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn store() -> MemoryStore {
        MemoryStore::seeded("2024-25").unwrap()
    }

    fn prediction(player_id: &str, season: &str, rank: u32, probability: f64) -> Prediction {
        Prediction {
            player_id: player_id.to_string(),
            season: season.to_string(),
            probability,
            rank,
            model_version: seed::MODEL_VERSION.to_string(),
        }
    }

    #[test]
    fn test_list_seasons_descending_with_current() {
        assert_eq!(
            store().list_seasons(),
            vec!["2024-25", "2023-24", "2022-23", "2021-22"]
        );
    }

    #[test]
    fn test_list_seasons_deduplicates_current() {
        let store = MemoryStore::seeded("2023-24").unwrap();
        assert_eq!(store.list_seasons(), vec!["2023-24", "2022-23", "2021-22"]);
    }

    #[test]
    fn test_predictions_rank_ascending() {
        let preds = store().predictions("2022-23");
        assert_eq!(preds.len(), 8);
        assert_eq!(preds[0].player_id, "2");
        assert_eq!(preds[0].probability, 0.85);
        let ranks: Vec<u32> = preds.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_unknown_season_has_no_predictions() {
        assert!(store().predictions("1999-00").is_empty());
    }

    #[test]
    fn test_stats_and_player_lookup() {
        let store = store();
        let stats = store.stats("10", "2022-23").unwrap();
        assert_eq!(stats.assists, 31);
        assert!(store.stats("10", "2023-24").is_none());

        let player = store.player("7").unwrap();
        assert_eq!(player.name, "Lamine Yamal");
        assert_eq!(player.position, Position::Winger);
        assert!(store.player("11").is_none());
    }

    #[test]
    fn test_rank_gap_rejected() {
        let err = MemoryStore::from_records(
            "2024-25",
            seed::players(),
            vec![],
            vec![prediction("1", "2020-21", 1, 0.5), prediction("2", "2020-21", 3, 0.4)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            SeedError::RankGap {
                season: "2020-21".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_rank_rejected() {
        let result = MemoryStore::from_records(
            "2024-25",
            seed::players(),
            vec![],
            vec![prediction("1", "2020-21", 1, 0.5), prediction("2", "2020-21", 1, 0.4)],
        );
        assert!(matches!(result, Err(SeedError::RankGap { .. })));
    }

    #[test]
    fn test_duplicate_stats_rejected() {
        let mut stats = seed::stats();
        stats.push(stats[0].clone());
        let result =
            MemoryStore::from_records("2024-25", seed::players(), stats, seed::predictions());
        assert!(matches!(result, Err(SeedError::DuplicateStats { .. })));
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let result = MemoryStore::from_records(
            "2024-25",
            seed::players(),
            vec![],
            vec![prediction("1", "2020-21", 1, 1.2)],
        );
        assert!(matches!(result, Err(SeedError::ProbabilityOutOfRange { .. })));
    }
}
