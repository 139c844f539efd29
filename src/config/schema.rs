use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_CURRENT_SEASON: &str = "2024-25";
pub const DEFAULT_BASE_URL: &str = "https://api.football-data.org/v4";

/// Main configuration.
///
/// Every key is optional. Example YAML:
/// ```yaml
/// current_season: "2024-25"
/// request_delay: "6500ms"
/// cache_ttl: "1h"
/// competitions:
///   - { id: PL, name: Premier League }
///   - { id: SA, name: Serie A }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Season served from the live source; all others are historical
    pub current_season: String,

    pub base_url: String,

    /// Competitions whose scorer listings feed the live season, in request order
    pub competitions: Vec<CompetitionConfig>,

    /// Entries requested per competition listing
    pub scorer_limit: u32,

    /// How many live predictions to return
    pub top_n: usize,

    /// Pause between competition requests, e.g. "6500ms"
    pub request_delay: String,

    /// How long an upstream response stays fresh, e.g. "1h"
    pub cache_ttl: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CompetitionConfig {
    pub id: String,
    pub name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            current_season: DEFAULT_CURRENT_SEASON.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            competitions: [
                ("PL", "Premier League"),
                ("PD", "La Liga"),
                ("FL1", "Ligue 1"),
                ("BL1", "Bundesliga"),
                ("SA", "Serie A"),
            ]
            .iter()
            .map(|(id, name)| CompetitionConfig {
                id: id.to_string(),
                name: name.to_string(),
            })
            .collect(),
            scorer_limit: 20,
            top_n: 10,
            request_delay: "6500ms".to_string(),
            cache_ttl: "1h".to_string(),
        }
    }
}

impl Config {
    pub fn request_delay(&self) -> Result<Duration> {
        humantime::parse_duration(self.request_delay.trim())
            .with_context(|| format!("Invalid request_delay '{}'", self.request_delay))
    }

    pub fn cache_ttl(&self) -> Result<Duration> {
        humantime::parse_duration(self.cache_ttl.trim())
            .with_context(|| format!("Invalid cache_ttl '{}'", self.cache_ttl))
    }
}
