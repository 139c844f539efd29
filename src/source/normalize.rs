use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

use super::types::{Scorer, ScorerPlayer, ScorerTeam, ScorersResponse};
use crate::error::{GatewayError, SourceError};
use crate::types::{Player, PlayerStats, Position};

/// Age used when the upstream has no usable date of birth.
pub const DEFAULT_AGE: u32 = 25;

const MINUTES_PER_APPEARANCE: u32 = 90;
const BASE_RATING: f64 = 7.5;

/// Parse a scorers body, rejecting anything that does not match the expected shape.
pub fn parse_scorers(endpoint: &str, body: &str) -> Result<ScorersResponse, SourceError> {
    serde_json::from_str(body).map_err(|e| SourceError::Malformed {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

#[derive(Debug, Clone)]
pub struct MergedScorer {
    pub player: ScorerPlayer,
    pub team: ScorerTeam,
    pub goals: u32,
    pub appearances: u32,
}

/// Scorers from several competitions folded into one row per player.
///
/// Goals add up across competitions. Appearances take the largest value seen,
/// since a single listing may under-report. The first identity seen for a
/// player is kept. Rows stay in first-seen order.
#[derive(Debug, Default)]
pub struct ScorerTable {
    rows: Vec<MergedScorer>,
    index: HashMap<u64, usize>,
}

impl ScorerTable {
    pub fn merge(&mut self, scorers: Vec<Scorer>) -> Result<(), GatewayError> {
        for scorer in scorers {
            let goals = scorer.goals.unwrap_or(0);
            let played = scorer.played_matches.unwrap_or(0);

            match self.index.get(&scorer.player.id) {
                Some(&i) => {
                    let row = &mut self.rows[i];
                    row.goals = row.goals.checked_add(goals).ok_or_else(|| {
                        GatewayError::Synthesis(format!(
                            "goal total overflowed for player {}",
                            row.player.id
                        ))
                    })?;
                    row.appearances = row.appearances.max(played);
                }
                None => {
                    self.index.insert(scorer.player.id, self.rows.len());
                    self.rows.push(MergedScorer {
                        player: scorer.player,
                        team: scorer.team,
                        goals,
                        appearances: played,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[MergedScorer] {
        &self.rows
    }
}

/// Build a season's statistics from a merged scorer row.
///
/// The source has no assists or trophies, so both are zero. Minutes are
/// estimated at 90 per appearance and the rating is estimated from goals.
pub fn synthesize_stats(row: &MergedScorer, season: &str) -> Result<PlayerStats, GatewayError> {
    let minutes_played = row
        .appearances
        .checked_mul(MINUTES_PER_APPEARANCE)
        .ok_or_else(|| {
            GatewayError::Synthesis(format!(
                "minutes overflowed for player {} ({} appearances)",
                row.player.id, row.appearances
            ))
        })?;

    Ok(PlayerStats {
        player_id: row.player.id.to_string(),
        season: season.to_string(),
        goals: row.goals,
        assists: 0,
        appearances: row.appearances,
        minutes_played,
        trophies: 0,
        avg_rating: BASE_RATING + (f64::from(row.goals) / 50.0) * 1.5,
    })
}

pub fn synthesize_player(row: &MergedScorer, today: NaiveDate) -> Player {
    let age = row
        .player
        .date_of_birth
        .as_deref()
        .and_then(|dob| age_on(dob, today))
        .unwrap_or(DEFAULT_AGE);

    Player {
        id: row.player.id.to_string(),
        name: row.player.name.clone(),
        position: Position::from_label(row.player.position.as_deref()),
        nationality: row
            .player
            .nationality
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        club: row.team.name.clone(),
        age,
    }
}

/// Whole years between a `YYYY-MM-DD` birth date and `today`.
pub fn age_on(date_of_birth: &str, today: NaiveDate) -> Option<u32> {
    let dob = NaiveDate::parse_from_str(date_of_birth.trim(), "%Y-%m-%d").ok()?;
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer(id: u64, goals: Option<u32>, played: Option<u32>, team: &str) -> Scorer {
        Scorer {
            player: ScorerPlayer {
                id,
                name: format!("Player {}", id),
                position: Some("Offence".to_string()),
                nationality: Some("England".to_string()),
                date_of_birth: Some("1993-07-28".to_string()),
            },
            team: ScorerTeam {
                name: team.to_string(),
            },
            goals,
            played_matches: played,
        }
    }

    #[test]
    fn test_parse_scorers_payload() {
        let body = r#"{
            "count": 1,
            "scorers": [{
                "player": {"id": 38101, "name": "Erling Haaland", "position": "Centre-Forward",
                           "nationality": "Norway", "dateOfBirth": "2000-07-21"},
                "team": {"id": 65, "name": "Manchester City FC"},
                "playedMatches": 31, "goals": 27, "assists": 5, "penalties": 7
            }]
        }"#;
        let parsed = parse_scorers("/competitions/PL/scorers?limit=20", body).unwrap();
        assert_eq!(parsed.scorers.len(), 1);
        assert_eq!(parsed.scorers[0].player.id, 38101);
        assert_eq!(parsed.scorers[0].goals, Some(27));
        assert_eq!(parsed.scorers[0].played_matches, Some(31));
    }

    #[test]
    fn test_parse_missing_scorers_key_is_empty() {
        let parsed = parse_scorers("/e", r#"{"count": 0}"#).unwrap();
        assert!(parsed.scorers.is_empty());
    }

    #[test]
    fn test_parse_malformed_payload() {
        let err = parse_scorers("/e", r#"{"scorers": [{"player": "nope"}]}"#).unwrap_err();
        assert!(matches!(err, SourceError::Malformed { .. }));
    }

    #[test]
    fn test_merge_sums_goals_and_takes_max_appearances() {
        let mut table = ScorerTable::default();
        table
            .merge(vec![scorer(1, Some(20), Some(30), "Bayern"), scorer(2, Some(5), Some(10), "X")])
            .unwrap();
        table
            .merge(vec![scorer(1, Some(6), Some(8), "Other Club")])
            .unwrap();

        assert_eq!(table.len(), 2);
        let row = &table.rows()[0];
        assert_eq!(row.goals, 26);
        assert_eq!(row.appearances, 30);
        assert_eq!(row.team.name, "Bayern");
    }

    #[test]
    fn test_merge_missing_counts_as_zero() {
        let mut table = ScorerTable::default();
        table.merge(vec![scorer(7, None, None, "Club")]).unwrap();
        assert_eq!(table.rows()[0].goals, 0);
        assert_eq!(table.rows()[0].appearances, 0);
    }

    #[test]
    fn test_merge_goal_overflow_is_synthesis_error() {
        let mut table = ScorerTable::default();
        table.merge(vec![scorer(1, Some(u32::MAX), Some(1), "A")]).unwrap();
        let err = table.merge(vec![scorer(1, Some(1), Some(1), "B")]).unwrap_err();
        assert!(matches!(err, GatewayError::Synthesis(_)));
    }

    #[test]
    fn test_synthesized_rating_displays_exact_tenth() {
        // 45 goals gives a rating of 8.85, held as 8.8499...
        let mut table = ScorerTable::default();
        table.merge(vec![scorer(4, Some(45), Some(34), "Club")]).unwrap();
        let stats = synthesize_stats(&table.rows()[0], "2024-25").unwrap();

        let rating = crate::scoring::explain(&stats)
            .into_iter()
            .find(|c| c.feature == "Match Rating")
            .unwrap();
        assert_eq!(format!("{:.1}", rating.value), "8.8");
        assert_eq!(rating.value, 8.8);
    }

    #[test]
    fn test_synthesize_stats_estimates() {
        let mut table = ScorerTable::default();
        table.merge(vec![scorer(9, Some(25), Some(30), "Club")]).unwrap();
        let stats = synthesize_stats(&table.rows()[0], "2024-25").unwrap();

        assert_eq!(stats.player_id, "9");
        assert_eq!(stats.season, "2024-25");
        assert_eq!(stats.minutes_played, 2700);
        assert_eq!(stats.assists, 0);
        assert_eq!(stats.trophies, 0);
        assert!((stats.avg_rating - 8.25).abs() < 1e-9);
    }

    #[test]
    fn test_synthesize_player_defaults() {
        let mut row_source = scorer(3, Some(1), Some(1), "Club");
        row_source.player.position = None;
        row_source.player.nationality = None;
        row_source.player.date_of_birth = None;
        let mut table = ScorerTable::default();
        table.merge(vec![row_source]).unwrap();

        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let player = synthesize_player(&table.rows()[0], today);
        assert_eq!(player.position, Position::Forward);
        assert_eq!(player.nationality, "Unknown");
        assert_eq!(player.age, DEFAULT_AGE);
        assert_eq!(player.club, "Club");
    }

    #[test]
    fn test_age_on_birthday_boundary() {
        let today = NaiveDate::from_ymd_opt(2025, 7, 27).unwrap();
        assert_eq!(age_on("1993-07-28", today), Some(31));
        let birthday = NaiveDate::from_ymd_opt(2025, 7, 28).unwrap();
        assert_eq!(age_on("1993-07-28", birthday), Some(32));
        assert_eq!(age_on("not a date", today), None);
    }
}
