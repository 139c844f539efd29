//! Fixed roster and three historical seasons loaded at startup.

use crate::types::{Player, PlayerStats, Position, Prediction};

pub const MODEL_VERSION: &str = "v1.2.0";

pub fn players() -> Vec<Player> {
    [
        ("1", "Kylian Mbappé", Position::Forward, "France", "Real Madrid", 25),
        ("2", "Erling Haaland", Position::Forward, "Norway", "Manchester City", 24),
        ("3", "Vinicius Junior", Position::Winger, "Brazil", "Real Madrid", 24),
        ("4", "Jude Bellingham", Position::Midfielder, "England", "Real Madrid", 21),
        ("5", "Rodri", Position::Midfielder, "Spain", "Manchester City", 28),
        ("6", "Harry Kane", Position::Forward, "England", "Bayern Munich", 31),
        ("7", "Lamine Yamal", Position::Winger, "Spain", "Barcelona", 17),
        ("8", "Bukayo Saka", Position::Winger, "England", "Arsenal", 23),
        ("9", "Lionel Messi", Position::Forward, "Argentina", "Inter Miami", 37),
        ("10", "Kevin De Bruyne", Position::Midfielder, "Belgium", "Manchester City", 33),
    ]
    .into_iter()
    .map(|(id, name, position, nationality, club, age)| Player {
        id: id.to_string(),
        name: name.to_string(),
        position,
        nationality: nationality.to_string(),
        club: club.to_string(),
        age,
    })
    .collect()
}

type StatsRow = (&'static str, u32, u32, u32, u32, u32, f64);

// (player, goals, assists, appearances, minutes, trophies, rating)
const STATS_2023_24: [StatsRow; 8] = [
    ("1", 44, 10, 48, 4104, 2, 8.9),
    ("2", 38, 8, 45, 3823, 1, 8.7),
    ("3", 24, 11, 39, 3104, 2, 8.5),
    ("4", 23, 13, 42, 3568, 2, 8.6),
    ("5", 9, 14, 50, 4230, 2, 8.4),
    ("6", 44, 12, 45, 3923, 0, 8.3),
    ("7", 7, 10, 50, 3649, 1, 8.2),
    ("8", 20, 14, 47, 3872, 0, 8.1),
];

const STATS_2022_23: [StatsRow; 8] = [
    ("2", 52, 9, 53, 4473, 3, 9.1),
    ("1", 41, 10, 43, 3655, 0, 8.7),
    ("9", 21, 20, 41, 3237, 1, 8.5),
    ("3", 23, 21, 52, 4115, 1, 8.4),
    ("10", 10, 31, 50, 4234, 3, 8.6),
    ("5", 5, 10, 56, 4789, 3, 8.3),
    ("6", 32, 5, 49, 4234, 0, 8.2),
    ("8", 14, 11, 38, 3142, 0, 7.9),
];

const STATS_2021_22: [StatsRow; 6] = [
    ("2", 29, 8, 30, 2434, 0, 8.4),
    ("1", 39, 26, 46, 3842, 1, 8.6),
    ("3", 22, 20, 52, 4172, 2, 8.3),
    ("9", 11, 15, 35, 2753, 0, 7.8),
    ("6", 27, 9, 50, 4334, 0, 8.1),
    ("10", 15, 8, 45, 3823, 1, 8.2),
];

pub fn stats() -> Vec<PlayerStats> {
    let seasons: [(&str, &[StatsRow]); 3] = [
        ("2023-24", &STATS_2023_24),
        ("2022-23", &STATS_2022_23),
        ("2021-22", &STATS_2021_22),
    ];

    seasons
        .iter()
        .flat_map(|(season, rows)| {
            rows.iter().map(
                move |&(player_id, goals, assists, appearances, minutes_played, trophies, avg_rating)| {
                    PlayerStats {
                        player_id: player_id.to_string(),
                        season: season.to_string(),
                        goals,
                        assists,
                        appearances,
                        minutes_played,
                        trophies,
                        avg_rating,
                    }
                },
            )
        })
        .collect()
}

// (player, probability), listed in rank order
const PREDICTIONS_2023_24: [(&str, f64); 8] = [
    ("1", 0.78),
    ("2", 0.72),
    ("3", 0.65),
    ("4", 0.58),
    ("5", 0.52),
    ("6", 0.45),
    ("7", 0.38),
    ("8", 0.32),
];

const PREDICTIONS_2022_23: [(&str, f64); 8] = [
    ("2", 0.85),
    ("1", 0.76),
    ("9", 0.68),
    ("3", 0.62),
    ("10", 0.56),
    ("5", 0.48),
    ("6", 0.42),
    ("8", 0.35),
];

const PREDICTIONS_2021_22: [(&str, f64); 5] = [
    ("1", 0.82),
    ("3", 0.74),
    ("2", 0.65),
    ("10", 0.58),
    ("6", 0.51),
];

pub fn predictions() -> Vec<Prediction> {
    let seasons: [(&str, &[(&str, f64)]); 3] = [
        ("2023-24", &PREDICTIONS_2023_24),
        ("2022-23", &PREDICTIONS_2022_23),
        ("2021-22", &PREDICTIONS_2021_22),
    ];

    seasons
        .iter()
        .flat_map(|(season, rows)| {
            rows.iter()
                .enumerate()
                .map(move |(i, &(player_id, probability))| Prediction {
                    player_id: player_id.to_string(),
                    season: season.to_string(),
                    probability,
                    rank: (i + 1) as u32,
                    model_version: MODEL_VERSION.to_string(),
                })
        })
        .collect()
}
