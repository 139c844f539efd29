use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::types::{FeatureImportance, ModelMetrics, PredictionResult};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a probability in [0, 1] as a percentage with one decimal ("78.0%")
pub fn format_percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Pad to `width` characters, counting chars rather than bytes
fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

/// Format predictions as a ranked table
/// Columns: rank, probability, player, club, position, top feature (no headers)
/// Rank column: 3 chars (fits "99."), probability right-aligned in 6
pub fn format_leaderboard(results: &[PredictionResult], use_colors: bool) -> String {
    format_leaderboard_width(results, use_colors, get_terminal_width())
}

fn format_leaderboard_width(
    results: &[PredictionResult],
    use_colors: bool,
    term_width: Option<usize>,
) -> String {
    if results.is_empty() {
        return "No predictions available for this season.".to_string();
    }

    let separator = "  ";
    let widest = |f: fn(&PredictionResult) -> usize| results.iter().map(f).max().unwrap_or(0);
    let name_width = widest(|r| r.player.name.chars().count());
    let club_width = widest(|r| r.player.club.chars().count());
    let feature_width = widest(|r| r.top_feature().map_or(0, |f| f.feature.chars().count()));

    // Club absorbs any shortfall; name stays whole
    let fixed = 3 + 1 + 6 + separator.len() * 4 + name_width + 10 + feature_width;
    let club_col = match term_width {
        Some(width) if width > fixed + 10 => (width - fixed).min(club_width),
        Some(_) => club_width.min(10),
        None => club_width,
    };

    results
        .iter()
        .map(|result| {
            let rank_str = format!("{:>2}.", result.rank);
            let prob_str = format!("{:>6}", format_percent(result.probability));
            let name = pad(&result.player.name, name_width);
            let club = pad(&truncate_text(&result.player.club, club_col), club_col);
            let position = format!("{:<10}", result.player.position.to_string());
            let feature = result
                .top_feature()
                .map(|f| f.feature.clone())
                .unwrap_or_default();

            let line = if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}{}{}",
                    rank_str.dimmed(),
                    prob_str.bold(),
                    separator,
                    name.bold(),
                    separator,
                    club.cyan(),
                    separator,
                    position.yellow(),
                    separator,
                    feature.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}{}{}",
                    rank_str,
                    prob_str,
                    separator,
                    name,
                    separator,
                    club,
                    separator,
                    position,
                    separator,
                    feature
                )
            };
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single prediction with every feature contribution (for --detail)
pub fn format_prediction_detail(result: &PredictionResult, use_colors: bool) -> String {
    let player = &result.player;
    let header = format!(
        "{}. {} ({})",
        result.rank,
        player.name,
        format_percent(result.probability)
    );
    let mut lines = vec![
        if use_colors {
            header.bold().to_string()
        } else {
            header
        },
        format!("  Club: {}", player.club),
        format!("  Position: {}", player.position),
        format!("  Nationality: {}", player.nationality),
        format!("  Age: {}", player.age),
        "  Contributions:".to_string(),
    ];

    for contribution in &result.top_features {
        let line = format!(
            "    {:<14}{:>8}  +{:.3}",
            contribution.feature,
            format_value(contribution.value),
            contribution.contribution
        );
        lines.push(if use_colors {
            line.green().to_string()
        } else {
            line
        });
    }

    lines.join("\n")
}

/// Whole numbers print without decimals, ratings keep one
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// One season per line, newest first, current season marked
pub fn format_seasons(seasons: &[String], current: &str, use_colors: bool) -> String {
    seasons
        .iter()
        .map(|season| {
            if season == current {
                if use_colors {
                    format!("{} {}", season.bold(), "(current)".green())
                } else {
                    format!("{} (current)", season)
                }
            } else {
                season.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Feature importance as a table with a proportional bar
pub fn format_feature_importance(features: &[FeatureImportance], use_colors: bool) -> String {
    const BAR_WIDTH: f64 = 40.0;

    let label_width = features
        .iter()
        .map(|f| f.feature.chars().count())
        .max()
        .unwrap_or(0);

    features
        .iter()
        .map(|f| {
            let bar = "#".repeat((f.importance * BAR_WIDTH).round() as usize);
            let label = pad(&f.feature, label_width);
            let value = format!("{:>6}", format_percent(f.importance));
            if use_colors {
                format!("{}  {}  {}", label, value.bold(), bar.cyan())
            } else {
                format!("{}  {}  {}", label, value, bar)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_metrics(metrics: &ModelMetrics, use_colors: bool) -> String {
    [
        ("Accuracy", metrics.accuracy),
        ("Top-3 accuracy", metrics.top3_accuracy),
        ("Top-5 accuracy", metrics.top5_accuracy),
        ("ROC AUC", metrics.roc_auc),
    ]
    .iter()
    .map(|(label, value)| {
        let value = format!("{:.2}", value);
        if use_colors {
            format!("{:<16}{}", label, value.bold())
        } else {
            format!("{:<16}{}", label, value)
        }
    })
    .collect::<Vec<_>>()
    .join("\n")
}

/// Pretty-printed JSON for scripting
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
}
