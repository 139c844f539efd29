use std::collections::HashSet;

use super::schema::Config;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if !is_valid_season(&config.current_season) {
        errors.push(format!(
            "current_season: '{}' is not a YYYY-YY season",
            config.current_season
        ));
    }

    if config.base_url.trim().is_empty() {
        errors.push("base_url: must not be empty".to_string());
    }

    if config.competitions.is_empty() {
        errors.push("competitions: at least one competition is required".to_string());
    }
    let mut seen = HashSet::new();
    for (i, competition) in config.competitions.iter().enumerate() {
        if competition.id.trim().is_empty() {
            errors.push(format!("competitions[{}].id: must not be empty", i));
        } else if !seen.insert(competition.id.as_str()) {
            errors.push(format!(
                "competitions[{}].id: duplicate id '{}'",
                i, competition.id
            ));
        }
    }

    if config.scorer_limit == 0 {
        errors.push("scorer_limit: must be positive".to_string());
    }
    if config.top_n == 0 {
        errors.push("top_n: must be positive".to_string());
    }

    if let Err(e) = config.request_delay() {
        errors.push(format!("request_delay: {:#}", e));
    }
    if let Err(e) = config.cache_ttl() {
        errors.push(format!("cache_ttl: {:#}", e));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `YYYY-YY` where the second year follows the first, e.g. "2023-24".
pub fn is_valid_season(season: &str) -> bool {
    let Some((start, end)) = season.split_once('-') else {
        return false;
    };
    if start.len() != 4 || end.len() != 2 {
        return false;
    }
    if !start.bytes().chain(end.bytes()).all(|b| b.is_ascii_digit()) {
        return false;
    }
    let (Ok(start), Ok(end)) = (start.parse::<u32>(), end.parse::<u32>()) else {
        return false;
    };
    (start + 1) % 100 == end
}
