mod schema;
mod validation;

pub use schema::{CompetitionConfig, Config, DEFAULT_BASE_URL, DEFAULT_CURRENT_SEASON};
pub use validation::{is_valid_season, validate_config};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the statistics API key
pub const ENV_API_KEY_VAR: &str = "FOOTBALL_DATA_API_KEY";

/// Environment variable that overrides `current_season`
pub const ENV_SEASON_VAR: &str = "BALLON_CURRENT_SEASON";

/// Get the config directory path (~/.config/ballon-predict/)
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ballon-predict")
}

/// Get the default config file path (~/.config/ballon-predict/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file and apply environment overrides.
///
/// With `path` set, the file must exist. Without it, the default path is
/// tried and a missing file means built-in defaults.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let mut config = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            read_config_file(&path)?
        }
        None => {
            let default_path = get_config_path();
            if default_path.exists() {
                read_config_file(&default_path)?
            } else {
                Config::default()
            }
        }
    };

    apply_env_overrides(&mut config, env_var);
    Ok(config)
}

/// Apply environment overrides read through `lookup`.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(season) = non_empty(lookup(ENV_SEASON_VAR)) {
        config.current_season = season;
    }
}

fn read_config_file(path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    if config_content.trim().is_empty() {
        return Ok(Config::default());
    }

    serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))
}

/// The API key from the environment, or an empty string.
///
/// A missing key is not an error here; the upstream rejects the first request
/// and the live path falls back to stored data.
pub fn api_key_from_env() -> String {
    api_key_from(env_var)
}

fn api_key_from<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup(ENV_API_KEY_VAR)).unwrap_or_default()
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Trimmed value, or None when blank
fn non_empty(value: Option<String>) -> Option<String> {
    let trimmed = value?.trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
