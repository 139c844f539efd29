use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ballon_predict::config::{self, Config};
use ballon_predict::output;
use ballon_predict::service::PredictionService;
use ballon_predict::source::{self, HttpSource};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ranked award predictions for a season (default if no subcommand)
    Predictions {
        /// Season as YYYY-YY (defaults to the current season)
        season: Option<String>,

        /// Show every feature contribution per player
        #[arg(short, long)]
        detail: bool,
    },
    /// List seasons that can be queried
    Seasons,
    /// Show the model's feature importance
    Features,
    /// Show the model's evaluation metrics
    Metrics,
    /// Remove cached upstream responses
    ClearCache,
}

#[derive(Parser, Debug)]
#[command(name = "ballon-predict")]
#[command(about = "Ranks award contenders from player statistics", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/ballon-predict/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Do not read or write the on-disk response cache
    #[arg(long, global = true)]
    no_cache: bool,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("ballon_predict={}", default_level).into()),
        )
        .init();
}

fn load_config(path: Option<String>) -> Config {
    let config = match config::load_config(path.map(PathBuf::from)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    config
}

/// Load and validate config, then wire the service. Exits on config errors.
fn build_service(config_path: Option<String>, no_cache: bool) -> PredictionService<HttpSource> {
    let config = load_config(config_path);
    let api_key = config::api_key_from_env();
    match PredictionService::from_config(&config, &api_key, !no_cache) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }
}

fn print_or_exit(rendered: anyhow::Result<String>) {
    match rendered {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    }
}

#[tokio::main]
async fn main() {
    source::install_crypto_provider();

    let cli = Cli::parse();
    init_logging(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Predictions {
        season: None,
        detail: false,
    });

    let use_colors = !cli.json && output::should_use_colors();

    match command {
        Commands::Predictions { season, detail } => {
            let service = build_service(cli.config, cli.no_cache);
            let start_time = Instant::now();
            let season = season.unwrap_or_else(|| service.current_season().to_string());
            if !config::is_valid_season(&season) {
                eprintln!("Invalid season '{}': expected YYYY-YY, e.g. 2023-24", season);
                std::process::exit(EXIT_CONFIG);
            }

            let results = match service.predictions(&season).await {
                Ok(r) => r,
                Err(e) => {
                    error!(season = %season, error = %e, "prediction request failed");
                    eprintln!("Error: {}", e);
                    std::process::exit(EXIT_DATA);
                }
            };
            debug!(season = %season, count = results.len(), elapsed = ?start_time.elapsed(), "predictions ready");

            if cli.json {
                print_or_exit(output::format_json(&results));
            } else if detail && !results.is_empty() {
                let blocks: Vec<String> = results
                    .iter()
                    .map(|r| output::format_prediction_detail(r, use_colors))
                    .collect();
                println!("{}", blocks.join("\n\n"));
            } else {
                println!("Season {}", season);
                println!("{}", output::format_leaderboard(&results, use_colors));
            }
        }
        Commands::Seasons => {
            let service = build_service(cli.config, cli.no_cache);
            let seasons = service.available_seasons();
            if cli.json {
                print_or_exit(output::format_json(&seasons));
            } else {
                println!(
                    "{}",
                    output::format_seasons(&seasons, service.current_season(), use_colors)
                );
            }
        }
        Commands::Features => {
            let features = build_service(cli.config, cli.no_cache).feature_importance();
            if cli.json {
                print_or_exit(output::format_json(&features));
            } else {
                println!("{}", output::format_feature_importance(&features, use_colors));
            }
        }
        Commands::Metrics => {
            let metrics = build_service(cli.config, cli.no_cache).model_metrics();
            if cli.json {
                print_or_exit(output::format_json(&metrics));
            } else {
                println!("{}", output::format_metrics(&metrics, use_colors));
            }
        }
        Commands::ClearCache => match source::clear_cache() {
            Ok(()) => println!("Cache cleared: {}", source::get_cache_path().display()),
            Err(e) => {
                eprintln!("Failed to clear cache: {:#}", e);
                std::process::exit(EXIT_DATA);
            }
        },
    }

    std::process::exit(EXIT_SUCCESS);
}
