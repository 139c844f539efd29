pub mod formatter;

pub use formatter::{
    format_feature_importance, format_json, format_leaderboard, format_metrics, format_percent,
    format_prediction_detail, format_seasons, should_use_colors,
};
