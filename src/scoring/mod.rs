pub mod engine;
pub mod factors;
pub mod model_card;

pub use engine::{explain, score, MAX_PROBABILITY};
pub use factors::{Feature, Normalization, FEATURES};
pub use model_card::{feature_importance, model_metrics};
