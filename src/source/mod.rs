pub mod cache;
pub mod client;
pub mod gateway;
pub mod normalize;
pub mod types;

pub use cache::{clear_cache, get_cache_path, Clock, ResponseCache};
pub use client::{create_client, install_crypto_provider, HttpSource, ScorerSource};
pub use gateway::{Gateway, GatewaySettings};
