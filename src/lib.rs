pub mod config;
pub mod error;
pub mod output;
pub mod resolver;
pub mod scoring;
pub mod service;
pub mod source;
pub mod store;
pub mod types;
