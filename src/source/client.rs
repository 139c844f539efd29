use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use std::future::Future;
use std::time::Duration;

use crate::error::SourceError;

const AUTH_HEADER: &str = "X-Auth-Token";
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Anything that can answer `GET {endpoint}` with a response body.
///
/// The HTTP implementation talks to the statistics API; tests substitute an
/// in-process fake.
pub trait ScorerSource: Send + Sync {
    fn fetch(&self, endpoint: &str) -> impl Future<Output = Result<String, SourceError>> + Send;
}

/// Install the ring crypto provider for rustls. Safe to call more than once.
pub fn install_crypto_provider() {
    // Err only means a provider is already installed
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Create an HTTP client that sends the API key on every request.
///
/// An empty key is accepted here; the upstream rejects it on first use.
pub fn create_client(api_key: &str) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    let token = HeaderValue::from_str(api_key)
        .context("API key contains characters that cannot be sent in a header")?;
    headers.insert(AUTH_HEADER, token);

    reqwest::Client::builder()
        .default_headers(headers)
        .user_agent(concat!("ballon-predict/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .context("Failed to create HTTP client")
}

pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

impl ScorerSource for HttpSource {
    async fn fetch(&self, endpoint: &str) -> Result<String, SourceError> {
        let transport = |source| SourceError::Transport {
            endpoint: endpoint.to_string(),
            source,
        };

        let response = self
            .client
            .get(self.url_for(endpoint))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(transport)
    }
}
