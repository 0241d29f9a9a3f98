//! Concrete `reqwest`-backed client for the financial-data chat API

use crate::error::{ClientError, Result};
use crate::provider::MarketDataApi;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

const DEFAULT_API_BASE: &str =
    "https://idchat-api-containerapp01-dev.orangepebble-16234c4b.switzerlandnorth.azurecontainerapps.io";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the market data client
#[derive(Debug, Clone)]
pub struct MarketClientConfig {
    /// Base URL of the service
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for MarketClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl MarketClientConfig {
    /// Create a config pointing at the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Create config from environment
    ///
    /// Reads the base URL from `FINSIGHT_API_BASE` when set.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("FINSIGHT_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::new(base_url)
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Client for the financial-data chat API
///
/// Owns a connection pool with a scoped lifetime: the pool is released
/// exactly once when the last clone is dropped, regardless of how many
/// calls failed before that.
#[derive(Debug, Clone)]
pub struct MarketClient {
    http: reqwest::Client,
    base_url: Url,
}

impl MarketClient {
    /// Create a new client from the given configuration
    pub fn new(config: MarketClientConfig) -> Result<Self> {
        // A trailing slash keeps Url::join from replacing the last path segment
        let mut base = config.base_url;
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Create a client with default configuration and env overrides
    pub fn from_env() -> Result<Self> {
        Self::new(MarketClientConfig::from_env())
    }

    /// POST to `endpoint` with query-string parameters, decode the JSON body
    async fn post(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value> {
        let url = self.base_url.join(endpoint)?;
        debug!(endpoint, "sending market data request");

        let response = self.http.post(url).query(params).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status {
                endpoint: endpoint.to_string(),
                status: response.status(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl MarketDataApi for MarketClient {
    async fn query(&self, text: &str) -> Result<Value> {
        self.post("query", &[("query", text)]).await
    }

    async fn search_with_criteria(&self, text: &str) -> Result<Value> {
        self.post("searchwithcriteria", &[("query", text)]).await
    }

    async fn company_data_search(&self, name: &str) -> Result<Value> {
        let scoped = format!("company:{name}");
        self.post("companydatasearch", &[("query", &scoped)]).await
    }

    async fn summary(&self, name: &str) -> Result<Value> {
        self.post("summary", &[("query", name)]).await
    }

    async fn ohlcv(&self, name: &str, first: &str, last: &str) -> Result<Value> {
        self.post("ohlcv", &[("query", name), ("first", first), ("last", last)])
            .await
    }

    async fn llm(&self, prompt: &str) -> Result<Value> {
        self.post("llm", &[("query", prompt)]).await
    }
}
