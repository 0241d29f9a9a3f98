//! Market data provider trait definition

use crate::Result;
use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::Value;

/// Trait for the financial-data chat API
///
/// The concrete implementation is [`crate::MarketClient`]; the data-access
/// layer depends on this trait so it can be exercised against a mock.
/// Every operation issues one outbound request and resolves to the parsed
/// JSON body, or fails with a transport-class error.
#[async_trait]
pub trait MarketDataApi: Send + Sync {
    /// Query the service with a free-form natural language question
    async fn query(&self, text: &str) -> Result<Value>;

    /// Search for companies fulfilling the given criteria
    async fn search_with_criteria(&self, text: &str) -> Result<Value>;

    /// Look up structured data about a single company
    async fn company_data_search(&self, name: &str) -> Result<Value>;

    /// Fetch basic information about a company
    async fn summary(&self, name: &str) -> Result<Value>;

    /// Fetch historical price data over `first..last` (dd.mm.YYYY dates)
    async fn ohlcv(&self, name: &str, first: &str, last: &str) -> Result<Value>;

    /// Pass a prompt through to the service's LLM endpoint
    async fn llm(&self, prompt: &str) -> Result<Value>;

    /// Issue one `company_data_search` per name concurrently
    ///
    /// Results come back in the order of `names` regardless of completion
    /// order. The first failed call aborts the whole batch and propagates;
    /// callers that want per-item degradation must split the batch themselves.
    async fn company_data_batch(&self, names: &[String]) -> Result<Vec<Value>> {
        try_join_all(names.iter().map(|name| self.company_data_search(name))).await
    }
}
