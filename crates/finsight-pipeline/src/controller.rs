//! Data access controller over the market data API
//!
//! Every public operation resolves to a normalized envelope and never
//! propagates an error: transport failures are caught here, logged, and
//! reported inside the envelope so callers (the pipeline tick, the snapshot
//! builder, HTTP handlers) need no error handling of their own.

use crate::report::{self, ComparisonReport, StockDataReport};
use chrono::Utc;
use finsight_client::MarketDataApi;
use serde_json::{Map, Value, json};
use tracing::warn;

/// Wraps a [`MarketDataApi`] with response normalization
#[derive(Debug, Clone)]
pub struct MarketDataController<A> {
    api: A,
}

impl<A: MarketDataApi> MarketDataController<A> {
    /// Create a controller over the given API implementation
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Fetch historical stock data for one company
    ///
    /// `start`/`end` are dd.mm.YYYY dates; when omitted the window defaults
    /// to one year ago through today. The raw response is kept verbatim in
    /// `data`; `parsed_data` carries the embedded table when the payload
    /// shape allows, `None` otherwise.
    pub async fn get_stock_data(
        &self,
        company: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> StockDataReport {
        let (default_start, default_end) = report::default_period(Utc::now().date_naive());
        let start = start.unwrap_or(&default_start);
        let end = end.unwrap_or(&default_end);
        let period = format!("{start} to {end}");

        match self.api.ohlcv(company, start, end).await {
            Ok(data) => {
                let parsed_data = report::parse_table(&data);
                StockDataReport::Success {
                    company: company.to_string(),
                    period,
                    data,
                    parsed_data,
                    timestamp: Utc::now(),
                }
            }
            Err(err) => {
                warn!(company, error = %err, "historical price fetch failed");
                StockDataReport::Error {
                    company: company.to_string(),
                    period,
                    error: err.to_string(),
                    timestamp: Utc::now(),
                }
            }
        }
    }

    /// Compare several companies, optionally extracting one metric
    ///
    /// One lookup per company runs concurrently; results are keyed by
    /// company in request order. A failed extraction for a single company
    /// yields `null` for that company; only a transport failure during the
    /// fan-out turns the whole comparison into an error envelope.
    pub async fn compare_companies(
        &self,
        companies: &[String],
        metric: Option<&str>,
    ) -> ComparisonReport {
        match self.api.company_data_batch(companies).await {
            Ok(results) => {
                let data: Map<String, Value> =
                    companies.iter().cloned().zip(results).collect();

                let comparison = metric.map(|metric| {
                    companies
                        .iter()
                        .map(|company| {
                            let value = data
                                .get(company)
                                .and_then(|raw| report::extract_metric(raw, metric))
                                .unwrap_or(Value::Null);
                            (company.clone(), value)
                        })
                        .collect()
                });

                ComparisonReport::Success {
                    companies: companies.to_vec(),
                    metric: metric.map(ToString::to_string),
                    data,
                    comparison,
                    timestamp: Utc::now(),
                }
            }
            Err(err) => {
                warn!(?companies, error = %err, "company comparison failed");
                ComparisonReport::Error {
                    companies: companies.to_vec(),
                    metric: metric.map(ToString::to_string),
                    error: err.to_string(),
                    timestamp: Utc::now(),
                }
            }
        }
    }

    /// Fetch basic information about one company
    pub async fn get_company_summary(&self, company: &str) -> Value {
        match self.api.summary(company).await {
            Ok(data) => json!({
                "company": company,
                "data": data,
                "timestamp": Utc::now(),
                "status": "success",
            }),
            Err(err) => {
                warn!(company, error = %err, "company summary fetch failed");
                json!({
                    "company": company,
                    "error": err.to_string(),
                    "timestamp": Utc::now(),
                    "status": "error",
                })
            }
        }
    }

    /// Search for companies matching free-form criteria
    pub async fn search_companies_by_criteria(&self, criteria: &str) -> Value {
        match self.api.search_with_criteria(criteria).await {
            Ok(data) => json!({
                "criteria": criteria,
                "data": data,
                "timestamp": Utc::now(),
                "status": "success",
            }),
            Err(err) => {
                warn!(criteria, error = %err, "criteria search failed");
                json!({
                    "criteria": criteria,
                    "error": err.to_string(),
                    "timestamp": Utc::now(),
                    "status": "error",
                })
            }
        }
    }

    /// Ask the service's LLM endpoint for market insights
    pub async fn get_market_insights(&self, query: &str) -> Value {
        match self.api.llm(query).await {
            Ok(data) => json!({
                "query": query,
                "data": data,
                "timestamp": Utc::now(),
                "status": "success",
            }),
            Err(err) => {
                warn!(query, error = %err, "market insight fetch failed");
                json!({
                    "query": query,
                    "error": err.to_string(),
                    "timestamp": Utc::now(),
                    "status": "error",
                })
            }
        }
    }

    /// Combine summary, price history, and company data into one profile
    ///
    /// The three lookups run concurrently; the first failure aborts the
    /// profile and is reported as an error envelope.
    pub async fn get_company_profile(&self, company: &str) -> Value {
        let (start, end) = report::default_period(Utc::now().date_naive());

        let fetched = tokio::try_join!(
            self.api.summary(company),
            self.api.ohlcv(company, &start, &end),
            self.api.company_data_search(company),
        );

        match fetched {
            Ok((summary, stock_data, details)) => {
                let stock_table = report::parse_table(&stock_data);
                json!({
                    "company": company,
                    "summary": summary,
                    "stock_data": stock_data,
                    "stock_table": stock_table,
                    "details": details,
                    "timestamp": Utc::now(),
                    "status": "success",
                })
            }
            Err(err) => {
                warn!(company, error = %err, "company profile fetch failed");
                json!({
                    "company": company,
                    "error": err.to_string(),
                    "timestamp": Utc::now(),
                    "status": "error",
                })
            }
        }
    }
}
