//! Async client for the financial-data chat API
//!
//! The remote service answers free-form financial questions and exposes a
//! handful of specialized endpoints (company search, OHLCV history, company
//! summaries, an LLM passthrough). All endpoints are plain POSTs with
//! query-string parameters and JSON bodies.
//!
//! The crate exposes two layers:
//!
//! - [`MarketClient`]: the concrete `reqwest`-backed client. It has a scoped
//!   lifetime: construct it, issue calls, drop it. Dropping releases the
//!   pooled connections exactly once, whether or not calls failed.
//! - [`MarketDataApi`]: the trait the rest of the system programs against,
//!   including the order-preserving concurrent fan-out
//!   [`MarketDataApi::company_data_batch`].
//!
//! No retries happen at this layer. Retry policy, if any, belongs to callers.

pub mod client;
pub mod error;
pub mod provider;

pub use client::{MarketClient, MarketClientConfig};
pub use error::{ClientError, Result};
pub use provider::MarketDataApi;
